//! Core types for session timing and overtake representation.
//!
//! ## Architecture
//!
//! Inputs supplied by upstream collaborators:
//! - [`TimingSample`] one per-timestamp observation of a driver's race state
//! - [`Lap`] lap boundaries with pit-in / pit-out instants
//! - [`TrackStatusEvent`] start of a flag regime
//! - [`PositionSample`] / [`CarSample`] positional and speed telemetry
//!
//! Derived by the engine:
//! - [`PositionChange`] a transition in a driver's running position
//! - [`OvertakeRecord`] a classified candidate with its [`OvertakeStatus`]
//! - [`PitStop`] pit-in paired with the following pit-out
//!
//! All times are [`SessionTime`] values (exact milliseconds since session start).
//!
//! ## Usage Example
//!
//! ```rust
//! use pitwall_overtakes::types::{Lap, SessionTime, TimingSample};
//!
//! let sample = TimingSample::new(SessionTime::from_secs(20), "44", 4, Some(12));
//! let lap = Lap::new("44", 12, SessionTime::from_secs(0), SessionTime::from_secs(90));
//!
//! assert!(lap.covers(sample.time));
//! assert_eq!(sample.position, Some(4));
//! ```

mod driver;
mod lap;
mod overtake;
mod position_change;
mod sample;
mod telemetry;
mod time;
mod track_status;

pub use driver::DriverNumber;
pub use lap::{Lap, PitStop};
pub use overtake::{OvertakeRecord, OvertakeStatus};
pub use position_change::PositionChange;
pub use sample::{PitStatus, TimingSample};
pub use telemetry::{CarSample, PositionSample, PositionStatus};
pub use time::{SessionTime, TimeWindow};
pub use track_status::{TrackStatus, TrackStatusEvent};
