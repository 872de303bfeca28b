//! Overtake detection and classification for motor-racing timing data.
//!
//! We Race Pitwall Overtakes turns a session's per-timestamp position samples
//! into a list of candidate overtakes, each classified as a legitimate on-track
//! pass or rejected with a specific reason.
//!
//! # Features
//!
//! - **Per-car decomposition**: a jump of several places yields one candidate
//!   per car passed, each against the right opponent
//! - **Explainable rejections**: lap, flag, pit, dwell, battle and telemetry
//!   checks, each with its own [`OvertakeStatus`]
//! - **Configurable**: every tolerance and the rule order live in
//!   [`OvertakeConfig`]
//! - **Deterministic**: identical inputs give identical output, including
//!   under the concurrent runner in [`parallel`]
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use pitwall_overtakes::{OvertakeConfig, OvertakeEngine, Session};
//!
//! fn main() -> pitwall_overtakes::Result<()> {
//!     let session = Session::open("austria-2022.yaml")?;
//!     let config = OvertakeConfig::from_path("overtakes.yaml")?;
//!
//!     let engine = OvertakeEngine::new(session.view(), &config);
//!     let field = engine.extract_field();
//!
//!     for record in field.credited() {
//!         println!(
//!             "{} lap {:?}: #{} takes P{}",
//!             record.time, record.lap_number, record.overtaking_driver, record.position
//!         );
//!     }
//!     for (driver, error) in &field.failures {
//!         eprintln!("#{driver}: {error}");
//!     }
//!     Ok(())
//! }
//! ```

// Core types and error handling
pub mod config;
mod error;
#[cfg(any(test, feature = "benchmark"))]
pub mod test_utils;
pub mod types;

// Session inputs
pub mod provider;
pub mod providers;
pub mod session;

// Detection and extraction
pub mod detection;
mod engine;
pub mod parallel;

// Core exports
pub use error::*;
pub use types::*;

pub use config::{OvertakeConfig, Rule};
pub use engine::{FieldOvertakes, OvertakeEngine, extract_overtakes};
pub use provider::TelemetrySource;
pub use providers::InMemoryTelemetry;
pub use session::{Session, SessionSnapshot, SessionView};
