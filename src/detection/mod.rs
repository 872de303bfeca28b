//! # Overtake detection
//!
//! The building blocks the engine chains together for one driver:
//!
//! 1. [`extract_position_changes`] reduces the driver's samples to changes
//! 2. [`OpponentResolver`] finds who held a position at an instant
//! 3. [`Classifier`] runs the configured rules over every gained level,
//!    consulting the pit ([`in_pit_window`]) and telemetry ([`track_state`])
//!    detectors
//! 4. [`resolve_duplicates`] collapses repeated passes
//!
//! Each piece is usable on its own for analysis outside the engine.

mod classifier;
mod dedup;
mod off_track;
mod opponent;
pub(crate) mod pit;
mod position_changes;

pub use classifier::Classifier;
pub use dedup::resolve_duplicates;
pub use off_track::{TrackPresence, is_maybe_off_track, track_state};
pub use opponent::OpponentResolver;
pub use pit::{in_pit_by_status, in_pit_window, pit_stops};
pub use position_changes::extract_position_changes;
