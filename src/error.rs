//! Error types for overtake extraction.
//!
//! Only conditions that indicate broken upstream data or a caller mistake are
//! errors. Missing data (no lap at a time, no resolvable opponent, an empty
//! telemetry window) is a valid classification outcome and is folded into
//! [`OvertakeStatus`](crate::OvertakeStatus) instead.
//!
//! ## Error Categories
//!
//! - **Input-shape errors**: multiple drivers in a single-driver input, or a
//!   time that matches more than one lap. Fatal for the affected driver only.
//! - **Configuration errors**: invalid tolerances or rule ordering.
//! - **Parse / File errors**: loading session snapshots and configuration.
//! - **Runner errors**: cancellation or worker failure in concurrent runs.
//!
//! ```rust
//! use pitwall_overtakes::OvertakeError;
//!
//! let error = OvertakeError::multiple_drivers("44", "63");
//! assert!(error.is_input_shape());
//! for suggestion in error.recovery_suggestions() {
//!     println!("  - {}", suggestion);
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

use crate::types::{DriverNumber, SessionTime};

/// Result type alias for overtake operations.
pub type Result<T, E = OvertakeError> = std::result::Result<T, E>;

/// Main error type for overtake extraction.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum OvertakeError {
    #[error("Expected samples for driver {expected} only, found driver {found}")]
    MultipleDrivers { expected: DriverNumber, found: DriverNumber },

    #[error("Driver {driver} has {matches} laps covering {time}, expected at most one")]
    AmbiguousLap { driver: DriverNumber, time: SessionTime, matches: usize },

    #[error("Invalid configuration: {reason}")]
    Config { reason: String },

    #[error("Parse error in {context}: {details}")]
    Parse { context: String, details: String },

    #[error("File error: {path}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Extraction for driver {driver} was cancelled")]
    Cancelled { driver: DriverNumber },

    #[error("Extraction worker for driver {driver} failed: {details}")]
    Worker { driver: DriverNumber, details: String },
}

impl OvertakeError {
    /// Returns whether this error reports a violated invariant in upstream data.
    pub fn is_input_shape(&self) -> bool {
        match self {
            OvertakeError::MultipleDrivers { .. } => true,
            OvertakeError::AmbiguousLap { .. } => true,
            OvertakeError::Config { .. } => false,
            OvertakeError::Parse { .. } => false,
            OvertakeError::File { .. } => false,
            OvertakeError::Cancelled { .. } => false,
            OvertakeError::Worker { .. } => false,
        }
    }

    /// Returns suggested recovery actions for this error.
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            OvertakeError::MultipleDrivers { .. } => vec![
                "Pick a single driver's samples before extracting position changes",
                "Check the timing stream reconciliation for mislabelled driver numbers",
            ],
            OvertakeError::AmbiguousLap { .. } => vec![
                "Check lap start and end times for overlaps",
                "Verify the lap index was built for a single session",
            ],
            OvertakeError::Config { .. } => vec![
                "Use non-negative tolerances",
                "List each rule at most once in rule_order",
            ],
            OvertakeError::Parse { .. } => vec![
                "Check the YAML document structure",
                "Verify field names and value types",
            ],
            OvertakeError::File { .. } => vec![
                "Check file exists and is readable",
                "Check file permissions",
            ],
            OvertakeError::Cancelled { .. } => vec!["Re-run without cancelling the token"],
            OvertakeError::Worker { .. } => vec![
                "Re-run the driver on the current thread to inspect the failure",
                "Check the worker thread pool configuration",
            ],
        }
    }

    /// Helper constructor for multiple-driver input errors.
    pub fn multiple_drivers(expected: impl Into<DriverNumber>, found: impl Into<DriverNumber>) -> Self {
        OvertakeError::MultipleDrivers { expected: expected.into(), found: found.into() }
    }

    /// Helper constructor for ambiguous lap lookups.
    pub fn ambiguous_lap(driver: impl Into<DriverNumber>, time: SessionTime, matches: usize) -> Self {
        OvertakeError::AmbiguousLap { driver: driver.into(), time, matches }
    }

    /// Helper constructor for configuration errors.
    pub fn config(reason: impl Into<String>) -> Self {
        OvertakeError::Config { reason: reason.into() }
    }

    /// Helper constructor for parse errors.
    pub fn parse(context: impl Into<String>, details: impl Into<String>) -> Self {
        OvertakeError::Parse { context: context.into(), details: details.into() }
    }

    /// Helper constructor for file errors with path context.
    pub fn file_error(path: PathBuf, source: std::io::Error) -> Self {
        OvertakeError::File { path, source }
    }
}

impl From<std::io::Error> for OvertakeError {
    fn from(err: std::io::Error) -> Self {
        OvertakeError::File { path: PathBuf::from("<unknown>"), source: err }
    }
}
