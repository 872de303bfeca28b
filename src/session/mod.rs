//! # Session inputs
//!
//! Read-only views over one session's already-reconciled upstream data:
//!
//! - [`TimingStream`] per-timestamp position samples for every driver
//! - [`LapIndex`] per-driver laps with pit-in / pit-out instants
//! - [`TrackStatusTimeline`] flag-regime changes
//! - a [`TelemetrySource`] for positional and speed telemetry
//!
//! A [`Session`] owns all of these and can be loaded from a YAML snapshot.
//! The engine only ever borrows them through a [`SessionView`].
//!
//! ## Snapshot format
//!
//! ```yaml
//! name: Austria 2022
//! timing:
//!   - { time: 0.0, driver_number: "44", position: 5, lap_number: 1 }
//! laps:
//!   - { driver_number: "44", lap_number: 1, start_time: 0.0, end_time: 90.0 }
//! track_status:
//!   - { time: 0.0, status: AllClear }
//! telemetry:
//!   position:
//!     "44": [ { time: 1.0, status: OnTrack } ]
//!   car:
//!     "44": [ { time: 1.0, speed: 212.0 } ]
//! ```

mod laps;
mod timing;
mod track_status;

pub use laps::{LapIndex, lap_at_time};
pub use timing::{TimingStream, position_at, sample_at, samples_after, samples_before};
pub use track_status::TrackStatusTimeline;

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::provider::TelemetrySource;
use crate::providers::InMemoryTelemetry;
use crate::types::{Lap, TimingSample, TrackStatusEvent};
use crate::{OvertakeError, Result};

/// Serialized form of a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub timing: Vec<TimingSample>,
    #[serde(default)]
    pub laps: Vec<Lap>,
    #[serde(default)]
    pub track_status: Vec<TrackStatusEvent>,
    #[serde(default)]
    pub telemetry: InMemoryTelemetry,
}

/// One session's inputs, owned.
#[derive(Debug, Clone, Default)]
pub struct Session {
    name: Option<String>,
    timing: TimingStream,
    laps: LapIndex,
    track_status: TrackStatusTimeline,
    telemetry: InMemoryTelemetry,
}

impl Session {
    pub fn new(
        timing: Vec<TimingSample>,
        laps: Vec<Lap>,
        track_status: Vec<TrackStatusEvent>,
        telemetry: InMemoryTelemetry,
    ) -> Self {
        Self {
            name: None,
            timing: TimingStream::new(timing),
            laps: LapIndex::new(laps),
            track_status: TrackStatusTimeline::new(track_status),
            telemetry,
        }
    }

    pub fn from_snapshot(snapshot: SessionSnapshot) -> Self {
        let mut session =
            Self::new(snapshot.timing, snapshot.laps, snapshot.track_status, snapshot.telemetry);
        session.name = snapshot.name;
        session
    }

    /// Parse a YAML session snapshot.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let snapshot: SessionSnapshot = serde_yaml_ng::from_str(yaml)
            .map_err(|e| OvertakeError::parse("session snapshot", e.to_string()))?;

        debug!(
            samples = snapshot.timing.len(),
            laps = snapshot.laps.len(),
            track_status_events = snapshot.track_status.len(),
            "Parsed session snapshot"
        );

        Ok(Self::from_snapshot(snapshot))
    }

    /// Load a YAML session snapshot from disk.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let yaml = std::fs::read_to_string(&path)
            .map_err(|e| OvertakeError::file_error(path.as_ref().to_path_buf(), e))?;
        Self::from_yaml_str(&yaml)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn timing(&self) -> &TimingStream {
        &self.timing
    }

    pub fn laps(&self) -> &LapIndex {
        &self.laps
    }

    pub fn track_status(&self) -> &TrackStatusTimeline {
        &self.track_status
    }

    pub fn telemetry(&self) -> &InMemoryTelemetry {
        &self.telemetry
    }

    /// Borrowed view for the engine.
    pub fn view(&self) -> SessionView<'_> {
        SessionView {
            timing: &self.timing,
            laps: &self.laps,
            track_status: &self.track_status,
            telemetry: &self.telemetry,
        }
    }
}

/// Read-only borrowed inputs for one classification run.
#[derive(Clone, Copy)]
pub struct SessionView<'a> {
    pub timing: &'a TimingStream,
    pub laps: &'a LapIndex,
    pub track_status: &'a TrackStatusTimeline,
    pub telemetry: &'a dyn TelemetrySource,
}

impl std::fmt::Debug for SessionView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionView")
            .field("samples", &self.timing.len())
            .field("drivers", &self.timing.drivers().len())
            .field("track_status_events", &self.track_status.events().len())
            .finish_non_exhaustive()
    }
}
