//! Timing stream samples

use serde::{Deserialize, Serialize};

use super::{DriverNumber, SessionTime};

/// Pit state decoded from the raw timing flags of a sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PitStatus {
    #[default]
    OnTrack,
    PitIn,
    PitLane,
    PitOut,
}

impl PitStatus {
    pub fn is_in_pit(self) -> bool {
        !matches!(self, PitStatus::OnTrack)
    }
}

/// One observation of a driver's race state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingSample {
    pub time: SessionTime,
    pub driver_number: DriverNumber,
    /// Running position, 1 = leader. Unset on samples that carry other fields only.
    #[serde(default)]
    pub position: Option<u32>,
    #[serde(default)]
    pub gap_to_leader: Option<String>,
    #[serde(default)]
    pub interval_to_ahead: Option<String>,
    #[serde(default)]
    pub lap_number: Option<u32>,
    /// Upstream status code, kept verbatim.
    #[serde(default)]
    pub raw_status: Option<u32>,
    #[serde(default)]
    pub pit_status: PitStatus,
}

impl TimingSample {
    /// Minimal positioned sample.
    pub fn new(
        time: SessionTime,
        driver_number: impl Into<DriverNumber>,
        position: u32,
        lap_number: Option<u32>,
    ) -> Self {
        Self {
            time,
            driver_number: driver_number.into(),
            position: Some(position),
            gap_to_leader: None,
            interval_to_ahead: None,
            lap_number,
            raw_status: None,
            pit_status: PitStatus::OnTrack,
        }
    }

    pub fn with_pit_status(mut self, pit_status: PitStatus) -> Self {
        self.pit_status = pit_status;
        self
    }
}
