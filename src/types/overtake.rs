//! Overtake records and the disqualification taxonomy

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{DriverNumber, SessionTime};

/// Classification outcome of a candidate overtake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OvertakeStatus {
    /// Genuine on-track pass.
    Ok,
    /// An earlier report of a pass that was reported again later in the same lap.
    Duplicate,
    /// No lap covers the pass for the overtaking driver.
    NoLap,
    /// The overtaking driver is on the opening lap.
    FirstLap,
    /// No lap covers the pass for the opponent, who may have retired.
    NoLapOther,
    /// The opponent is on the opening lap.
    FirstLapOther,
    /// A non-green flag regime was active just before the pass.
    TrackStatus,
    /// The opponent was in the pit window.
    Pit,
    /// The gained position was given back inside the dwell tolerance.
    LostTooQuick,
    /// The opponent never held the position just before the pass.
    NoBattle,
    /// No positional telemetry for the opponent around the pass.
    NoPositionData,
    /// The opponent was off the circuit.
    OffTrack,
    /// The opponent was crawling, at or below the speed threshold.
    MaybeOffTrack,
}

impl OvertakeStatus {
    pub fn is_ok(self) -> bool {
        matches!(self, OvertakeStatus::Ok)
    }

    pub fn name(self) -> &'static str {
        match self {
            OvertakeStatus::Ok => "OK",
            OvertakeStatus::Duplicate => "DUPLICATE",
            OvertakeStatus::NoLap => "NO_LAP",
            OvertakeStatus::FirstLap => "FIRST_LAP",
            OvertakeStatus::NoLapOther => "NO_LAP_OTHER",
            OvertakeStatus::FirstLapOther => "FIRST_LAP_OTHER",
            OvertakeStatus::TrackStatus => "TRACK_STATUS",
            OvertakeStatus::Pit => "PIT",
            OvertakeStatus::LostTooQuick => "LOST_TOO_QUICK",
            OvertakeStatus::NoBattle => "NO_BATTLE",
            OvertakeStatus::NoPositionData => "NO_POSITION_DATA",
            OvertakeStatus::OffTrack => "OFF_TRACK",
            OvertakeStatus::MaybeOffTrack => "MAYBE_OFF_TRACK",
        }
    }
}

impl fmt::Display for OvertakeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One classified overtake candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertakeRecord {
    pub time: SessionTime,
    pub lap_number: Option<u32>,
    /// Position taken by the overtaking driver.
    pub position: u32,
    pub overtaking_driver: DriverNumber,
    /// `None` when no driver could be resolved at the passed position.
    pub opponent_driver: Option<DriverNumber>,
    pub status: OvertakeStatus,
}

impl OvertakeRecord {
    pub fn is_ok(&self) -> bool {
        self.status.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_names_match_display() {
        for status in [
            OvertakeStatus::Ok,
            OvertakeStatus::NoLapOther,
            OvertakeStatus::LostTooQuick,
            OvertakeStatus::MaybeOffTrack,
        ] {
            let yaml = serde_yaml_ng::to_string(&status).unwrap();
            assert_eq!(yaml.trim(), status.name());
        }
    }
}
