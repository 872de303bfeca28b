//! Track status (flag regime) types

use serde::{Deserialize, Serialize};

use super::SessionTime;

/// Flag regime in effect on track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackStatus {
    AllClear,
    Yellow,
    SafetyCarStandby,
    SafetyCar,
    Red,
    VscDeployed,
    VscEnding,
    Unknown(u8),
}

impl TrackStatus {
    /// Decode the numeric status code published by the timing feed.
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => TrackStatus::AllClear,
            2 => TrackStatus::Yellow,
            3 => TrackStatus::SafetyCarStandby,
            4 => TrackStatus::SafetyCar,
            5 => TrackStatus::Red,
            6 => TrackStatus::VscDeployed,
            7 => TrackStatus::VscEnding,
            other => TrackStatus::Unknown(other),
        }
    }

    /// Only a green track counts as clear; unknown codes are treated as neutralised.
    pub fn is_clear(self) -> bool {
        matches!(self, TrackStatus::AllClear)
    }
}

/// Start of a new flag regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackStatusEvent {
    pub time: SessionTime,
    pub status: TrackStatus,
}

impl TrackStatusEvent {
    pub fn new(time: SessionTime, status: TrackStatus) -> Self {
        Self { time, status }
    }
}
