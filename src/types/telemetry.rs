//! Per-car positional and speed telemetry samples

use serde::{Deserialize, Serialize};

use super::SessionTime;

/// Whether the car's positional fix places it on the circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PositionStatus {
    OnTrack,
    OffTrack,
}

/// One positional telemetry fix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionSample {
    pub time: SessionTime,
    pub status: PositionStatus,
}

/// One car telemetry sample; only speed is consumed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CarSample {
    pub time: SessionTime,
    /// Speed in km/h.
    pub speed: f64,
}
