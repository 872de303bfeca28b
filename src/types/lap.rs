//! Lap records and pit stops

use serde::{Deserialize, Serialize};

use super::{DriverNumber, SessionTime};

/// One completed or in-progress lap for a driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lap {
    pub driver_number: DriverNumber,
    pub lap_number: u32,
    pub start_time: SessionTime,
    /// `None` while the lap is still in progress.
    #[serde(default)]
    pub end_time: Option<SessionTime>,
    #[serde(default)]
    pub pit_in_time: Option<SessionTime>,
    #[serde(default)]
    pub pit_out_time: Option<SessionTime>,
    /// False when the lap timing is suspect (e.g. a pit stop occurred).
    #[serde(default = "default_accurate")]
    pub is_accurate: bool,
}

fn default_accurate() -> bool {
    true
}

impl Lap {
    pub fn new(
        driver_number: impl Into<DriverNumber>,
        lap_number: u32,
        start_time: SessionTime,
        end_time: SessionTime,
    ) -> Self {
        Self {
            driver_number: driver_number.into(),
            lap_number,
            start_time,
            end_time: Some(end_time),
            pit_in_time: None,
            pit_out_time: None,
            is_accurate: true,
        }
    }

    pub fn with_pit_in(mut self, time: SessionTime) -> Self {
        self.pit_in_time = Some(time);
        self.is_accurate = false;
        self
    }

    pub fn with_pit_out(mut self, time: SessionTime) -> Self {
        self.pit_out_time = Some(time);
        self.is_accurate = false;
        self
    }

    /// Whether `time` falls in `[start_time, end_time)`.
    pub fn covers(&self, time: SessionTime) -> bool {
        self.start_time <= time && self.end_time.is_none_or(|end| time < end)
    }
}

/// A completed stop: pit-in on one lap paired with the following pit-out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitStop {
    pub driver_number: DriverNumber,
    /// Lap on which the driver entered the pit lane.
    pub lap_number: u32,
    pub pit_in_time: SessionTime,
    pub pit_out_time: SessionTime,
    pub duration: SessionTime,
}
