//! Test utilities for building synthetic sessions
//!
//! [`SessionBuilder`] assembles small sessions in whole seconds so scenario
//! tests and benchmarks read like a timing sheet.

#![cfg(any(test, feature = "benchmark"))]

use crate::providers::InMemoryTelemetry;
use crate::session::Session;
use crate::types::{CarSample, Lap, PositionSample, PositionStatus, SessionTime, TimingSample};

const RACING_SPEED_KMH: f64 = 220.0;

/// Builder for synthetic sessions. All times are whole seconds.
#[derive(Debug, Default, Clone)]
pub struct SessionBuilder {
    timing: Vec<TimingSample>,
    laps: Vec<Lap>,
    telemetry: InMemoryTelemetry,
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Timing samples `(second, position)` for `driver`, all labelled lap `lap`.
    pub fn positions(mut self, driver: &str, lap: u32, points: &[(i64, u32)]) -> Self {
        self.timing.extend(
            points
                .iter()
                .map(|&(secs, position)| TimingSample::new(secs_to_time(secs), driver, position, Some(lap))),
        );
        self
    }

    pub fn lap(mut self, driver: &str, number: u32, start: i64, end: i64) -> Self {
        self.laps.push(Lap::new(driver, number, secs_to_time(start), secs_to_time(end)));
        self
    }

    /// The same lap for several drivers, with one on-track fix at racing
    /// speed per second in `[start, end]`.
    pub fn racing_lap_for(mut self, drivers: &[&str], number: u32, start: i64, end: i64) -> Self {
        for driver in drivers {
            self = self.lap(driver, number, start, end);
            self.telemetry.insert_position_samples(
                *driver,
                (start..=end).map(|s| PositionSample { time: secs_to_time(s), status: PositionStatus::OnTrack }),
            );
            self.telemetry.insert_car_samples(
                *driver,
                (start..=end).map(|s| CarSample { time: secs_to_time(s), speed: RACING_SPEED_KMH }),
            );
        }
        self
    }

    pub fn build(self) -> Session {
        Session::new(self.timing, self.laps, Vec::new(), self.telemetry)
    }
}

fn secs_to_time(secs: i64) -> SessionTime {
    SessionTime::from_secs(secs)
}
