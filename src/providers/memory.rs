//! In-memory telemetry provider

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::provider::TelemetrySource;
use crate::types::{
    CarSample, DriverNumber, Lap, PositionSample, PositionStatus, SessionTime, TimeWindow,
};

/// Telemetry held in memory, keyed by driver.
///
/// This is the provider used for loaded session snapshots and in tests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InMemoryTelemetry {
    /// Positional fixes per driver
    #[serde(default)]
    position: BTreeMap<DriverNumber, Vec<PositionSample>>,

    /// Car telemetry per driver
    #[serde(default)]
    car: BTreeMap<DriverNumber, Vec<CarSample>>,
}

impl InMemoryTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append positional fixes for a driver.
    pub fn insert_position_samples(
        &mut self,
        driver: impl Into<DriverNumber>,
        samples: impl IntoIterator<Item = PositionSample>,
    ) {
        self.position.entry(driver.into()).or_default().extend(samples);
    }

    /// Append car telemetry for a driver.
    pub fn insert_car_samples(
        &mut self,
        driver: impl Into<DriverNumber>,
        samples: impl IntoIterator<Item = CarSample>,
    ) {
        self.car.entry(driver.into()).or_default().extend(samples);
    }

    /// Number of drivers with any telemetry.
    pub fn driver_count(&self) -> usize {
        let mut drivers: Vec<&DriverNumber> = self.position.keys().chain(self.car.keys()).collect();
        drivers.sort();
        drivers.dedup();
        drivers.len()
    }
}

/// Intersection of `window` with the lap's own time span.
fn clip_to_lap(lap: &Lap, window: TimeWindow) -> Option<TimeWindow> {
    let start = window.start.max(lap.start_time);
    let end = match lap.end_time {
        Some(lap_end) => window.end.min(lap_end),
        None => window.end,
    };
    (start <= end).then_some(TimeWindow::new(start, end))
}

fn within<T>(
    samples: &[T],
    window: Option<TimeWindow>,
    time: impl Fn(&T) -> SessionTime,
) -> impl Iterator<Item = &T> {
    samples.iter().filter(move |s| window.is_some_and(|w| w.contains(time(*s))))
}

impl TelemetrySource for InMemoryTelemetry {
    fn position_status_within(&self, lap: &Lap, window: TimeWindow) -> Vec<PositionStatus> {
        let Some(samples) = self.position.get(&lap.driver_number) else {
            return Vec::new();
        };
        within(samples, clip_to_lap(lap, window), |s| s.time).map(|s| s.status).collect()
    }

    fn speed_within(&self, lap: &Lap, window: TimeWindow) -> Vec<f64> {
        let Some(samples) = self.car.get(&lap.driver_number) else {
            return Vec::new();
        };
        within(samples, clip_to_lap(lap, window), |s| s.time).map(|s| s.speed).collect()
    }
}
