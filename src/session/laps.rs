//! Per-driver lap index

use std::collections::BTreeMap;

use crate::detection::pit;
use crate::types::{DriverNumber, Lap, PitStop, SessionTime};
use crate::{OvertakeError, Result};

/// Laps for every driver, each driver's laps ordered by lap number.
#[derive(Debug, Clone, Default)]
pub struct LapIndex {
    laps: BTreeMap<DriverNumber, Vec<Lap>>,
}

impl LapIndex {
    pub fn new(laps: Vec<Lap>) -> Self {
        let mut by_driver: BTreeMap<DriverNumber, Vec<Lap>> = BTreeMap::new();
        for lap in laps {
            by_driver.entry(lap.driver_number.clone()).or_default().push(lap);
        }
        for driver_laps in by_driver.values_mut() {
            driver_laps.sort_by_key(|lap| lap.lap_number);
        }
        Self { laps: by_driver }
    }

    /// One driver's laps; empty when the driver has none.
    pub fn pick_driver(&self, driver: &DriverNumber) -> &[Lap] {
        self.laps.get(driver).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn drivers(&self) -> impl Iterator<Item = &DriverNumber> {
        self.laps.keys()
    }

    /// The lap covering `time` for `driver`.
    ///
    /// `Ok(None)` when no lap covers it; an error when more than one does.
    pub fn lap_at_time(&self, driver: &DriverNumber, time: SessionTime) -> Result<Option<&Lap>> {
        lap_at_time(self.pick_driver(driver), time)
    }

    /// Completed pit stops for `driver`, in lap order.
    pub fn pit_stops(&self, driver: &DriverNumber) -> Vec<PitStop> {
        pit::pit_stops(self.pick_driver(driver))
    }
}

/// The lap in `laps` covering `time`. All laps must belong to one driver.
pub fn lap_at_time(laps: &[Lap], time: SessionTime) -> Result<Option<&Lap>> {
    let mut matching = laps.iter().filter(|lap| lap.covers(time));
    let Some(first) = matching.next() else {
        return Ok(None);
    };

    let extra = matching.count();
    if extra > 0 {
        return Err(OvertakeError::ambiguous_lap(&first.driver_number, time, extra + 1));
    }
    Ok(Some(first))
}
