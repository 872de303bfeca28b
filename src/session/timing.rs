//! Timing sample stream for a whole session

use std::collections::BTreeMap;
use tracing::warn;

use crate::types::{DriverNumber, SessionTime, TimingSample};

/// All drivers' timing samples for one session.
///
/// Keeps the ingestion order (needed for tie-breaks when resolving who held a
/// position) alongside a per-driver copy ordered by time.
#[derive(Debug, Clone, Default)]
pub struct TimingStream {
    samples: Vec<TimingSample>,
    by_driver: BTreeMap<DriverNumber, Vec<TimingSample>>,
    drivers: Vec<DriverNumber>,
}

impl TimingStream {
    pub fn new(samples: Vec<TimingSample>) -> Self {
        let mut by_driver: BTreeMap<DriverNumber, Vec<TimingSample>> = BTreeMap::new();
        let mut drivers = Vec::new();

        for sample in &samples {
            let entry = by_driver.entry(sample.driver_number.clone()).or_insert_with(|| {
                drivers.push(sample.driver_number.clone());
                Vec::new()
            });
            entry.push(sample.clone());
        }

        for (driver, driver_samples) in by_driver.iter_mut() {
            if !driver_samples.is_sorted_by_key(|s| s.time) {
                warn!(driver = %driver, "Timing samples out of order, reordering by time");
                // stable: equal times keep ingestion order
                driver_samples.sort_by_key(|s| s.time);
            }
        }

        Self { samples, by_driver, drivers }
    }

    /// Samples in ingestion order.
    pub fn samples(&self) -> &[TimingSample] {
        &self.samples
    }

    /// Drivers in order of first appearance.
    pub fn drivers(&self) -> &[DriverNumber] {
        &self.drivers
    }

    /// One driver's samples ordered by time; empty when the driver is absent.
    pub fn pick_driver(&self, driver: &DriverNumber) -> &[TimingSample] {
        self.by_driver.get(driver).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }
}

/// Latest sample at or before `time` in a time-ordered slice.
pub fn sample_at(samples: &[TimingSample], time: SessionTime) -> Option<&TimingSample> {
    let end = samples.partition_point(|s| s.time <= time);
    samples[..end].last()
}

/// Position in effect at `time`: the latest positioned sample at or before it.
pub fn position_at(samples: &[TimingSample], time: SessionTime) -> Option<u32> {
    let end = samples.partition_point(|s| s.time <= time);
    samples[..end].iter().rev().find_map(|s| s.position)
}

/// Samples with `start < time <= end` (exclusive start).
pub fn samples_after(
    samples: &[TimingSample],
    start: SessionTime,
    end: SessionTime,
) -> &[TimingSample] {
    let lo = samples.partition_point(|s| s.time <= start);
    let hi = samples.partition_point(|s| s.time <= end);
    &samples[lo..hi.max(lo)]
}

/// Samples with `start <= time < end` (exclusive end).
pub fn samples_before(
    samples: &[TimingSample],
    start: SessionTime,
    end: SessionTime,
) -> &[TimingSample] {
    let lo = samples.partition_point(|s| s.time < start);
    let hi = samples.partition_point(|s| s.time < end);
    &samples[lo..hi.max(lo)]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(secs: i64) -> SessionTime {
        SessionTime::from_secs(secs)
    }

    #[test]
    fn groups_by_driver_in_first_appearance_order() {
        let stream = TimingStream::new(vec![
            TimingSample::new(t(0), "16", 1, Some(1)),
            TimingSample::new(t(0), "1", 2, Some(1)),
            TimingSample::new(t(5), "16", 2, Some(1)),
        ]);

        assert_eq!(stream.drivers(), &[DriverNumber::from("16"), DriverNumber::from("1")]);
        assert_eq!(stream.pick_driver(&"16".into()).len(), 2);
        assert!(stream.pick_driver(&"99".into()).is_empty());
    }

    #[test]
    fn reorders_out_of_order_samples_stably() {
        let stream = TimingStream::new(vec![
            TimingSample::new(t(10), "44", 3, None),
            TimingSample::new(t(5), "44", 4, None),
            TimingSample::new(t(10), "44", 2, None),
        ]);

        let positions: Vec<_> = stream.pick_driver(&"44".into()).iter().map(|s| s.position).collect();
        assert_eq!(positions, vec![Some(4), Some(3), Some(2)]);
        // ingestion order is untouched
        assert_eq!(stream.samples()[0].position, Some(3));
    }

    #[test]
    fn position_at_skips_unpositioned_samples() {
        let mut gap_only = TimingSample::new(t(8), "44", 0, None);
        gap_only.position = None;
        let samples = vec![TimingSample::new(t(0), "44", 5, None), gap_only];

        assert_eq!(position_at(&samples, t(9)), Some(5));
        assert_eq!(sample_at(&samples, t(9)).map(|s| s.time), Some(t(8)));
        assert_eq!(position_at(&samples, SessionTime::from_millis(-1)), None);
    }

    #[test]
    fn window_slices_respect_bounds() {
        let samples: Vec<_> = (0..5).map(|i| TimingSample::new(t(i * 5), "44", 3, None)).collect();

        let after = samples_after(&samples, t(5), t(15));
        assert_eq!(after.iter().map(|s| s.time).collect::<Vec<_>>(), vec![t(10), t(15)]);

        let before = samples_before(&samples, t(5), t(15));
        assert_eq!(before.iter().map(|s| s.time).collect::<Vec<_>>(), vec![t(5), t(10)]);
    }
}
