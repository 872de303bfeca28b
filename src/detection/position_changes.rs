//! Reduces a driver's timing samples to discrete position changes

use tracing::trace;

use super::opponent::OpponentResolver;
use crate::session::lap_at_time;
use crate::types::{Lap, PositionChange, TimingSample};
use crate::{OvertakeError, Result};

/// Walk one driver's time-ordered samples and emit a [`PositionChange`] for
/// every transition in running position.
///
/// Samples without a position are skipped. Losses are emitted with
/// `positions_gained == 0`. The cars ahead and behind are resolved from the
/// whole stream at the instant of the change.
///
/// The lap number comes from the driver's `laps` covering the change, and
/// from the sample's own label only when no lap covers it.
///
/// Returns an error if the samples belong to more than one driver, or if
/// more than one lap covers a change.
pub fn extract_position_changes(
    samples: &[TimingSample],
    laps: &[Lap],
    resolver: &OpponentResolver<'_>,
) -> Result<Vec<PositionChange>> {
    let Some(first) = samples.first() else {
        return Ok(Vec::new());
    };
    let driver = &first.driver_number;

    let mut changes = Vec::new();
    let mut last_position: Option<u32> = None;

    for sample in samples {
        if &sample.driver_number != driver {
            return Err(OvertakeError::multiple_drivers(driver, &sample.driver_number));
        }

        let Some(position) = sample.position else {
            continue;
        };
        let Some(before) = last_position.replace(position) else {
            continue;
        };
        if position == before {
            continue;
        }

        let excluding = [driver];
        let driver_ahead = position
            .checked_sub(1)
            .filter(|ahead| *ahead > 0)
            .and_then(|ahead| resolver.opponent_at(sample.time, ahead, &excluding))
            .cloned();
        let driver_behind = position
            .checked_add(1)
            .and_then(|behind| resolver.opponent_at(sample.time, behind, &excluding))
            .cloned();
        let lap_number = match lap_at_time(laps, sample.time)? {
            Some(lap) => Some(lap.lap_number),
            None => sample.lap_number,
        };

        trace!(
            driver = %driver,
            time = %sample.time,
            from = before,
            to = position,
            "Position change"
        );

        changes.push(PositionChange {
            time: sample.time,
            driver_number: driver.clone(),
            lap_number,
            position,
            position_before: before,
            driver_ahead,
            driver_behind,
            positions_gained: before.saturating_sub(position),
        });
    }

    Ok(changes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::TimingStream;
    use crate::types::{DriverNumber, SessionTime};

    fn t(secs: i64) -> SessionTime {
        SessionTime::from_secs(secs)
    }

    #[test]
    fn empty_input_yields_nothing() {
        let stream = TimingStream::default();
        let resolver = OpponentResolver::new(&stream);
        assert!(extract_position_changes(&[], &[], &resolver).unwrap().is_empty());
    }

    #[test]
    fn gains_and_losses_are_both_recorded() {
        let stream = TimingStream::new(vec![
            TimingSample::new(t(0), "22", 5, Some(1)),
            TimingSample::new(t(10), "22", 5, Some(1)),
            TimingSample::new(t(20), "22", 4, Some(1)),
            TimingSample::new(t(30), "22", 6, Some(2)),
        ]);
        let resolver = OpponentResolver::new(&stream);
        let changes = extract_position_changes(stream.pick_driver(&"22".into()), &[], &resolver).unwrap();

        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].time, t(20));
        assert_eq!(changes[0].position_before, 5);
        assert_eq!(changes[0].positions_gained, 1);
        assert_eq!(changes[1].position, 6);
        assert_eq!(changes[1].positions_gained, 0);
        assert_eq!(changes[1].lap_number, Some(2));
    }

    #[test]
    fn resolves_neighbours_at_change_time() {
        let stream = TimingStream::new(vec![
            TimingSample::new(t(0), "1", 1, None),
            TimingSample::new(t(0), "16", 2, None),
            TimingSample::new(t(0), "55", 3, None),
            TimingSample::new(t(0), "44", 4, None),
            TimingSample::new(t(12), "44", 3, None),
            TimingSample::new(t(12), "55", 4, None),
        ]);
        let resolver = OpponentResolver::new(&stream);
        let changes = extract_position_changes(stream.pick_driver(&"44".into()), &[], &resolver).unwrap();

        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].driver_ahead, Some(DriverNumber::from("16")));
        assert_eq!(changes[0].driver_behind, Some(DriverNumber::from("55")));
    }

    #[test]
    fn mixed_drivers_are_rejected() {
        let samples = vec![TimingSample::new(t(0), "22", 5, None), TimingSample::new(t(1), "24", 4, None)];
        let stream = TimingStream::new(samples.clone());
        let resolver = OpponentResolver::new(&stream);

        let err = extract_position_changes(&samples, &[], &resolver).unwrap_err();
        assert!(matches!(err, OvertakeError::MultipleDrivers { .. }));
    }

    #[test]
    fn unpositioned_samples_do_not_reset_tracking() {
        let mut interval_only = TimingSample::new(t(5), "22", 0, None);
        interval_only.position = None;
        let samples = vec![
            TimingSample::new(t(0), "22", 5, None),
            interval_only,
            TimingSample::new(t(10), "22", 5, None),
        ];
        let stream = TimingStream::new(samples.clone());
        let resolver = OpponentResolver::new(&stream);
        assert!(extract_position_changes(&samples, &[], &resolver).unwrap().is_empty());
    }

    #[test]
    fn lap_index_overrides_lagging_sample_label() {
        let stream = TimingStream::new(vec![
            TimingSample::new(t(80), "22", 5, Some(1)),
            TimingSample::new(t(95), "22", 4, Some(1)),
            TimingSample::new(t(200), "22", 3, Some(2)),
        ]);
        let laps = vec![Lap::new("22", 1, t(0), t(90)), Lap::new("22", 2, t(90), t(180))];
        let resolver = OpponentResolver::new(&stream);
        let changes =
            extract_position_changes(stream.pick_driver(&"22".into()), &laps, &resolver).unwrap();

        assert_eq!(changes[0].lap_number, Some(2));
        // past the last lap the sample label stands
        assert_eq!(changes[1].lap_number, Some(2));
    }

    #[test]
    fn overlapping_laps_abort_extraction() {
        let stream = TimingStream::new(vec![
            TimingSample::new(t(0), "22", 5, Some(1)),
            TimingSample::new(t(95), "22", 4, Some(2)),
        ]);
        let laps = vec![Lap::new("22", 1, t(0), t(100)), Lap::new("22", 2, t(90), t(180))];
        let resolver = OpponentResolver::new(&stream);

        let err = extract_position_changes(stream.pick_driver(&"22".into()), &laps, &resolver)
            .unwrap_err();
        assert!(matches!(err, OvertakeError::AmbiguousLap { .. }));
    }

    #[test]
    fn last_representable_position_has_no_car_behind() {
        let samples = vec![
            TimingSample::new(t(0), "22", u32::MAX, None),
            TimingSample::new(t(10), "22", u32::MAX - 1, None),
            TimingSample::new(t(20), "22", u32::MAX, None),
        ];
        let stream = TimingStream::new(samples.clone());
        let resolver = OpponentResolver::new(&stream);
        let changes = extract_position_changes(&samples, &[], &resolver).unwrap();

        assert_eq!(changes.len(), 2);
        assert_eq!(changes[1].position, u32::MAX);
        assert_eq!(changes[1].driver_behind, None);
    }
}
