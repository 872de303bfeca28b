//! Opponent off-track and low-speed detection from telemetry

use crate::provider::TelemetrySource;
use crate::types::{Lap, PositionStatus, SessionTime, TimeWindow};

/// What positional telemetry says about a car around an instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackPresence {
    OnTrack,
    OffTrack,
    NoData,
}

/// Car presence on track during `lap` within `tolerance` of `time`.
///
/// A single off-track fix in the window is enough.
pub fn track_state(
    telemetry: &dyn TelemetrySource,
    lap: &Lap,
    time: SessionTime,
    tolerance: SessionTime,
) -> TrackPresence {
    let statuses = telemetry.position_status_within(lap, TimeWindow::around(time, tolerance));
    if statuses.is_empty() {
        TrackPresence::NoData
    } else if statuses.contains(&PositionStatus::OffTrack) {
        TrackPresence::OffTrack
    } else {
        TrackPresence::OnTrack
    }
}

/// Whether the car's mean speed within `tolerance` of `time` is at or below
/// `threshold_kmh`. No speed data is never suspect.
pub fn is_maybe_off_track(
    telemetry: &dyn TelemetrySource,
    lap: &Lap,
    time: SessionTime,
    tolerance: SessionTime,
    threshold_kmh: f64,
) -> bool {
    telemetry
        .mean_speed_within(lap, TimeWindow::around(time, tolerance))
        .is_some_and(|mean| mean <= threshold_kmh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::InMemoryTelemetry;
    use crate::types::{CarSample, PositionSample};

    fn t(secs: i64) -> SessionTime {
        SessionTime::from_secs(secs)
    }

    fn telemetry() -> InMemoryTelemetry {
        let mut telemetry = InMemoryTelemetry::new();
        telemetry.insert_position_samples(
            "31",
            [
                PositionSample { time: t(48), status: PositionStatus::OnTrack },
                PositionSample { time: t(50), status: PositionStatus::OffTrack },
                PositionSample { time: t(52), status: PositionStatus::OnTrack },
                PositionSample { time: t(70), status: PositionStatus::OnTrack },
            ],
        );
        telemetry.insert_car_samples(
            "31",
            [
                CarSample { time: t(49), speed: 20.0 },
                CarSample { time: t(50), speed: 30.0 },
                CarSample { time: t(51), speed: 40.0 },
                CarSample { time: t(70), speed: 250.0 },
            ],
        );
        telemetry
    }

    #[test]
    fn any_off_track_fix_wins() {
        let telemetry = telemetry();
        let lap = Lap::new("31", 4, t(0), t(90));

        assert_eq!(track_state(&telemetry, &lap, t(51), t(2)), TrackPresence::OffTrack);
        assert_eq!(track_state(&telemetry, &lap, t(70), t(2)), TrackPresence::OnTrack);
        assert_eq!(track_state(&telemetry, &lap, t(30), t(2)), TrackPresence::NoData);
    }

    #[test]
    fn window_is_clipped_to_the_lap() {
        let telemetry = telemetry();
        let lap = Lap::new("31", 5, t(51), t(90));
        assert_eq!(track_state(&telemetry, &lap, t(50), t(2)), TrackPresence::OnTrack);
    }

    #[test]
    fn threshold_is_inclusive() {
        let telemetry = telemetry();
        let lap = Lap::new("31", 4, t(0), t(90));

        // mean of 20, 30, 40
        assert!(is_maybe_off_track(&telemetry, &lap, t(50), t(2), 30.0));
        assert!(!is_maybe_off_track(&telemetry, &lap, t(50), t(2), 29.9));
        assert!(!is_maybe_off_track(&telemetry, &lap, t(70), t(2), 30.0));
    }

    #[test]
    fn missing_speed_data_is_not_flagged() {
        let telemetry = InMemoryTelemetry::new();
        let lap = Lap::new("31", 4, t(0), t(90));
        assert!(!is_maybe_off_track(&telemetry, &lap, t(50), t(2), 30.0));
    }
}
