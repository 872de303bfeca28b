//! Pit window detection and pit stop extraction

use crate::session::sample_at;
use crate::types::{Lap, PitStop, SessionTime, TimeWindow, TimingSample};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PitEvent {
    In(SessionTime),
    Out(SessionTime),
}

impl PitEvent {
    fn time(self) -> SessionTime {
        match self {
            PitEvent::In(time) | PitEvent::Out(time) => time,
        }
    }
}

/// Pit events of one lap in time order (a lap usually starts with its
/// pit-out and ends with its pit-in).
fn lap_events(lap: &Lap) -> impl Iterator<Item = PitEvent> + use<> {
    let mut events: Vec<PitEvent> = lap
        .pit_in_time
        .map(PitEvent::In)
        .into_iter()
        .chain(lap.pit_out_time.map(PitEvent::Out))
        .collect();
    events.sort_by_key(|event| event.time());
    events.into_iter()
}

/// Whether `time` falls inside a pit window of `laps`.
///
/// With a non-zero `lap_hint` only laps within one of it are searched. A
/// window is open around each pit-in and pit-out instant (widened by the
/// respective tolerance) and between a pit-in and the next pit-out.
pub fn in_pit_window(
    time: SessionTime,
    laps: &[Lap],
    lap_hint: u32,
    pit_in_tolerance: SessionTime,
    pit_out_tolerance: SessionTime,
) -> bool {
    let candidates = laps.iter().filter(|lap| lap_hint == 0 || lap.lap_number.abs_diff(lap_hint) <= 1);

    let mut open_since: Option<SessionTime> = None;
    for event in candidates.flat_map(lap_events) {
        match event {
            PitEvent::In(pit_in) => {
                if TimeWindow::around(pit_in, pit_in_tolerance).contains(time) {
                    return true;
                }
                open_since = Some(pit_in - pit_in_tolerance);
            }
            PitEvent::Out(pit_out) => {
                if TimeWindow::around(pit_out, pit_out_tolerance).contains(time) {
                    return true;
                }
                if let Some(opened) = open_since.take() {
                    if TimeWindow::new(opened, pit_out + pit_out_tolerance).contains(time) {
                        return true;
                    }
                }
            }
        }
    }
    false
}

/// Whether the sample in effect at `time` reports the car in the pit lane.
pub fn in_pit_by_status(samples: &[TimingSample], time: SessionTime) -> bool {
    sample_at(samples, time).is_some_and(|sample| sample.pit_status.is_in_pit())
}

/// Completed stops in `laps`: each pit-in paired with the next pit-out.
///
/// A pit-in with no following pit-out (retirement in the pits) is not a stop.
pub fn pit_stops(laps: &[Lap]) -> Vec<PitStop> {
    let mut stops = Vec::new();
    let mut pending: Option<(&Lap, SessionTime)> = None;

    for lap in laps {
        for event in lap_events(lap) {
            match event {
                PitEvent::In(pit_in) => pending = Some((lap, pit_in)),
                PitEvent::Out(pit_out) => {
                    if let Some((in_lap, pit_in)) = pending.take() {
                        stops.push(PitStop {
                            driver_number: in_lap.driver_number.clone(),
                            lap_number: in_lap.lap_number,
                            pit_in_time: pit_in,
                            pit_out_time: pit_out,
                            duration: pit_out - pit_in,
                        });
                    }
                }
            }
        }
    }

    stops
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PitStatus;

    fn t(secs: i64) -> SessionTime {
        SessionTime::from_secs(secs)
    }

    fn laps() -> Vec<Lap> {
        vec![
            Lap::new("20", 1, t(0), t(10)),
            Lap::new("20", 2, t(10), t(19)).with_pit_in(t(18)),
            Lap::new("20", 3, t(19), t(40)).with_pit_out(t(25)),
            Lap::new("20", 4, t(40), t(60)),
        ]
    }

    #[test]
    fn between_pit_in_and_pit_out_is_in_window() {
        let laps = laps();
        assert!(in_pit_window(t(20), &laps, 0, t(2), t(2)));
        assert!(in_pit_window(t(20), &laps, 0, SessionTime::ZERO, SessionTime::ZERO));
    }

    #[test]
    fn tolerance_widens_the_window() {
        let laps = laps();
        assert!(!in_pit_window(t(17), &laps, 0, SessionTime::ZERO, SessionTime::ZERO));
        assert!(in_pit_window(t(17), &laps, 0, t(2), t(2)));
        assert!(in_pit_window(t(27), &laps, 0, t(2), t(2)));
        assert!(!in_pit_window(SessionTime::from_millis(27_001), &laps, 0, t(2), t(2)));
    }

    #[test]
    fn lap_hint_narrows_the_search() {
        let laps = laps();
        assert!(in_pit_window(t(20), &laps, 3, t(2), t(2)));
        // hint far from the stop: neither event is considered
        assert!(!in_pit_window(t(20), &laps, 10, t(2), t(2)));
    }

    #[test]
    fn no_pit_events_means_no_window() {
        let laps = vec![Lap::new("1", 1, t(0), t(90)), Lap::new("1", 2, t(90), t(180))];
        assert!(!in_pit_window(t(90), &laps, 0, t(10), t(10)));
    }

    #[test]
    fn status_in_effect_is_used() {
        let samples = vec![
            TimingSample::new(t(0), "20", 8, None),
            TimingSample::new(t(18), "20", 8, None).with_pit_status(PitStatus::PitIn),
            TimingSample::new(t(25), "20", 12, None).with_pit_status(PitStatus::PitOut),
            TimingSample::new(t(30), "20", 12, None),
        ];
        assert!(!in_pit_by_status(&samples, t(10)));
        assert!(in_pit_by_status(&samples, t(20)));
        assert!(in_pit_by_status(&samples, t(26)));
        assert!(!in_pit_by_status(&samples, t(31)));
    }

    #[test]
    fn stops_pair_pit_in_with_next_pit_out() {
        let mut laps = laps();
        laps.push(Lap::new("20", 5, t(60), t(80)).with_pit_in(t(79)));

        let stops = pit_stops(&laps);
        assert_eq!(stops.len(), 1);
        assert_eq!(stops[0].lap_number, 2);
        assert_eq!(stops[0].duration, t(7));
    }
}
