//! Track status timeline

use crate::types::{SessionTime, TimeWindow, TrackStatus, TrackStatusEvent};

/// Ordered flag-regime changes for one session.
#[derive(Debug, Clone, Default)]
pub struct TrackStatusTimeline {
    events: Vec<TrackStatusEvent>,
}

impl TrackStatusTimeline {
    pub fn new(mut events: Vec<TrackStatusEvent>) -> Self {
        events.sort_by_key(|event| event.time);
        Self { events }
    }

    pub fn events(&self) -> &[TrackStatusEvent] {
        &self.events
    }

    /// Regime in effect at `time`. Before the first event the track is clear.
    pub fn status_at(&self, time: SessionTime) -> TrackStatus {
        let end = self.events.partition_point(|event| event.time <= time);
        self.events[..end].last().map(|event| event.status).unwrap_or(TrackStatus::AllClear)
    }

    /// Whether any non-clear regime was in effect at some instant of `window`.
    pub fn neutralised_within(&self, window: TimeWindow) -> bool {
        if !self.status_at(window.start).is_clear() {
            return true;
        }
        let lo = self.events.partition_point(|event| event.time <= window.start);
        let hi = self.events.partition_point(|event| event.time <= window.end);
        self.events[lo..hi.max(lo)].iter().any(|event| !event.status.is_clear())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(secs: i64) -> SessionTime {
        SessionTime::from_secs(secs)
    }

    fn timeline() -> TrackStatusTimeline {
        TrackStatusTimeline::new(vec![
            TrackStatusEvent::new(t(100), TrackStatus::Yellow),
            TrackStatusEvent::new(t(0), TrackStatus::AllClear),
            TrackStatusEvent::new(t(110), TrackStatus::AllClear),
        ])
    }

    #[test]
    fn status_at_uses_latest_event() {
        let timeline = timeline();
        assert_eq!(timeline.status_at(t(50)), TrackStatus::AllClear);
        assert_eq!(timeline.status_at(t(100)), TrackStatus::Yellow);
        assert_eq!(timeline.status_at(t(109)), TrackStatus::Yellow);
        assert_eq!(timeline.status_at(t(110)), TrackStatus::AllClear);
    }

    #[test]
    fn regime_carried_into_window_counts() {
        let timeline = timeline();
        // yellow ended at 110, window starts before that
        assert!(timeline.neutralised_within(TimeWindow::new(t(108), t(111))));
        assert!(!timeline.neutralised_within(TimeWindow::new(t(111), t(114))));
    }

    #[test]
    fn regime_starting_inside_window_counts() {
        let timeline = timeline();
        assert!(timeline.neutralised_within(TimeWindow::new(t(97), t(100))));
        assert!(!timeline.neutralised_within(TimeWindow::new(t(96), t(99))));
    }

    #[test]
    fn empty_timeline_is_clear() {
        let timeline = TrackStatusTimeline::default();
        assert!(!timeline.neutralised_within(TimeWindow::new(t(0), t(1000))));
    }
}
