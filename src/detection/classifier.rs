//! Overtake classification pipeline
//!
//! Each gained level of a [`PositionChange`] becomes one [`OvertakeRecord`].
//! The opponent is resolved first, then the configured rules run in order
//! and the first one that fires decides the status. A candidate no rule
//! rejects is `OK`.
//!
//! Lap lookups are done lazily and at most once per candidate, so a rule
//! order that rejects early never touches the lap index for the opponent.

use tracing::debug;

use super::off_track::{TrackPresence, is_maybe_off_track, track_state};
use super::opponent::OpponentResolver;
use super::pit::{in_pit_by_status, in_pit_window};
use crate::config::{OvertakeConfig, Rule};
use crate::session::{SessionView, position_at, samples_after, samples_before};
use crate::types::{
    DriverNumber, Lap, OvertakeRecord, OvertakeStatus, PositionChange, SessionTime, TimeWindow,
};
use crate::Result;

/// One gained level under classification, with its lazily looked-up laps.
struct Candidate<'a, 'c> {
    change: &'c PositionChange,
    level: u32,
    opponent: Option<&'a DriverNumber>,
    own_lap: Option<Option<&'a Lap>>,
    opponent_lap: Option<Option<&'a Lap>>,
}

impl Candidate<'_, '_> {
    fn time(&self) -> SessionTime {
        self.change.time
    }
}

/// Applies the configured rule order to position gains.
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'a> {
    view: SessionView<'a>,
    config: &'a OvertakeConfig,
    resolver: &'a OpponentResolver<'a>,
}

impl<'a> Classifier<'a> {
    pub fn new(
        view: SessionView<'a>,
        config: &'a OvertakeConfig,
        resolver: &'a OpponentResolver<'a>,
    ) -> Self {
        Self { view, config, resolver }
    }

    /// Classify every gained level of `change`, in the order the cars were
    /// passed. Losses yield nothing.
    pub fn classify_change(&self, change: &PositionChange) -> Result<Vec<OvertakeRecord>> {
        change.gained_levels().map(|level| self.classify_level(change, level)).collect()
    }

    /// Classify the pass of the car that held `level` before `change`.
    pub fn classify_level(&self, change: &PositionChange, level: u32) -> Result<OvertakeRecord> {
        let excluding = [&change.driver_number];
        let opponent = self.resolver.opponent_at(change.time, level + 1, &excluding);

        let mut candidate =
            Candidate { change, level, opponent, own_lap: None, opponent_lap: None };

        let mut status = OvertakeStatus::Ok;
        for &rule in &self.config.rule_order {
            if let Some(rejected) = self.apply(rule, &mut candidate)? {
                debug_assert!(rule.statuses().contains(&rejected), "{rule:?} assigned {rejected}");
                status = rejected;
                break;
            }
        }

        debug!(
            driver = %change.driver_number,
            time = %change.time,
            position = level,
            opponent = opponent.map(DriverNumber::as_str).unwrap_or("unknown"),
            status = %status,
            "Classified overtake candidate"
        );

        Ok(OvertakeRecord {
            time: change.time,
            lap_number: change.lap_number,
            position: level,
            overtaking_driver: change.driver_number.clone(),
            opponent_driver: opponent.cloned(),
            status,
        })
    }

    /// Run one rule; `Some` is the status it assigns.
    fn apply(&self, rule: Rule, c: &mut Candidate<'a, '_>) -> Result<Option<OvertakeStatus>> {
        let config = self.config;
        let time = c.time();

        let verdict = match rule {
            Rule::NoLap => self.own_lap(c)?.is_none().then_some(OvertakeStatus::NoLap),
            Rule::FirstLap => self
                .own_lap(c)?
                .is_some_and(|lap| lap.lap_number == 1)
                .then_some(OvertakeStatus::FirstLap),
            Rule::NoLapOther => self.opponent_lap(c)?.is_none().then_some(OvertakeStatus::NoLapOther),
            Rule::FirstLapOther => self
                .opponent_lap(c)?
                .is_some_and(|lap| lap.lap_number == 1)
                .then_some(OvertakeStatus::FirstLapOther),
            Rule::TrackStatus => {
                let window = TimeWindow::new(time - config.track_status_tolerance, time);
                self.view
                    .track_status
                    .neutralised_within(window)
                    .then_some(OvertakeStatus::TrackStatus)
            }
            Rule::Pit => self.opponent_pitting(c)?.then_some(OvertakeStatus::Pit),
            Rule::LostTooQuick => {
                let own = self.view.timing.pick_driver(&c.change.driver_number);
                samples_after(own, time, time + config.dwell_tolerance)
                    .iter()
                    .any(|s| s.position.is_some_and(|p| p > c.level))
                    .then_some(OvertakeStatus::LostTooQuick)
            }
            Rule::NoBattle => (!self.opponent_battled(c)).then_some(OvertakeStatus::NoBattle),
            Rule::OffTrack => match self.opponent_lap(c)? {
                None => Some(OvertakeStatus::NoPositionData),
                Some(lap) => {
                    match track_state(self.view.telemetry, lap, time, config.off_track_tolerance) {
                        TrackPresence::NoData => Some(OvertakeStatus::NoPositionData),
                        TrackPresence::OffTrack => Some(OvertakeStatus::OffTrack),
                        TrackPresence::OnTrack => None,
                    }
                }
            },
            Rule::MaybeOffTrack => self
                .opponent_lap(c)?
                .is_some_and(|lap| {
                    is_maybe_off_track(
                        self.view.telemetry,
                        lap,
                        time,
                        config.off_track_tolerance,
                        config.min_mean_speed_kmh,
                    )
                })
                .then_some(OvertakeStatus::MaybeOffTrack),
        };

        Ok(verdict)
    }

    fn own_lap(&self, c: &mut Candidate<'a, '_>) -> Result<Option<&'a Lap>> {
        if let Some(lap) = c.own_lap {
            return Ok(lap);
        }
        let laps = self.view.laps;
        let lap = laps.lap_at_time(&c.change.driver_number, c.time())?;
        c.own_lap = Some(lap);
        Ok(lap)
    }

    /// The opponent's lap at the pass; `None` also when the opponent is unknown.
    fn opponent_lap(&self, c: &mut Candidate<'a, '_>) -> Result<Option<&'a Lap>> {
        if let Some(lap) = c.opponent_lap {
            return Ok(lap);
        }
        let laps = self.view.laps;
        let lap = match c.opponent {
            Some(opponent) => laps.lap_at_time(opponent, c.time())?,
            None => None,
        };
        c.opponent_lap = Some(lap);
        Ok(lap)
    }

    fn opponent_pitting(&self, c: &mut Candidate<'a, '_>) -> Result<bool> {
        let Some(opponent) = c.opponent else {
            return Ok(false);
        };
        let time = c.time();
        let tolerance = self.config.pit_tolerance;
        let hint = self.opponent_lap(c)?.map_or(0, |lap| lap.lap_number);

        let laps = self.view.laps.pick_driver(opponent);
        if in_pit_window(time, laps, hint, tolerance, tolerance) {
            return Ok(true);
        }
        Ok(self.config.sample_pit_status
            && in_pit_by_status(self.view.timing.pick_driver(opponent), time))
    }

    /// Whether the opponent held the contested level shortly before the pass.
    fn opponent_battled(&self, c: &Candidate<'a, '_>) -> bool {
        let Some(opponent) = c.opponent else {
            return false;
        };
        let time = c.time();
        let start = time - self.config.battle_tolerance;
        let samples = self.view.timing.pick_driver(opponent);

        position_at(samples, start) == Some(c.level)
            || samples_before(samples, start, time).iter().any(|s| s.position == Some(c.level))
    }
}
