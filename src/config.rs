//! Engine tuning: tolerances and disqualification rule order
//!
//! The numeric defaults were chosen empirically against real race data and
//! are expected to need recalibration, so every one of them is exposed here
//! and can be loaded from YAML:
//!
//! ```rust
//! use pitwall_overtakes::{OvertakeConfig, Rule, SessionTime};
//!
//! let config = OvertakeConfig::from_yaml_str(
//!     "dwell_tolerance: 3.0\nrule_order: [NO_LAP, FIRST_LAP, PIT, LOST_TOO_QUICK]",
//! )?;
//! assert_eq!(config.dwell_tolerance, SessionTime::from_secs(3));
//! assert_eq!(config.rule_order.len(), 4);
//! assert!(!config.is_enabled(Rule::NoBattle));
//! # Ok::<(), pitwall_overtakes::OvertakeError>(())
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::types::{OvertakeStatus, SessionTime};
use crate::{OvertakeError, Result};

/// A disqualification rule of the classification pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rule {
    NoLap,
    FirstLap,
    NoLapOther,
    FirstLapOther,
    TrackStatus,
    Pit,
    LostTooQuick,
    NoBattle,
    /// Yields `NO_POSITION_DATA` or `OFF_TRACK`.
    OffTrack,
    MaybeOffTrack,
}

impl Rule {
    /// Default pipeline: lap checks, then whole-track context, then
    /// opponent-specific checks, with telemetry slicing last.
    pub const DEFAULT_ORDER: [Rule; 10] = [
        Rule::NoLap,
        Rule::FirstLap,
        Rule::NoLapOther,
        Rule::FirstLapOther,
        Rule::TrackStatus,
        Rule::Pit,
        Rule::LostTooQuick,
        Rule::NoBattle,
        Rule::OffTrack,
        Rule::MaybeOffTrack,
    ];

    /// Statuses this rule can assign.
    pub fn statuses(self) -> &'static [OvertakeStatus] {
        match self {
            Rule::NoLap => &[OvertakeStatus::NoLap],
            Rule::FirstLap => &[OvertakeStatus::FirstLap],
            Rule::NoLapOther => &[OvertakeStatus::NoLapOther],
            Rule::FirstLapOther => &[OvertakeStatus::FirstLapOther],
            Rule::TrackStatus => &[OvertakeStatus::TrackStatus],
            Rule::Pit => &[OvertakeStatus::Pit],
            Rule::LostTooQuick => &[OvertakeStatus::LostTooQuick],
            Rule::NoBattle => &[OvertakeStatus::NoBattle],
            Rule::OffTrack => &[OvertakeStatus::NoPositionData, OvertakeStatus::OffTrack],
            Rule::MaybeOffTrack => &[OvertakeStatus::MaybeOffTrack],
        }
    }
}

/// Tolerances and rule ordering for the overtake classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OvertakeConfig {
    /// Look-back before a pass in which any non-green regime disqualifies it.
    pub track_status_tolerance: SessionTime,
    /// Widening applied on both sides of the opponent's pit-in and pit-out.
    pub pit_tolerance: SessionTime,
    /// How long a gained position must be held.
    pub dwell_tolerance: SessionTime,
    /// Look-back in which the opponent must have held the contested position.
    pub battle_tolerance: SessionTime,
    /// Half-width of the telemetry window around the pass.
    pub off_track_tolerance: SessionTime,
    /// Opponent mean speed (km/h) at or below which the pass is suspect.
    pub min_mean_speed_kmh: f64,
    /// Also treat the opponent as pitted when its timing sample says so.
    pub sample_pit_status: bool,
    /// Rules to run, in order. Omitted rules are disabled.
    pub rule_order: Vec<Rule>,
}

impl Default for OvertakeConfig {
    fn default() -> Self {
        Self {
            track_status_tolerance: SessionTime::from_secs(3),
            pit_tolerance: SessionTime::from_secs(2),
            dwell_tolerance: SessionTime::from_secs(10),
            battle_tolerance: SessionTime::from_secs(5),
            off_track_tolerance: SessionTime::from_secs(2),
            min_mean_speed_kmh: 30.0,
            sample_pit_status: true,
            rule_order: Rule::DEFAULT_ORDER.to_vec(),
        }
    }
}

impl OvertakeConfig {
    /// Parse and validate a YAML configuration. Missing keys take defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: OvertakeConfig = serde_yaml_ng::from_str(yaml)
            .map_err(|e| OvertakeError::parse("overtake configuration", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML configuration file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let yaml = std::fs::read_to_string(&path)
            .map_err(|e| OvertakeError::file_error(path.as_ref().to_path_buf(), e))?;
        Self::from_yaml_str(&yaml)
    }

    pub fn validate(&self) -> Result<()> {
        let tolerances = [
            ("track_status_tolerance", self.track_status_tolerance),
            ("pit_tolerance", self.pit_tolerance),
            ("dwell_tolerance", self.dwell_tolerance),
            ("battle_tolerance", self.battle_tolerance),
            ("off_track_tolerance", self.off_track_tolerance),
        ];
        for (name, value) in tolerances {
            if value.is_negative() {
                return Err(OvertakeError::config(format!("{name} must not be negative, got {value}")));
            }
        }

        if !self.min_mean_speed_kmh.is_finite() || self.min_mean_speed_kmh < 0.0 {
            return Err(OvertakeError::config(format!(
                "min_mean_speed_kmh must be a non-negative number, got {}",
                self.min_mean_speed_kmh
            )));
        }

        for (i, rule) in self.rule_order.iter().enumerate() {
            if self.rule_order[..i].contains(rule) {
                return Err(OvertakeError::config(format!("rule {rule:?} listed more than once")));
            }
        }

        Ok(())
    }

    pub fn is_enabled(&self, rule: Rule) -> bool {
        self.rule_order.contains(&rule)
    }

    /// Builder-style override of the dwell tolerance.
    pub fn with_dwell_tolerance(mut self, tolerance: SessionTime) -> Self {
        self.dwell_tolerance = tolerance;
        self
    }

    /// Builder-style override of the rule order.
    pub fn with_rule_order(mut self, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.rule_order = rules.into_iter().collect();
        self
    }
}
