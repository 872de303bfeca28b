//! Session clock types

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, Sub};

/// Elapsed time since the start of a session.
///
/// Stored as whole milliseconds so window arithmetic is exact and ordering is
/// total. Values may be negative after subtracting a tolerance from an early
/// instant. Serialized as floating-point seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionTime(i64);

impl SessionTime {
    pub const ZERO: SessionTime = SessionTime(0);

    pub const fn from_millis(millis: i64) -> Self {
        SessionTime(millis)
    }

    pub const fn from_secs(secs: i64) -> Self {
        SessionTime(secs * 1000)
    }

    /// Convert fractional seconds, rounding to the nearest millisecond.
    pub fn from_secs_f64(secs: f64) -> Self {
        SessionTime((secs * 1000.0).round() as i64)
    }

    pub const fn as_millis(self) -> i64 {
        self.0
    }

    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / 1000.0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }
}

impl Add for SessionTime {
    type Output = SessionTime;

    fn add(self, rhs: SessionTime) -> SessionTime {
        SessionTime(self.0.saturating_add(rhs.0))
    }
}

impl Sub for SessionTime {
    type Output = SessionTime;

    fn sub(self, rhs: SessionTime) -> SessionTime {
        SessionTime(self.0.saturating_sub(rhs.0))
    }
}

impl fmt::Display for SessionTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:03}s", sign, abs / 1000, abs % 1000)
    }
}

impl Serialize for SessionTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_secs_f64())
    }
}

impl<'de> Deserialize<'de> for SessionTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        if !secs.is_finite() {
            return Err(serde::de::Error::custom("session time must be a finite number of seconds"));
        }
        Ok(SessionTime::from_secs_f64(secs))
    }
}

/// Inclusive time interval `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: SessionTime,
    pub end: SessionTime,
}

impl TimeWindow {
    pub fn new(start: SessionTime, end: SessionTime) -> Self {
        Self { start, end }
    }

    /// Symmetric window `[time - tolerance, time + tolerance]`.
    pub fn around(time: SessionTime, tolerance: SessionTime) -> Self {
        Self { start: time - tolerance, end: time + tolerance }
    }

    pub fn contains(&self, time: SessionTime) -> bool {
        self.start <= time && time <= self.end
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_seconds_and_millis() {
        assert_eq!(SessionTime::from_millis(62_045).to_string(), "62.045s");
        assert_eq!(SessionTime::from_millis(-1_500).to_string(), "-1.500s");
    }

    #[test]
    fn fractional_seconds_round_to_millis() {
        assert_eq!(SessionTime::from_secs_f64(1.2345).as_millis(), 1235);
        assert_eq!(SessionTime::from_secs_f64(20.0), SessionTime::from_secs(20));
    }

    #[test]
    fn window_is_inclusive() {
        let window = TimeWindow::around(SessionTime::from_secs(10), SessionTime::from_secs(2));
        assert!(window.contains(SessionTime::from_secs(8)));
        assert!(window.contains(SessionTime::from_secs(12)));
        assert!(!window.contains(SessionTime::from_millis(12_001)));
    }

    #[test]
    fn serde_uses_seconds() {
        let time: SessionTime = serde_yaml_ng::from_str("18.5").unwrap();
        assert_eq!(time.as_millis(), 18_500);
        let yaml = serde_yaml_ng::to_string(&time).unwrap();
        assert_eq!(yaml.trim(), "18.5");
    }
}
