//! Driver identity

use serde::{Deserialize, Serialize};
use std::fmt;

/// Racing number identifying a driver within a session (e.g. `"44"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DriverNumber(String);

impl DriverNumber {
    pub fn new(number: impl Into<String>) -> Self {
        DriverNumber(number.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DriverNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DriverNumber {
    fn from(number: &str) -> Self {
        DriverNumber(number.to_string())
    }
}

impl From<String> for DriverNumber {
    fn from(number: String) -> Self {
        DriverNumber(number)
    }
}

impl From<&DriverNumber> for DriverNumber {
    fn from(number: &DriverNumber) -> Self {
        number.clone()
    }
}

impl PartialEq<str> for DriverNumber {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for DriverNumber {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
