//! Derived position changes

use serde::{Deserialize, Serialize};

use super::{DriverNumber, SessionTime};

/// A transition in one driver's running position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionChange {
    pub time: SessionTime,
    pub driver_number: DriverNumber,
    pub lap_number: Option<u32>,
    /// Position after the change.
    pub position: u32,
    pub position_before: u32,
    pub driver_ahead: Option<DriverNumber>,
    pub driver_behind: Option<DriverNumber>,
    /// `position_before - position` for gains, zero for losses.
    pub positions_gained: u32,
}

impl PositionChange {
    pub fn is_gain(&self) -> bool {
        self.positions_gained > 0
    }

    /// Positions passed through by a gain, in the order the cars were passed.
    ///
    /// A jump from P7 to P4 yields levels 6, 5, 4: the car that held level
    /// `L` is found at `L + 1` once the change has happened.
    pub fn gained_levels(&self) -> impl Iterator<Item = u32> + use<> {
        let (low, high) = if self.is_gain() {
            (self.position, self.position_before)
        } else {
            (self.position, self.position)
        };
        (low..high).rev()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(before: u32, after: u32) -> PositionChange {
        PositionChange {
            time: SessionTime::from_secs(20),
            driver_number: "4".into(),
            lap_number: Some(3),
            position: after,
            position_before: before,
            driver_ahead: None,
            driver_behind: None,
            positions_gained: before.saturating_sub(after),
        }
    }

    #[test]
    fn multi_position_gain_yields_each_level() {
        let levels: Vec<u32> = change(7, 4).gained_levels().collect();
        assert_eq!(levels, vec![6, 5, 4]);
    }

    #[test]
    fn loss_yields_no_levels() {
        assert_eq!(change(3, 5).gained_levels().count(), 0);
        assert!(!change(3, 5).is_gain());
    }
}
