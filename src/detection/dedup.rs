//! Duplicate overtake resolution

use std::collections::BTreeSet;

use crate::types::{DriverNumber, OvertakeRecord, OvertakeStatus};

/// Mark repeated passes of the same opponent for the same position on the
/// same lap as [`OvertakeStatus::Duplicate`].
///
/// The last record of each `(lap, position, opponent)` group keeps its
/// status. Groups never span overtaking drivers, so a whole field can be
/// passed at once. Records without a lap number are never grouped. Applying
/// this twice changes nothing.
pub fn resolve_duplicates(records: &mut [OvertakeRecord]) {
    type Key = (DriverNumber, u32, u32, Option<DriverNumber>);
    let mut seen: BTreeSet<Key> = BTreeSet::new();

    for record in records.iter_mut().rev() {
        let Some(lap_number) = record.lap_number else {
            continue;
        };
        let key = (
            record.overtaking_driver.clone(),
            lap_number,
            record.position,
            record.opponent_driver.clone(),
        );
        if !seen.insert(key) {
            record.status = OvertakeStatus::Duplicate;
        }
    }
}
