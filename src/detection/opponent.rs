//! Resolves which driver held a position at an instant

use std::collections::BTreeMap;

use crate::session::TimingStream;
use crate::types::{DriverNumber, SessionTime};

#[derive(Debug, Clone, Copy)]
struct Holder<'a> {
    time: SessionTime,
    driver: &'a DriverNumber,
}

/// Position → time-ordered holders index over a whole timing stream.
///
/// Built once per stream; each lookup is a binary search.
#[derive(Debug, Clone)]
pub struct OpponentResolver<'a> {
    by_position: BTreeMap<u32, Vec<Holder<'a>>>,
}

impl<'a> OpponentResolver<'a> {
    pub fn new(stream: &'a TimingStream) -> Self {
        let mut by_position: BTreeMap<u32, Vec<Holder<'a>>> = BTreeMap::new();

        for sample in stream.samples() {
            if let Some(position) = sample.position {
                by_position
                    .entry(position)
                    .or_default()
                    .push(Holder { time: sample.time, driver: &sample.driver_number });
            }
        }

        // stable: equal times keep ingestion order, so the last one wins a tie
        for holders in by_position.values_mut() {
            holders.sort_by_key(|holder| holder.time);
        }

        Self { by_position }
    }

    /// Driver of the most recent sample at or before `time` reporting
    /// `position`, skipping any driver in `excluding`.
    ///
    /// `None` means the opponent is unknown.
    pub fn opponent_at(
        &self,
        time: SessionTime,
        position: u32,
        excluding: &[&DriverNumber],
    ) -> Option<&'a DriverNumber> {
        let holders = self.by_position.get(&position)?;
        let end = holders.partition_point(|holder| holder.time <= time);
        holders[..end]
            .iter()
            .rev()
            .find(|holder| !excluding.contains(&holder.driver))
            .map(|holder| holder.driver)
    }
}
