//! Provider trait for per-lap telemetry

use crate::types::{Lap, PositionStatus, TimeWindow};

/// Trait for positional and speed telemetry sources
///
/// Providers abstract over where car telemetry lives (an in-memory snapshot,
/// a cache of upstream responses, a database). Only the off-track detector
/// consults them, always for the opponent's lap around an overtake.
///
/// Implementations must be shareable across threads: a whole-field run may
/// classify several drivers at once against the same source.
pub trait TelemetrySource: Send + Sync {
    /// Positional fix statuses of `lap`'s driver recorded during `lap` and
    /// inside `window`.
    ///
    /// An empty result means no positional data is available.
    fn position_status_within(&self, lap: &Lap, window: TimeWindow) -> Vec<PositionStatus>;

    /// Speeds (km/h) of `lap`'s driver recorded during `lap` and inside `window`.
    fn speed_within(&self, lap: &Lap, window: TimeWindow) -> Vec<f64>;

    /// Mean speed over the window, `None` when there are no speed samples.
    fn mean_speed_within(&self, lap: &Lap, window: TimeWindow) -> Option<f64> {
        let speeds = self.speed_within(lap, window);
        if speeds.is_empty() {
            return None;
        }
        Some(speeds.iter().sum::<f64>() / speeds.len() as f64)
    }
}
