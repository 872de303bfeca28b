//! Per-driver and whole-field overtake extraction

use tracing::{debug, info, warn};

use crate::config::OvertakeConfig;
use crate::detection::{Classifier, OpponentResolver, extract_position_changes, resolve_duplicates};
use crate::session::SessionView;
use crate::types::{DriverNumber, OvertakeRecord};
use crate::{OvertakeError, Result};

/// Result of a whole-field run.
///
/// A driver whose run fails with an input-shape error is reported in
/// `failures` and contributes no records; every other driver still runs.
#[derive(Debug, Default)]
pub struct FieldOvertakes {
    /// Records of all successful drivers, in driver order.
    pub records: Vec<OvertakeRecord>,
    pub failures: Vec<(DriverNumber, OvertakeError)>,
}

impl FieldOvertakes {
    /// Records that were credited as overtakes.
    pub fn credited(&self) -> impl Iterator<Item = &OvertakeRecord> {
        self.records.iter().filter(|record| record.is_ok())
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Overtake extraction over one session.
///
/// Building the engine indexes the timing stream once; every driver run
/// after that is read-only, so one engine can serve any number of calls.
///
/// ```rust
/// use pitwall_overtakes::{OvertakeConfig, OvertakeEngine, Session};
///
/// let session = Session::from_yaml_str(r#"
/// timing:
///   - { time: 0.0, driver_number: "44", position: 2, lap_number: 1 }
///   - { time: 0.0, driver_number: "63", position: 1, lap_number: 1 }
///   - { time: 20.0, driver_number: "44", position: 1, lap_number: 1 }
///   - { time: 20.0, driver_number: "63", position: 2, lap_number: 1 }
/// laps:
///   - { driver_number: "44", lap_number: 1, start_time: 0.0, end_time: 90.0 }
///   - { driver_number: "63", lap_number: 1, start_time: 0.0, end_time: 90.0 }
/// "#)?;
///
/// let config = OvertakeConfig::default();
/// let engine = OvertakeEngine::new(session.view(), &config);
/// let records = engine.extract_overtakes(&"44".into())?;
///
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].status.name(), "FIRST_LAP");
/// # Ok::<(), pitwall_overtakes::OvertakeError>(())
/// ```
#[derive(Debug)]
pub struct OvertakeEngine<'a> {
    view: SessionView<'a>,
    config: &'a OvertakeConfig,
    resolver: OpponentResolver<'a>,
}

impl<'a> OvertakeEngine<'a> {
    pub fn new(view: SessionView<'a>, config: &'a OvertakeConfig) -> Self {
        Self { view, config, resolver: OpponentResolver::new(view.timing) }
    }

    pub fn config(&self) -> &OvertakeConfig {
        self.config
    }

    /// Classified overtake candidates of one driver, in time order.
    ///
    /// A driver with no timing samples yields an empty result.
    ///
    /// # Errors
    ///
    /// [`OvertakeError::AmbiguousLap`] when a lap lookup for the driver or
    /// one of their opponents matches more than one lap.
    pub fn extract_overtakes(&self, driver: &DriverNumber) -> Result<Vec<OvertakeRecord>> {
        let samples = self.view.timing.pick_driver(driver);
        if samples.is_empty() {
            debug!(driver = %driver, "No timing samples for driver");
            return Ok(Vec::new());
        }

        let laps = self.view.laps.pick_driver(driver);
        let changes = extract_position_changes(samples, laps, &self.resolver)?;
        let classifier = Classifier::new(self.view, self.config, &self.resolver);

        let mut records = Vec::new();
        for change in changes.iter().filter(|change| change.is_gain()) {
            records.extend(classifier.classify_change(change)?);
        }
        resolve_duplicates(&mut records);

        debug!(
            driver = %driver,
            position_changes = changes.len(),
            candidates = records.len(),
            credited = records.iter().filter(|r| r.is_ok()).count(),
            "Extracted overtakes"
        );

        Ok(records)
    }

    /// Run [`extract_overtakes`](Self::extract_overtakes) for each driver and
    /// concatenate the results in iteration order.
    pub fn extract_all_overtakes<'d>(
        &self,
        drivers: impl IntoIterator<Item = &'d DriverNumber>,
    ) -> FieldOvertakes {
        let mut field = FieldOvertakes::default();

        for driver in drivers {
            match self.extract_overtakes(driver) {
                Ok(records) => field.records.extend(records),
                Err(e) => {
                    warn!(driver = %driver, "Skipping driver: {}", e);
                    field.failures.push((driver.clone(), e));
                }
            }
        }

        info!(
            records = field.records.len(),
            credited = field.credited().count(),
            failed_drivers = field.failures.len(),
            "Field overtake extraction complete"
        );

        field
    }

    /// Every driver in the timing stream, in order of first appearance.
    pub fn extract_field(&self) -> FieldOvertakes {
        self.extract_all_overtakes(self.view.timing.drivers())
    }
}

/// One-shot form of [`OvertakeEngine::extract_overtakes`].
pub fn extract_overtakes(
    view: SessionView<'_>,
    config: &OvertakeConfig,
    driver: &DriverNumber,
) -> Result<Vec<OvertakeRecord>> {
    OvertakeEngine::new(view, config).extract_overtakes(driver)
}
