//! Concurrent whole-field extraction
//!
//! Classification is CPU-bound and synchronous, so each driver runs on
//! tokio's blocking pool against a shared, read-only [`Session`]. Results are
//! merged in the order the drivers were given, which makes the output
//! identical to [`OvertakeEngine::extract_all_overtakes`].

use futures::future::join_all;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::OvertakeConfig;
use crate::engine::{FieldOvertakes, OvertakeEngine};
use crate::session::Session;
use crate::types::DriverNumber;
use crate::OvertakeError;

/// Extract overtakes for `drivers` concurrently, one blocking task per driver.
///
/// Cancelling `cancel` stops drivers that have not started yet; they are
/// reported in `failures` as [`OvertakeError::Cancelled`]. Drivers already
/// running finish normally.
///
/// ```rust
/// use std::sync::Arc;
/// use pitwall_overtakes::{OvertakeConfig, Session};
/// use pitwall_overtakes::parallel::extract_all_overtakes_concurrent;
/// use tokio_util::sync::CancellationToken;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let session = Arc::new(Session::default());
/// let drivers = session.timing().drivers().to_vec();
/// let field = extract_all_overtakes_concurrent(
///     session,
///     Arc::new(OvertakeConfig::default()),
///     drivers,
///     CancellationToken::new(),
/// )
/// .await;
/// assert!(field.records.is_empty());
/// # }
/// ```
pub async fn extract_all_overtakes_concurrent(
    session: Arc<Session>,
    config: Arc<OvertakeConfig>,
    drivers: Vec<DriverNumber>,
    cancel: CancellationToken,
) -> FieldOvertakes {
    let tasks = drivers.into_iter().map(|driver| {
        let session = Arc::clone(&session);
        let config = Arc::clone(&config);
        let cancel = cancel.clone();
        let worker_driver = driver.clone();

        async move {
            let joined = tokio::task::spawn_blocking(move || {
                if cancel.is_cancelled() {
                    return Err(OvertakeError::Cancelled { driver: worker_driver });
                }
                // the resolver index borrows the session, so each worker builds its own
                OvertakeEngine::new(session.view(), &config).extract_overtakes(&worker_driver)
            })
            .await;

            let result = joined.unwrap_or_else(|e| {
                Err(OvertakeError::Worker { driver: driver.clone(), details: e.to_string() })
            });
            (driver, result)
        }
    });

    let mut field = FieldOvertakes::default();
    for (driver, result) in join_all(tasks).await {
        match result {
            Ok(records) => field.records.extend(records),
            Err(e @ OvertakeError::Cancelled { .. }) => {
                debug!(driver = %driver, "Driver skipped after cancellation");
                field.failures.push((driver, e));
            }
            Err(e) => {
                warn!(driver = %driver, "Skipping driver: {}", e);
                field.failures.push((driver, e));
            }
        }
    }

    info!(
        records = field.records.len(),
        failed_drivers = field.failures.len(),
        "Concurrent field overtake extraction complete"
    );

    field
}
