//! Background workers.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use crate::use_cases::hacks::ResolveDueHacks;

/// Resolves due hacks on every tick until `shutdown` flips to `true`.
///
/// A failed pass is logged and retried on the next tick.
pub async fn hack_resolution_worker(
    resolve_due: Arc<ResolveDueHacks>,
    poll_interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    tracing::info!(interval_ms = poll_interval.as_millis() as u64, "Starting hack resolution worker");
    let mut ticker = tokio::time::interval(poll_interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(e) = resolve_due.execute().await {
                    tracing::warn!(error = %e, "Hack resolution pass failed");
                }
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }

    tracing::info!("Hack resolution worker stopped");
}
