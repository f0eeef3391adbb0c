//! Periodic traffic logging for session analysis.
//!
//! Emits one DEBUG line for own-ship and one per tracked intruder with
//! range and relative altitude. Runs until cancelled.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::context::TrafficContext;
use super::ownship::OwnshipState;
use super::registry::TrackedPosition;

/// Default logging interval (10 seconds).
pub const DEFAULT_LOG_INTERVAL: Duration = Duration::from_secs(10);

/// Spawns a background task that periodically logs tracked traffic.
///
/// The task stops when `cancellation` is triggered or the context is shut
/// down, whichever comes first. Only worth spawning when DEBUG is enabled:
///
/// ```ignore
/// if tracing::enabled!(tracing::Level::DEBUG) {
///     spawn_traffic_logger(context.clone(), cancel.clone(), DEFAULT_LOG_INTERVAL);
/// }
/// ```
pub fn spawn_traffic_logger(
    context: Arc<TrafficContext>,
    cancellation: CancellationToken,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let Some((time, own, others)) = context.try_snapshot_all() else {
                        tracing::debug!("Traffic context inactive, logger exiting");
                        break;
                    };
                    log_traffic(time, &own, &others);
                }
                _ = cancellation.cancelled() => {
                    tracing::debug!("Traffic logger stopped");
                    break;
                }
            }
        }
    })
}

/// Logs own-ship and every tracked intruder at DEBUG level.
///
/// Returns the number of intruders logged.
fn log_traffic(time: f64, own: &OwnshipState, others: &[TrackedPosition]) -> usize {
    tracing::debug!(
        time = format!("{:.1}", time),
        lat = format!("{:.5}", own.position.lat),
        lon = format!("{:.5}", own.position.lon),
        alt = format!("{:.0}", own.position.elev),
        agl = format!("{:.0}", own.agl),
        traffic = others.len(),
        "Own-ship"
    );

    for intruder in others {
        tracing::debug!(
            id = %intruder.entity_id,
            range_nm = format!("{:.2}", own.position.distance_nm(&intruder.position)),
            rel_alt = format!("{:+.0}", intruder.position.elev - own.position.elev),
            "Intruder"
        );
    }
    others.len()
}
