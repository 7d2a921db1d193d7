//! Blocks the entry point until an exit trigger fires, then drives the
//! coordinated teardown pass.

use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::coordinator::run_all;
use crate::metrics;
use crate::outcome::ActionOutcome;
use crate::registry::ShutdownRegistry;
use crate::signals;

/// Block until SIGINT/SIGTERM arrives or `upstream` is cancelled (the hosting
/// program decided programmatically to exit), whichever fires first, then run
/// every registered action and return once the pass completes.
///
/// Call exactly once, from the entry point, after all subsystems have started
/// and registered their teardowns. Because each action is individually
/// time-boxed, this returns within the aggregate deadline no matter how many
/// actions hang.
pub async fn wait_for_exit(
    registry: &ShutdownRegistry,
    upstream: Option<CancellationToken>,
    per_action_timeout: Duration,
) -> Vec<ActionOutcome> {
    match upstream {
        Some(token) => {
            tokio::select! {
                _ = token.cancelled() => {
                    info!("upstream cancellation, exiting");
                    metrics::emit_shutdown_initiated("upstream");
                }
                _ = signals::wait_for_shutdown_signal() => {
                    metrics::emit_shutdown_initiated("signal");
                }
            }
        }
        None => {
            signals::wait_for_shutdown_signal().await;
            metrics::emit_shutdown_initiated("signal");
        }
    }

    run_registered(registry, per_action_timeout).await
}

/// Drain the registry and run the teardown pass under the aggregate budget
/// `per_action_timeout × action count`. This formula guarantees every action
/// its full individual allotment even when every earlier action burns its
/// whole budget, at the cost of a pessimistic worst-case total wait.
pub async fn run_registered(
    registry: &ShutdownRegistry,
    per_action_timeout: Duration,
) -> Vec<ActionOutcome> {
    let count = registry.len();
    let aggregate = per_action_timeout * count as u32;
    info!(
        actions = count,
        per_action_timeout_secs = per_action_timeout.as_secs_f64(),
        aggregate_timeout_secs = aggregate.as_secs_f64(),
        "starting shutdown"
    );
    run_all(registry.drain(), Instant::now() + aggregate, per_action_timeout).await
}
