//! Executes the registered teardown sequence in reverse order under a time
//! budget, isolating each action's failure from the rest of the pass.

use std::time::Duration;

use tokio::time::Instant;
use tracing::{info, warn};

use crate::metrics;
use crate::outcome::{ActionOutcome, ActionStatus};
use crate::registry::NamedAction;

/// Run every action, last-registered first, one at a time. Each action gets
/// `min(per_action_timeout, time remaining until upstream_deadline)`; a
/// failure or timeout is logged and recorded, never propagated, and the pass
/// always covers every action exactly once.
pub async fn run_all(
    actions: Vec<NamedAction>,
    upstream_deadline: Instant,
    per_action_timeout: Duration,
) -> Vec<ActionOutcome> {
    let pass_started = Instant::now();
    let mut outcomes = Vec::with_capacity(actions.len());

    for named in actions.into_iter().rev() {
        let remaining = upstream_deadline.saturating_duration_since(Instant::now());
        let budget = per_action_timeout.min(remaining);

        let started = Instant::now();
        let result = named.action.run(budget).await;
        let elapsed = started.elapsed();

        let outcome = ActionOutcome::from_result(named.name, result);
        metrics::emit_action_result(&outcome.name, outcome.status.as_str());
        match outcome.status {
            ActionStatus::Ok => info!(
                name = %outcome.name,
                status = outcome.status.as_str(),
                duration_secs = elapsed.as_secs_f64(),
                "teardown action finished"
            ),
            ActionStatus::Timeout | ActionStatus::Error => warn!(
                name = %outcome.name,
                status = outcome.status.as_str(),
                duration_secs = elapsed.as_secs_f64(),
                detail = outcome.detail.as_deref().unwrap_or(""),
                "teardown action did not finish cleanly"
            ),
        }
        outcomes.push(outcome);
    }

    let clean = outcomes.iter().all(ActionOutcome::is_ok);
    metrics::emit_pass_duration(pass_started.elapsed().as_secs_f64(), clean);
    info!(
        actions = outcomes.len(),
        clean,
        total_duration_secs = pass_started.elapsed().as_secs_f64(),
        "shutdown complete"
    );
    outcomes
}
