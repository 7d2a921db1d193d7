pub(crate) const METRIC_SHUTDOWN_INITIATED: &str = "shutdown_initiated_total";
pub(crate) const METRIC_ACTION_RESULT: &str = "shutdown_action_result_total";
pub(crate) const METRIC_PASS_DURATION: &str = "shutdown_pass_duration_seconds";

pub(crate) fn emit_shutdown_initiated(trigger: &str) {
    metrics::counter!(
        METRIC_SHUTDOWN_INITIATED,
        "trigger" => trigger.to_string()
    )
    .increment(1);
}

pub(crate) fn emit_action_result(name: &str, status: &str) {
    metrics::counter!(
        METRIC_ACTION_RESULT,
        "action" => name.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

pub(crate) fn emit_pass_duration(duration_secs: f64, clean: bool) {
    metrics::histogram!(
        METRIC_PASS_DURATION,
        "clean" => clean.to_string()
    )
    .record(duration_secs);
}
