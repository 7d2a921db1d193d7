use std::sync::Arc;

use envconfig::Envconfig;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use pulse::config::Config;
use pulse::server;
use shutdown::{wait_for_exit, ActionOutcome, ShutdownRegistry};

#[tokio::main]
async fn main() {
    let config = Config::init_from_env().expect("Invalid configuration:");

    // Configure logging format:
    //   with_target: Include module path (e.g. "pulse::server")
    //   with_thread_ids: Include thread ID for concurrent debugging
    //   with_level: Show log level (ERROR, INFO, etc)
    //   with_filter: Use RUST_LOG env var to control verbosity
    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_level(true)
        .with_filter(EnvFilter::from_default_env());
    tracing_subscriber::registry().with(fmt_layer).init();

    let registry = Arc::new(ShutdownRegistry::new());
    server::start(config.clone(), registry.clone())
        .await
        .expect("failed to start server");

    // Blocks until SIGINT/SIGTERM, then runs every registered teardown.
    let outcomes = wait_for_exit(&registry, None, config.shutdown_timeout()).await;

    if outcomes.iter().all(ActionOutcome::is_ok) {
        std::process::exit(0);
    }
    std::process::exit(1);
}
