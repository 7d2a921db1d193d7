//! Coordinated graceful shutdown: an explicit registry of named teardown
//! actions, executed in reverse-registration order when the process exits.
//!
//! Subsystems register cleanup work during startup with
//! [`ShutdownRegistry::defer`]; the entry point blocks in [`wait_for_exit`]
//! once startup is done. When SIGINT/SIGTERM arrives (or an upstream
//! [`CancellationToken`](tokio_util::sync::CancellationToken) fires), every
//! registered action runs exactly once, last-registered first, mirroring
//! resource-release symmetry with acquisition order.
//!
//! Each action gets an individual time budget of
//! `min(per_action_timeout, time remaining until the aggregate deadline)`,
//! where the aggregate deadline is `per_action_timeout × action count`. One
//! action's failure or timeout never blocks or skips the ones after it.
//!
//! # Cancellation is cooperative, not preemptive
//!
//! A teardown action runs as a detached tokio task. When its budget elapses,
//! the coordinator cancels the token handed to cancellable actions, records a
//! timeout outcome and moves on; it does **not** kill the task. An action
//! whose underlying operation can block indefinitely (e.g. a network call
//! with no internal timeout) will keep its task alive until it finishes on
//! its own or the process exits. This is an accepted trade-off, not a bug:
//! the alternative (forcible termination) cannot be done safely.

mod action;
mod coordinator;
mod error;
mod metrics;
mod names;
mod outcome;
mod registry;
mod signals;
mod waiter;

pub use action::TeardownAction;
pub use coordinator::run_all;
pub use error::TeardownError;
pub use names::NameResolver;
pub use outcome::{ActionOutcome, ActionStatus};
pub use registry::{NamedAction, ShutdownRegistry};
pub use waiter::{run_registered, wait_for_exit};
