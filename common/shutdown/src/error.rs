//! Teardown error taxonomy. None of these escalate: the coordinator records
//! them as outcomes and keeps going.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TeardownError {
    /// The action was registered through a bridge path that could not produce
    /// one of the recognized callable shapes. Programmer error; no worker is
    /// ever spawned for it.
    #[error("unsupported action shape")]
    UnsupportedShape,

    /// The action's worker did not finish within its budget. The worker is
    /// abandoned and may still be running.
    #[error("timed out after {budget:?}")]
    TimedOut { budget: Duration },

    /// The action completed and reported failure.
    #[error(transparent)]
    Failed(#[from] anyhow::Error),
}
