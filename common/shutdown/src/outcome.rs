//! Per-action shutdown outcomes, produced transiently during the shutdown
//! pass and not retained beyond logging.

use crate::error::TeardownError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionStatus {
    Ok,
    Timeout,
    Error,
}

impl ActionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionStatus::Ok => "ok",
            ActionStatus::Timeout => "timeout",
            ActionStatus::Error => "error",
        }
    }
}

/// Result of running one named teardown action.
#[derive(Debug, Clone)]
pub struct ActionOutcome {
    pub name: String,
    pub status: ActionStatus,
    pub detail: Option<String>,
}

impl ActionOutcome {
    pub(crate) fn from_result(name: String, result: Result<(), TeardownError>) -> Self {
        match result {
            Ok(()) => Self {
                name,
                status: ActionStatus::Ok,
                detail: None,
            },
            Err(err @ TeardownError::TimedOut { .. }) => Self {
                name,
                status: ActionStatus::Timeout,
                detail: Some(err.to_string()),
            },
            Err(err) => Self {
                name,
                status: ActionStatus::Error,
                detail: Some(format!("{err:#}")),
            },
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == ActionStatus::Ok
    }
}
