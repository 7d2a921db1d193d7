//! Append-only, ordered registry of named teardown actions.

use std::sync::Mutex;

use crate::action::TeardownAction;
use crate::names::NameResolver;

/// One registered teardown step: a process-unique name and the adapted action.
pub struct NamedAction {
    pub(crate) name: String,
    pub(crate) action: TeardownAction,
}

impl NamedAction {
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Thread-safe, append-only collection of teardown actions, in registration
/// order. Construct one at program start and thread it (as an `Arc`) through
/// every subsystem that needs to defer cleanup; there is no hidden global.
///
/// Actions are never removed or re-ordered; the sequence is consumed exactly
/// once, at shutdown, by [`drain`](ShutdownRegistry::drain).
#[derive(Default)]
pub struct ShutdownRegistry {
    actions: Mutex<Vec<NamedAction>>,
    names: NameResolver,
}

impl ShutdownRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a teardown action under `name`. Callable from any thread, any
    /// number of times, during startup. If `name` was already used, the
    /// action is stored under a suffixed unique name instead.
    pub fn defer(&self, name: &str, action: TeardownAction) {
        let resolved = self.names.resolve(name);
        tracing::debug!(name = %resolved, "teardown action registered");
        self.actions
            .lock()
            .expect("shutdown registry lock poisoned")
            .push(NamedAction {
                name: resolved,
                action,
            });
    }

    /// Like [`defer`](ShutdownRegistry::defer), with explicit call-site
    /// metadata folded into the requested name for diagnostics, e.g.
    /// `defer_annotated("cache", "cache::new", ...)` registers
    /// `"cache (cache::new)"`.
    pub fn defer_annotated(&self, name: &str, site: &str, action: TeardownAction) {
        self.defer(&format!("{name} ({site})"), action);
    }

    /// Number of actions currently registered.
    pub fn len(&self) -> usize {
        self.actions
            .lock()
            .expect("shutdown registry lock poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Take the full ordered sequence for the coordinator to consume. The
    /// registry is left empty; intended to be called exactly once, at
    /// shutdown time.
    pub fn drain(&self) -> Vec<NamedAction> {
        std::mem::take(
            &mut *self
                .actions
                .lock()
                .expect("shutdown registry lock poisoned"),
        )
    }
}
