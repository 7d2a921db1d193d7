//! Process-unique names for registered teardown actions.

use std::collections::HashSet;
use std::sync::Mutex;

use uuid::Uuid;

/// Resolves requested names to process-unique ones. The set of resolved
/// names grows monotonically and never shrinks, so a name can never be
/// reused even after its action has run.
#[derive(Default)]
pub struct NameResolver {
    // Check-and-insert must be atomic under concurrent callers; the lock is
    // held only for the HashSet operations.
    names: Mutex<HashSet<String>>,
}

impl NameResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `requested` as-is if it is free, otherwise appends a
    /// timestamp-plus-random suffix (UUIDv7) until a free name is found.
    pub fn resolve(&self, requested: &str) -> String {
        let mut names = self.names.lock().expect("name set lock poisoned");
        if names.insert(requested.to_string()) {
            return requested.to_string();
        }
        loop {
            let candidate = format!("{requested}-{}", Uuid::now_v7());
            if names.insert(candidate.clone()) {
                return candidate;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_name_is_used_as_is() {
        let resolver = NameResolver::new();
        assert_eq!(resolver.resolve("redis"), "redis");
    }

    #[test]
    fn collision_appends_suffix_keeping_prefix() {
        let resolver = NameResolver::new();
        let first = resolver.resolve("redis");
        let second = resolver.resolve("redis");
        assert_eq!(first, "redis");
        assert_ne!(first, second);
        assert!(second.starts_with("redis-"));
    }

    #[test]
    fn suffixed_names_are_themselves_reserved() {
        let resolver = NameResolver::new();
        let taken = resolver.resolve("db");
        let suffixed = resolver.resolve("db");
        // Registering the suffixed name directly must also be deduplicated.
        let third = resolver.resolve(&suffixed);
        assert_eq!(taken, "db");
        assert_ne!(third, suffixed);
    }
}
