//! Ephemeral session-scoped key-value storage.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Key-value scope living for at most the current session.
///
/// Nothing written here survives the process; a different host environment
/// (per-connection state, a user session token) can supply its own
/// implementation with the same lifetime contract.
pub trait SessionScope: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String);
    fn remove(&self, key: &str);
}

/// Process-local session scope; dropped with the process.
#[derive(Debug, Default)]
pub struct InMemorySession {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionScope for InMemorySession {
    fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        self.lock().insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) {
        self.lock().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove_roundtrip() {
        let session = InMemorySession::new();
        assert_eq!(session.get("k"), None);

        session.set("k", "v1".to_string());
        assert_eq!(session.get("k").as_deref(), Some("v1"));

        session.set("k", "v2".to_string());
        assert_eq!(session.get("k").as_deref(), Some("v2"));

        session.remove("k");
        assert_eq!(session.get("k"), None);
    }
}
