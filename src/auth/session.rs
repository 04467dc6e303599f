//! Client-side key-value session storage.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Key the auth token is stored under.
pub const TOKEN_KEY: &str = "token";

/// A string key-value store shared between the login flow and the API client.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);

    /// The stored auth token, if any.
    fn token(&self) -> Option<String> {
        self.get(TOKEN_KEY)
    }
}

impl<T: SessionStore + ?Sized> SessionStore for Arc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}

/// Session storage that lives as long as the process.
#[derive(Debug, Default)]
pub struct MemorySession {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SessionStore for MemorySession {
    fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.lock().insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.lock().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let session = MemorySession::new();
        assert_eq!(session.token(), None);

        session.set(TOKEN_KEY, "abc");
        assert_eq!(session.token().as_deref(), Some("abc"));

        session.remove(TOKEN_KEY);
        assert_eq!(session.get(TOKEN_KEY), None);
    }

    #[test]
    fn test_shared_through_arc() {
        let session = Arc::new(MemorySession::new());
        let other = Arc::clone(&session);
        other.set("k", "v");
        assert_eq!(session.get("k").as_deref(), Some("v"));
    }
}
