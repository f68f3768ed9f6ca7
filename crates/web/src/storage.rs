//! Client-side token persistence.

use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, Mutex},
};

/// Key/value persistence for the session token.
pub trait TokenStore: Send + Sync {
    /// Read a stored value.
    fn get(&self, key: &str) -> Option<String>;

    /// Store a value, replacing any previous one.
    fn set(&self, key: &str, value: &str);

    /// Remove a value. Removing a missing key is a no-op.
    fn remove(&self, key: &str);
}

/// Browser `localStorage`.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl TokenStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(key, value);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// In-memory store, used off the browser.
#[derive(Clone, Default)]
pub struct MemoryTokenStore {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl fmt::Debug for MemoryTokenStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryTokenStore").finish_non_exhaustive()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .ok()
            .and_then(|values| values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips_and_removes() {
        let store = MemoryTokenStore::default();

        store.set("authToken", "abc");
        assert_eq!(store.get("authToken").as_deref(), Some("abc"));

        store.remove("authToken");
        assert_eq!(store.get("authToken"), None);
    }

    #[test]
    fn removing_missing_key_is_noop() {
        let store = MemoryTokenStore::default();

        store.remove("authToken");

        assert_eq!(store.get("authToken"), None);
    }

    #[test]
    fn clones_share_values() {
        let store = MemoryTokenStore::default();
        let other = store.clone();

        store.set("authToken", "abc");

        assert_eq!(other.get("authToken").as_deref(), Some("abc"));
    }
}
