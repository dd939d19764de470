//! Key-value persistence
//!
//! Settings and the best time are small JSON/scalar records kept in a
//! string key-value store: LocalStorage in the browser, a map elsewhere.
//! Write failures are logged and otherwise ignored.

use std::collections::HashMap;

/// Durable string key-value store
pub trait Storage {
    fn get_item(&self, key: &str) -> Option<String>;
    /// Store a value; returns false if the backend rejected it
    fn set_item(&mut self, key: &str, value: &str) -> bool;
}

/// In-memory store (native builds and tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> bool {
        self.items.insert(key.to_string(), value.to_string());
        true
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
pub struct LocalStorage {
    storage: Option<web_sys::Storage>,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    pub fn new() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("LocalStorage unavailable - nothing will be persisted");
        }
        Self { storage }
    }
}

#[cfg(target_arch = "wasm32")]
impl Default for LocalStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
impl Storage for LocalStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set_item(&mut self, key: &str, value: &str) -> bool {
        let Some(storage) = &self.storage else {
            return false;
        };
        match storage.set_item(key, value) {
            Ok(()) => true,
            Err(_) => {
                log::warn!("LocalStorage rejected write to {key}");
                false
            }
        }
    }
}
