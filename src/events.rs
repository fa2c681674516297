//! Event system for option changes
//!
//! Listeners are called after the persistence bridge writes or removes a stored value.

use crate::sync::RwLockExt;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Type alias for a change callback: (`store_key`, `old_value`, `new_value`)
///
/// `None` means the key had no stored value (before) or was removed (after).
pub type ChangeCallback = Arc<dyn Fn(&str, Option<&Value>, Option<&Value>) + Send + Sync>;

/// Manages listeners for option changes
#[derive(Default)]
pub struct EventManager {
    /// Global listeners (called for all changes)
    global_listeners: RwLock<Vec<ChangeCallback>>,

    /// Per-key listeners (called only for changes to one store key)
    key_listeners: RwLock<HashMap<String, Vec<ChangeCallback>>>,
}

impl std::fmt::Debug for EventManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventManager")
            .field("global_listeners", &self.global_listeners.read_recovered().len())
            .field("key_listeners", &self.key_listeners.read_recovered().len())
            .finish()
    }
}

impl EventManager {
    /// Create a new event manager
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener called for every change
    pub fn on_change<F>(&self, callback: F)
    where
        F: Fn(&str, Option<&Value>, Option<&Value>) + Send + Sync + 'static,
    {
        self.global_listeners
            .write_recovered()
            .push(Arc::new(callback));
    }

    /// Register a listener for one store key
    pub fn watch<F>(&self, key: &str, callback: F)
    where
        F: Fn(&str, Option<&Value>, Option<&Value>) + Send + Sync + 'static,
    {
        self.key_listeners
            .write_recovered()
            .entry(key.to_string())
            .or_default()
            .push(Arc::new(callback));
    }

    /// Notify listeners about a change
    ///
    /// Listeners run outside the internal locks, so a listener may register further listeners.
    pub fn notify(&self, key: &str, old_value: Option<&Value>, new_value: Option<&Value>) {
        let global: Vec<ChangeCallback> = self.global_listeners.read_recovered().clone();
        let keyed: Vec<ChangeCallback> = self
            .key_listeners
            .read_recovered()
            .get(key)
            .cloned()
            .unwrap_or_default();

        for callback in global.iter().chain(keyed.iter()) {
            callback(key, old_value, new_value);
        }
    }

    /// Remove all listeners for a specific key
    pub fn unwatch(&self, key: &str) {
        self.key_listeners.write_recovered().remove(key);
    }

    /// Clear all listeners
    pub fn clear(&self) {
        self.global_listeners.write_recovered().clear();
        self.key_listeners.write_recovered().clear();
    }
}

// =============================================================================
// Tests
// =============================================================================
