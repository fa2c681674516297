//! In-memory option store

use super::{KeyRegistrations, OptionStore, RegisteredKey};
use crate::config::Sanitize;
use crate::error::Result;
use crate::sync::RwLockExt;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory option storage (not persisted)
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, Value>>,
    registrations: KeyRegistrations,
}

impl MemoryStore {
    /// Create an empty memory store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with values
    #[must_use]
    pub fn with_values<K: Into<String>>(values: impl IntoIterator<Item = (K, Value)>) -> Self {
        Self {
            values: RwLock::new(values.into_iter().map(|(k, v)| (k.into(), v)).collect()),
            registrations: KeyRegistrations::default(),
        }
    }
}

impl OptionStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.values.read_recovered().get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        self.values.write_recovered().insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.values.write_recovered().remove(key);
        Ok(())
    }

    fn register_key(&self, group: &str, key: &str, sanitize: Sanitize) -> Result<()> {
        self.registrations.register(group, key, sanitize);
        Ok(())
    }

    fn registered_keys(&self, group: &str) -> Result<Vec<RegisteredKey>> {
        Ok(self.registrations.in_group(group))
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

// =============================================================================
// Tests
// =============================================================================
