//! Option store module
//!
//! The host's generic key/value settings store, one key per field:
//! - **Memory**: In-process only, for tests and embedding hosts that persist elsewhere
//! - **JSON file**: One JSON object on disk, written atomically

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use crate::config::Sanitize;
use crate::error::Result;
use crate::sync::RwLockExt;
use serde_json::Value;
use std::sync::RwLock;

/// A store key registered as belonging to a settings group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredKey {
    /// Group (settings domain) the key belongs to
    pub group: String,
    /// Store key
    pub key: String,
    /// Coercion applied to submitted values
    pub sanitize: Sanitize,
}

/// Trait for option store backends
pub trait OptionStore: Send + Sync {
    /// Read a stored value
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to read.
    fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Store a value, replacing any previous one
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to write.
    fn set(&self, key: &str, value: Value) -> Result<()>;

    /// Remove a stored value
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to write.
    fn remove(&self, key: &str) -> Result<()>;

    /// Register a key as belonging to a group
    ///
    /// Registering the same (group, key) again replaces its sanitize policy.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the registration.
    fn register_key(&self, group: &str, key: &str, sanitize: Sanitize) -> Result<()>;

    /// Keys registered under a group, in registration order
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to list keys.
    fn registered_keys(&self, group: &str) -> Result<Vec<RegisteredKey>>;

    /// Check if a value is stored under the key
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to read.
    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// Backend name for logging/debugging
    fn backend_name(&self) -> &'static str;
}

/// Key registrations shared by the bundled stores
#[derive(Debug, Default)]
pub(crate) struct KeyRegistrations {
    keys: RwLock<Vec<RegisteredKey>>,
}

impl KeyRegistrations {
    pub(crate) fn register(&self, group: &str, key: &str, sanitize: Sanitize) {
        let mut keys = self.keys.write_recovered();
        match keys.iter_mut().find(|k| k.group == group && k.key == key) {
            Some(existing) => existing.sanitize = sanitize,
            None => keys.push(RegisteredKey {
                group: group.to_string(),
                key: key.to_string(),
                sanitize,
            }),
        }
    }

    pub(crate) fn in_group(&self, group: &str) -> Vec<RegisteredKey> {
        self.keys
            .read_recovered()
            .iter()
            .filter(|k| k.group == group)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registrations_replace_policy() {
        let regs = KeyRegistrations::default();
        regs.register("shop", "count", Sanitize::Text);
        regs.register("shop", "name", Sanitize::Text);
        regs.register("blog", "count", Sanitize::Text);
        regs.register("shop", "count", Sanitize::Integer);

        let shop = regs.in_group("shop");
        assert_eq!(shop.len(), 2);
        assert_eq!(shop[0].key, "count");
        assert_eq!(shop[0].sanitize, Sanitize::Integer);
        assert_eq!(regs.in_group("blog").len(), 1);
        assert!(regs.in_group("none").is_empty());
    }
}
