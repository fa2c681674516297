//! Persistence bridge between settings fields and the option store
//!
//! Every field owns exactly one store key (see [`KeyStrategy`]). Reads coerce the stored value
//! by the field's type, writes coerce the submitted text before it reaches the store.

use crate::config::{Field, KeyStrategy};
use crate::error::{Error, Result};
use crate::events::EventManager;
use crate::registry::Domain;
use crate::store::OptionStore;
use log::debug;
use serde_json::Value;
use std::sync::Arc;

/// Reads and writes field values through an [`OptionStore`]
///
/// # Example
///
/// ```rust
/// use optpage::{Field, KeyStrategy, MemoryStore, OptionsBridge, SchemaRegistry, Section};
/// use serde_json::json;
/// use std::sync::Arc;
///
/// let registry = SchemaRegistry::new();
/// let shop = registry.register_domain("Shop", "shop", vec![
///     Section::new("general", "General").field(Field::number("max_items", "Max items")),
/// ]);
///
/// let bridge = OptionsBridge::new(Arc::new(MemoryStore::new()), KeyStrategy::Bare);
/// bridge.update(&shop, "max_items", "42")?;
/// assert_eq!(bridge.value(&shop, "max_items")?, Some(json!(42)));
/// # Ok::<(), optpage::Error>(())
/// ```
#[derive(Clone)]
pub struct OptionsBridge {
    store: Arc<dyn OptionStore>,
    keys: KeyStrategy,
    events: Arc<EventManager>,
}

impl std::fmt::Debug for OptionsBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptionsBridge")
            .field("store", &self.store.backend_name())
            .field("keys", &self.keys)
            .finish()
    }
}

impl OptionsBridge {
    /// Create a bridge over a store
    pub fn new(store: Arc<dyn OptionStore>, keys: KeyStrategy) -> Self {
        Self {
            store,
            keys,
            events: Arc::new(EventManager::new()),
        }
    }

    /// The underlying store
    pub fn store(&self) -> &Arc<dyn OptionStore> {
        &self.store
    }

    /// Event manager notified on every write and removal
    pub fn events(&self) -> &Arc<EventManager> {
        &self.events
    }

    /// Key strategy in use
    pub fn key_strategy(&self) -> KeyStrategy {
        self.keys
    }

    /// Store key of a field
    #[must_use]
    pub fn storage_key(&self, domain: &str, field_id: &str) -> String {
        self.keys.key(domain, field_id)
    }

    /// Register every field of a domain with the store, grouped under the domain id
    ///
    /// Returns the number of keys registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects a registration.
    pub fn register_domain(&self, domain: &Domain) -> Result<usize> {
        let mut count = 0;
        for (_, field) in domain.fields() {
            let key = self.storage_key(&domain.id, &field.id);
            self.store
                .register_key(&domain.id, &key, field.kind.sanitize())?;
            debug!("Registered option '{}' for domain '{}'", key, domain.id);
            count += 1;
        }
        Ok(count)
    }

    /// Current value of a field, coerced by its type
    ///
    /// Integer fields holding non-numeric data read as `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails to read.
    pub fn get(&self, domain: &str, field: &Field) -> Result<Option<Value>> {
        let key = self.storage_key(domain, &field.id);
        let stored = self.store.get(&key)?;
        Ok(stored.and_then(|value| field.kind.sanitize().read(&value)))
    }

    /// Store submitted text for a field
    ///
    /// Integer fields keep the leading integer of the text; text without one removes the stored
    /// value. Returns what is stored afterwards.
    ///
    /// # Errors
    ///
    /// * `Error::UnsupportedFieldType` / `Error::InvalidSchema` - the field's type does not resolve
    /// * Store errors if the write fails
    pub fn set(&self, domain: &str, field: &Field, raw: &str) -> Result<Option<Value>> {
        let sanitize = field.field_type()?.sanitize();
        let key = self.storage_key(domain, &field.id);
        let old = self.store.get(&key)?;
        let new = sanitize.apply(raw);

        match &new {
            Some(value) => self.store.set(&key, value.clone())?,
            None if old.is_some() => self.store.remove(&key)?,
            None => return Ok(None),
        }

        debug!("Stored option '{key}' = {new:?}");
        self.events.notify(&key, old.as_ref(), new.as_ref());
        Ok(new)
    }

    /// Current value of a field looked up by id
    ///
    /// # Errors
    ///
    /// Returns `Error::FieldNotFound` if the domain has no such field.
    pub fn value(&self, domain: &Domain, field_id: &str) -> Result<Option<Value>> {
        self.get(&domain.id, find_field(domain, field_id)?)
    }

    /// Store submitted text for a field looked up by id
    ///
    /// # Errors
    ///
    /// Returns `Error::FieldNotFound` if the domain has no such field, or any error of
    /// [`OptionsBridge::set`].
    pub fn update(&self, domain: &Domain, field_id: &str, raw: &str) -> Result<Option<Value>> {
        self.set(&domain.id, find_field(domain, field_id)?, raw)
    }
}

fn find_field<'a>(domain: &'a Domain, field_id: &str) -> Result<&'a Field> {
    domain.field(field_id).ok_or_else(|| Error::FieldNotFound {
        domain: domain.id.clone(),
        field: field_id.to_string(),
    })
}

/// Text form of a stored scalar, as shown in form inputs
#[must_use]
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}
