//! Builder for SettingsPages
//!
//! This module contains [`SettingsPagesBuilder`] which provides a fluent API
//! for creating a [`SettingsPages`](super::SettingsPages).

use crate::config::PagesConfig;
use crate::host::{Escaper, HtmlEscaper, Translator, Untranslated};
use crate::persistence::OptionsBridge;
use crate::registry::SchemaRegistry;
use crate::store::OptionStore;
use std::sync::{Arc, RwLock};

use super::SettingsPages;
use super::notices::NoticeBoard;

/// Builder for creating [`SettingsPages`] with a fluent API.
///
/// Without further calls the pages use [`PagesConfig::default`], no translation and HTML
/// escaping.
///
/// # Example
///
/// ```rust
/// use optpage::{Catalog, KeyStrategy, MemoryStore, PagesConfig, SchemaRegistry, SettingsPages};
/// use std::sync::Arc;
///
/// let pages = SettingsPages::builder(Arc::new(SchemaRegistry::new()), Arc::new(MemoryStore::new()))
///     .config(
///         PagesConfig::builder()
///             .capability("edit_shop")
///             .key_strategy(KeyStrategy::DomainPrefixed)
///             .build(),
///     )
///     .translator(Catalog::new().message("shop", "Settings Saved", "Gespeichert"))
///     .build();
///
/// assert_eq!(pages.config().capability, "edit_shop");
/// ```
pub struct SettingsPagesBuilder {
    registry: Arc<SchemaRegistry>,
    store: Arc<dyn OptionStore>,
    config: PagesConfig,
    translator: Arc<dyn Translator>,
    escaper: Arc<dyn Escaper>,
}

impl SettingsPagesBuilder {
    /// Create a builder over a registry and an option store.
    pub fn new(registry: Arc<SchemaRegistry>, store: Arc<dyn OptionStore>) -> Self {
        Self {
            registry,
            store,
            config: PagesConfig::default(),
            translator: Arc::new(Untranslated),
            escaper: Arc::new(HtmlEscaper),
        }
    }

    /// Set the controller configuration.
    pub fn config(mut self, config: PagesConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the translation facility for visible strings.
    pub fn translator(mut self, translator: impl Translator + 'static) -> Self {
        self.translator = Arc::new(translator);
        self
    }

    /// Set the escaping facility for emitted markup.
    pub fn escaper(mut self, escaper: impl Escaper + 'static) -> Self {
        self.escaper = Arc::new(escaper);
        self
    }

    /// Build the pages.
    pub fn build(self) -> SettingsPages {
        SettingsPages {
            bridge: OptionsBridge::new(self.store, self.config.key_strategy),
            registry: self.registry,
            config: self.config,
            translator: self.translator,
            escaper: self.escaper,
            notices: NoticeBoard::default(),
            wired: RwLock::default(),
            bootstrapped: RwLock::new(false),
        }
    }
}
