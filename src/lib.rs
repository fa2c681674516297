//! # optpage - declarative admin settings pages
//!
//! Plugins declare a settings *domain* (a titled collection of sections holding typed fields) and
//! get a complete admin page for it: menu entry, form rendering, value persistence through the
//! host's option store, and the "settings saved" acknowledgment.
//!
//! ## Features
//!
//! - **Schema Registry**: Register domains in code or from JSON/TOML/YAML documents
//! - **Field Renderer**: Yes/No, select, number, text and textarea widgets, escaped and translated
//! - **Persistence Bridge**: One store key per field, integer coercion, change events
//! - **Page Controller**: Bootstrap, permission-checked page views, form submission
//! - **Stores**: In-memory and atomic JSON-file option stores
//!
//! ## Quick Start
//!
//! ```rust
//! use optpage::{
//!     opt, Caller, Field, MemoryStore, MenuRecorder, PageRequest, SchemaRegistry, Section,
//!     SettingsPages, SubmitRequest,
//! };
//! use std::sync::Arc;
//!
//! # fn example() -> optpage::Result<()> {
//! let registry = Arc::new(SchemaRegistry::new());
//! registry.register_domain("Example Settings", "examplesettings", vec![
//!     Section::new("section_1", "Section 1")
//!         .description("Lorem ipsum")
//!         .field(Field::yes_no("option_key_1", "Enable feature").description("This activates it"))
//!         .field(Field::select("option_key_2", "Choose something", vec![
//!             opt("blue", "Blue sea"),
//!             opt("red", "Red heart"),
//!         ]))
//!         .field(Field::number("option_key_3", "Pick a number")),
//! ]);
//!
//! let pages = SettingsPages::builder(registry, Arc::new(MemoryStore::new())).build();
//! pages.bootstrap(&MenuRecorder::new())?;
//!
//! // Browser posts the form
//! let form = SubmitRequest::new("examplesettings", Caller::administrator())
//!     .value("option_key_2", "red")
//!     .value("option_key_3", "42");
//! let outcome = pages.handle_submit(&form)?.expect("administrator may submit");
//!
//! // ...and follows the redirect
//! let query = outcome.redirect.split_once('?').map(|(_, q)| q).unwrap_or_default();
//! let view = pages.render_page(&PageRequest::from_query(query, Caller::administrator()))?;
//! assert!(view.markup.contains("Settings Saved"));
//! assert!(view.markup.contains(r#"<option value="red" selected="selected">Red heart</option>"#));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Declaring Domains in Data Files
//!
//! ```rust
//! use optpage::{DomainDocument, SchemaRegistry};
//!
//! let doc = DomainDocument::from_json_str(r#"{
//!     "sections": [{
//!         "id": "general",
//!         "label": "General",
//!         "fields": [
//!             { "id": "shop_open", "label": "Open", "type": "yesno" },
//!             { "id": "shop_name", "label": "Name" }
//!         ]
//!     }]
//! }"#)?;
//!
//! let registry = SchemaRegistry::new();
//! registry.register_document("Shop", "shop", doc);
//! assert_eq!(registry.get("shop").map(|d| d.sections.len()), Some(1));
//! # Ok::<(), optpage::Error>(())
//! ```
//!
//! A field without `type` is a short text input. A field whose `type` is not one of `yesno`,
//! `select`, `number`, `text` or `textarea` registers fine but its row is left out of the page
//! and reported in [`PageOutput::field_errors`].
//!
//! ## Store Keys
//!
//! By default a field's id is its store key ([`KeyStrategy::Bare`]), so two domains declaring the
//! same field id share one value. Use [`KeyStrategy::DomainPrefixed`] to keep them apart:
//!
//! ```rust
//! use optpage::{KeyStrategy, PagesConfig};
//!
//! let config = PagesConfig::builder()
//!     .key_strategy(KeyStrategy::DomainPrefixed)
//!     .build();
//! assert_eq!(config.key_strategy.key("shop", "color"), "shop_color");
//! ```
//!
//! ## Watching Changes
//!
//! ```rust
//! use optpage::{Field, KeyStrategy, MemoryStore, OptionsBridge, SchemaRegistry, Section};
//! use std::sync::Arc;
//!
//! let registry = SchemaRegistry::new();
//! let shop = registry.register_domain("Shop", "shop", vec![
//!     Section::new("general", "General").field(Field::text("shop_name", "Name")),
//! ]);
//!
//! let bridge = OptionsBridge::new(Arc::new(MemoryStore::new()), KeyStrategy::Bare);
//! bridge.events().watch("shop_name", |key, _old, new| {
//!     println!("{key} is now {new:?}");
//! });
//! bridge.update(&shop, "shop_name", "Corner Shop")?;
//! # Ok::<(), optpage::Error>(())
//! ```

// Core modules
mod error;
mod events;
mod persistence;
mod registry;
mod sync;

// Grouped modules
pub mod config;
pub mod host;
pub mod page;
pub mod render;
pub mod store;

// Re-exports from core
pub use error::{Error, Result};
pub use events::{ChangeCallback, EventManager};
pub use persistence::{OptionsBridge, value_text};
pub use registry::{Domain, Domains, SchemaRegistry};

// Re-exports from config
pub use config::{
    DomainDocument, Field, FieldKind, FieldType, KeyStrategy, PagesConfig, PagesConfigBuilder,
    Sanitize, Section, SelectOption, opt,
};

// Host collaborators
pub use host::{
    Caller, Catalog, Escaper, HtmlEscaper, MenuPage, MenuRecorder, MenuRegistrar, PageRequest,
    SubmitRequest, Translator, Untranslated,
};

// Page controller and rendering
pub use page::{FieldError, PageOutput, SettingsPages, SettingsPagesBuilder, SubmitOutcome};
pub use render::FieldRenderer;
pub use render::layout::{Notice, NoticeKind};

// Stores
pub use store::{JsonFileStore, MemoryStore, OptionStore, RegisteredKey};
