//! Common test utilities for optpage integration tests
//!
//! Provides the example settings domain, page fixtures, and helper functions.

#![allow(dead_code)]

use optpage::{
    opt, Caller, Field, JsonFileStore, MemoryStore, MenuRecorder, OptionStore, PageOutput,
    PageRequest, PagesConfig, SchemaRegistry, Section, SettingsPages,
};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

pub const DOMAIN: &str = "examplesettings";
pub const PAGE: &str = "examplesettings-page";

// =============================================================================
// Test Settings Schema
// =============================================================================

/// The example domain: two sections covering every field type but textarea
pub fn example_sections() -> Vec<Section> {
    vec![
        Section::new("section_1", "Section 1")
            .description("This is the first section")
            .field(
                Field::yes_no("option_key_1", "Enable this feature")
                    .description("This activates the feature"),
            )
            .field(Field::select(
                "option_key_2",
                "Choose something",
                vec![
                    opt("blue", "Blue sea"),
                    opt("red", "Red heart"),
                    opt("yellow", "Yellow flower"),
                ],
            ))
            .field(Field::number("option_key_3", "Pick a number"))
            .field(Field::text("option_key_4", "Enter some text")),
        Section::new("section_2", "Section 2").field(Field::yes_no("option_key_2_1", "Enable other")),
    ]
}

pub fn example_registry() -> Arc<SchemaRegistry> {
    let registry = Arc::new(SchemaRegistry::new());
    registry.register_domain("Example Settings", DOMAIN, example_sections());
    registry
}

// =============================================================================
// Test Fixtures
// =============================================================================

/// Settings pages over an in-memory store
pub struct PagesFixture {
    pub store: Arc<MemoryStore>,
    pub pages: SettingsPages,
    pub menu: MenuRecorder,
}

impl PagesFixture {
    /// Example domain, default configuration, bootstrapped
    pub fn new() -> Self {
        Self::with_registry(example_registry(), PagesConfig::default())
    }

    /// Bootstrapped pages for any registry and configuration
    pub fn with_registry(registry: Arc<SchemaRegistry>, config: PagesConfig) -> Self {
        let fixture = Self::unbootstrapped(registry, config);
        fixture.pages.bootstrap(&fixture.menu).expect("bootstrap failed");
        fixture
    }

    /// Pages that have not been bootstrapped yet
    pub fn unbootstrapped(registry: Arc<SchemaRegistry>, config: PagesConfig) -> Self {
        init_logging();
        let store = Arc::new(MemoryStore::new());
        let pages = SettingsPages::builder(registry, store.clone() as Arc<dyn OptionStore>)
            .config(config)
            .build();

        Self {
            store,
            pages,
            menu: MenuRecorder::new(),
        }
    }

    /// View a page as an administrator
    pub fn view(&self, page: &str) -> PageOutput {
        self.pages
            .render_page(&PageRequest::new(page, Caller::administrator()))
            .expect("render failed")
    }

    /// View a page as the post-save redirect
    pub fn view_after_save(&self, page: &str) -> PageOutput {
        self.pages
            .render_page(&PageRequest::new(page, Caller::administrator()).settings_updated(true))
            .expect("render failed")
    }
}

impl Default for PagesFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A JSON file store in a temporary directory
pub struct FileFixture {
    pub temp_dir: TempDir,
    pub store: Arc<JsonFileStore>,
}

impl FileFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = Arc::new(JsonFileStore::new(temp_dir.path().join("options.json")));
        Self { temp_dir, store }
    }

    /// Path of the options file
    pub fn options_path(&self) -> PathBuf {
        self.temp_dir.path().join("options.json")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Route library logs to the test output (`RUST_LOG=debug cargo test`)
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Read the raw options JSON file content
pub fn read_options_file(fixture: &FileFixture) -> Option<serde_json::Value> {
    let content = std::fs::read_to_string(fixture.options_path()).ok()?;
    serde_json::from_str(&content).ok()
}

/// The markup of the table row rendered for a store key
pub fn row<'a>(markup: &'a str, key: &str) -> Option<&'a str> {
    let start = markup.find(&format!("<tr class=\"{key}_row\">"))?;
    let end = markup[start..].find("</tr>")? + start;
    Some(&markup[start..end])
}
