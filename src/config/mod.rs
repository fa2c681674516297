//! Core configuration types
//!
//! This module contains the foundational types for settings pages:
//! - `Section` / `Field` / `FieldType` - The schema a plugin registers
//! - `DomainDocument` - The same schema loaded from a data file
//! - `PagesConfig` - Configuration for the page controller

mod document;
mod schema;
mod types;

pub use document::{DomainDocument, FieldDocument, SectionDocument};
pub use schema::{Field, FieldKind, FieldType, Sanitize, Section, SelectOption, opt};
pub use types::{KeyStrategy, PagesConfig, PagesConfigBuilder};
