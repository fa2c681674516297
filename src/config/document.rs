//! Declarative schema documents
//!
//! Plugins that keep their settings layout in a data file instead of code describe it as a
//! [`DomainDocument`]. Sections and fields are arrays so their order is the display order.
//!
//! ```json
//! {
//!   "sections": [
//!     {
//!       "id": "section_1",
//!       "label": "First section",
//!       "description": "This section is the first one",
//!       "fields": [
//!         { "id": "option_key_1", "label": "Enable something", "type": "yesno" },
//!         { "id": "option_key_2", "label": "Choose something", "type": "select",
//!           "options": [ { "value": "blue", "label": "Blue sea" } ] },
//!         { "id": "option_key_4", "label": "Enter some text" }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! Field `type` tags are not checked while parsing. An unknown tag parses fine and fails when the
//! field is rendered.

use super::schema::{Field, SelectOption, Section};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Top-level schema document for one settings domain
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainDocument {
    /// Sections in display order
    #[serde(default)]
    pub sections: Vec<SectionDocument>,
}

/// One section in a [`DomainDocument`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionDocument {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldDocument>,
}

/// One field in a [`SectionDocument`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDocument {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<SelectOption>>,
}

impl DomainDocument {
    /// Parse a JSON document
    ///
    /// # Errors
    ///
    /// Returns `Error::Serialize` if the JSON does not match the document shape.
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(Error::from)
    }

    /// Parse a TOML document (`[[sections]]` / `[[sections.fields]]` tables)
    ///
    /// # Errors
    ///
    /// Returns `Error::Parse` if the TOML does not match the document shape.
    #[cfg(feature = "toml")]
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Parse(e.to_string()))
    }

    /// Parse a YAML document
    ///
    /// # Errors
    ///
    /// Returns `Error::Parse` if the YAML does not match the document shape.
    #[cfg(feature = "yaml")]
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::Parse(e.to_string()))
    }

    /// Convert into sections of declared fields
    #[must_use]
    pub fn into_sections(self) -> Vec<Section> {
        self.sections.into_iter().map(Section::from).collect()
    }
}

impl From<SectionDocument> for Section {
    fn from(doc: SectionDocument) -> Self {
        let mut section = Section::new(doc.id, doc.label)
            .fields(doc.fields.into_iter().map(Field::from));
        section.description = doc.description;
        section
    }
}

impl From<FieldDocument> for Field {
    fn from(doc: FieldDocument) -> Self {
        let mut field = Field::declared(doc.id, doc.label, doc.field_type);
        if let Some(options) = doc.options {
            field = field.with_options(options);
        }
        field.description = doc.description;
        field
    }
}
