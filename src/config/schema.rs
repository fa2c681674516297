//! Settings schema: sections, fields and field types
//!
//! # Overview
//!
//! A settings page is described by an ordered list of [`Section`]s, each holding an ordered list
//! of [`Field`]s. Every field carries a [`FieldKind`]:
//!
//! - **Typed** fields are built in code and carry a [`FieldType`] directly. The renderer matches
//!   over it exhaustively, so a typed field can never fail with an unknown type.
//! - **Declared** fields come from a schema document (see [`DomainDocument`](super::DomainDocument))
//!   and keep the raw `type` tag. The tag is resolved into a [`FieldType`] only when the field is
//!   rendered or written, which is where an unsupported tag surfaces as an error.
//!
//! ```rust
//! use optpage::{Field, Section, opt};
//!
//! let section = Section::new("section_1", "First section")
//!     .description("This section is the first one")
//!     .field(Field::yes_no("option_key_1", "Enable something")
//!         .description("This activates something"))
//!     .field(Field::select("option_key_2", "Choose something", vec![
//!         opt("blue", "Blue sea"),
//!         opt("red", "Red heart"),
//!         opt("yellow", "Yellow flower"),
//!     ]))
//!     .field(Field::number("option_key_3", "Pick a number"))
//!     .field(Field::text("option_key_4", "Enter some text"));
//!
//! assert_eq!(section.fields.len(), 4);
//! ```
//!
//! # Type Tags
//!
//! | tag | variant | widget |
//! |-----|---------|--------|
//! | `yesno` | [`FieldType::YesNo`] | Yes/No selector |
//! | `select` | [`FieldType::Select`] | selector over the declared options |
//! | `number` | [`FieldType::Number`] | single-line input, integer storage |
//! | `text` | [`FieldType::Text`] | single-line input |
//! | `textarea` | [`FieldType::TextArea`] | multi-line input |
//!
//! A declared field without a tag is a `text` field.

use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::LazyLock;

// =============================================================================
// Field Types
// =============================================================================

/// Closed set of field types a settings page can render
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "options", rename_all = "lowercase")]
pub enum FieldType {
    /// Two-option Yes/No selector, stored as `"true"` / `"false"`
    YesNo,
    /// Selector over a fixed, ordered list of options
    Select(Vec<SelectOption>),
    /// Single-line input whose stored value is an integer
    Number,
    /// Single-line text input
    Text,
    /// Multi-line text input
    TextArea,
}

impl FieldType {
    /// The tag this type is declared with in schema documents
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            FieldType::YesNo => "yesno",
            FieldType::Select(_) => "select",
            FieldType::Number => "number",
            FieldType::Text => "text",
            FieldType::TextArea => "textarea",
        }
    }

    /// How raw submitted text is coerced before storage
    #[must_use]
    pub fn sanitize(&self) -> Sanitize {
        match self {
            FieldType::Number => Sanitize::Integer,
            _ => Sanitize::Text,
        }
    }
}

// =============================================================================
// Sanitize Policy
// =============================================================================

static LEADING_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([+-]?\d+)").expect("static regex is valid"));

/// Coercion applied to a submitted value before it reaches the option store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sanitize {
    /// Store the raw text
    #[default]
    Text,
    /// Store the leading integer of the text; text without one is absent
    Integer,
}

impl Sanitize {
    /// Coerce raw submitted text into the value to store
    ///
    /// Returns `None` when the text carries no usable value (non-numeric integer input).
    ///
    /// # Example
    ///
    /// ```
    /// use optpage::Sanitize;
    /// use serde_json::json;
    ///
    /// assert_eq!(Sanitize::Integer.apply("42"), Some(json!(42)));
    /// assert_eq!(Sanitize::Integer.apply(" 7 apples"), Some(json!(7)));
    /// assert_eq!(Sanitize::Integer.apply("abc"), None);
    /// assert_eq!(Sanitize::Text.apply("abc"), Some(json!("abc")));
    /// ```
    #[must_use]
    pub fn apply(&self, raw: &str) -> Option<Value> {
        match self {
            Sanitize::Text => Some(Value::String(raw.to_string())),
            Sanitize::Integer => parse_integer(raw).map(Value::from),
        }
    }

    /// Read back a stored value under this policy
    ///
    /// Integer reads accept stored numbers and numeric text. Anything else is not trusted and
    /// reads as absent.
    #[must_use]
    pub fn read(&self, stored: &Value) -> Option<Value> {
        match (self, stored) {
            (_, Value::Null) => None,
            (Sanitize::Integer, Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
                .map(Value::from),
            (Sanitize::Integer, Value::String(s)) => parse_integer(s).map(Value::from),
            (Sanitize::Integer, _) => None,
            (Sanitize::Text, other) => Some(other.clone()),
        }
    }
}

// Digits beyond the i64 range saturate toward the sign.
fn parse_integer(raw: &str) -> Option<i64> {
    let digits = LEADING_INTEGER.captures(raw)?.get(1)?.as_str();
    match digits.parse::<i64>() {
        Ok(n) => Some(n),
        Err(_) if digits.starts_with('-') => Some(i64::MIN),
        Err(_) => Some(i64::MAX),
    }
}

// =============================================================================
// Select Option
// =============================================================================

/// Option for Select type fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Value to store
    pub value: String,
    /// Display label (translated at render time)
    pub label: String,
}

impl SelectOption {
    /// Create a select option
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Shorthand for creating a `SelectOption`
///
/// # Example
/// ```rust
/// use optpage::opt;
/// let options = vec![opt("blue", "Blue sea"), opt("red", "Red heart")];
/// ```
pub fn opt(value: impl Into<String>, label: impl Into<String>) -> SelectOption {
    SelectOption::new(value, label)
}

// =============================================================================
// Field
// =============================================================================

/// How a field's type is known
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Type fixed at construction
    Typed(FieldType),
    /// Raw tag from a schema document, resolved on use
    Declared {
        tag: Option<String>,
        options: Option<Vec<SelectOption>>,
    },
}

impl FieldKind {
    /// Coercion policy used when registering the field's storage key
    ///
    /// Never fails: an unresolvable tag registers as text and fails later, at render time.
    #[must_use]
    pub fn sanitize(&self) -> Sanitize {
        match self {
            FieldKind::Typed(ty) => ty.sanitize(),
            FieldKind::Declared { tag, .. } => match tag.as_deref() {
                Some("number") => Sanitize::Integer,
                _ => Sanitize::Text,
            },
        }
    }
}

/// One persisted, user-editable setting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Identifier, unique within the domain; the storage key
    pub id: String,
    /// Visible label
    pub label: String,
    /// Helper text rendered below the widget
    pub description: Option<String>,
    /// Field type, typed or declared
    pub kind: FieldKind,
}

impl Field {
    fn typed(id: impl Into<String>, label: impl Into<String>, ty: FieldType) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            description: None,
            kind: FieldKind::Typed(ty),
        }
    }

    /// Create a Yes/No field
    pub fn yes_no(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::typed(id, label, FieldType::YesNo)
    }

    /// Create a select field
    ///
    /// **Options are required** - you must provide them at construction time.
    pub fn select(
        id: impl Into<String>,
        label: impl Into<String>,
        options: Vec<SelectOption>,
    ) -> Self {
        Self::typed(id, label, FieldType::Select(options))
    }

    /// Create an integer field
    pub fn number(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::typed(id, label, FieldType::Number)
    }

    /// Create a single-line text field
    pub fn text(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::typed(id, label, FieldType::Text)
    }

    /// Create a multi-line text field
    pub fn textarea(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::typed(id, label, FieldType::TextArea)
    }

    /// Create a field from a raw type tag
    ///
    /// The tag is not checked here. See [`Field::field_type`].
    pub fn declared(
        id: impl Into<String>,
        label: impl Into<String>,
        tag: Option<impl Into<String>>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            description: None,
            kind: FieldKind::Declared {
                tag: tag.map(Into::into),
                options: None,
            },
        }
    }

    /// Attach options to a declared field
    ///
    /// Typed fields are left unchanged; their options are part of [`FieldType::Select`].
    #[must_use]
    pub fn with_options(mut self, options: Vec<SelectOption>) -> Self {
        if let FieldKind::Declared { options: slot, .. } = &mut self.kind {
            *slot = Some(options);
        }
        self
    }

    /// Set the helper text
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Resolve this field's type
    ///
    /// # Errors
    ///
    /// * `Error::UnsupportedFieldType` - declared tag is not one of the five known tags
    /// * `Error::InvalidSchema` - declared `select` without options
    pub fn field_type(&self) -> Result<FieldType> {
        match &self.kind {
            FieldKind::Typed(ty) => Ok(ty.clone()),
            FieldKind::Declared { tag, options } => match tag.as_deref().unwrap_or("text") {
                "yesno" => Ok(FieldType::YesNo),
                "select" => options
                    .clone()
                    .map(FieldType::Select)
                    .ok_or_else(|| Error::InvalidSchema {
                        field: self.id.clone(),
                        reason: "select field has no options".into(),
                    }),
                "number" => Ok(FieldType::Number),
                "text" => Ok(FieldType::Text),
                "textarea" => Ok(FieldType::TextArea),
                other => Err(Error::UnsupportedFieldType {
                    field: self.id.clone(),
                    tag: other.to_string(),
                }),
            },
        }
    }
}

// =============================================================================
// Section
// =============================================================================

/// A labeled, ordered group of fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Identifier, unique within the domain
    pub id: String,
    /// Visible heading
    pub label: String,
    /// Optional subheader
    pub description: Option<String>,
    /// Fields in display order
    pub fields: Vec<Field>,
}

impl Section {
    /// Create an empty section
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            description: None,
            fields: Vec::new(),
        }
    }

    /// Set the subheader
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append a field
    #[must_use]
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Append several fields
    #[must_use]
    pub fn fields(mut self, fields: impl IntoIterator<Item = Field>) -> Self {
        self.fields.extend(fields);
        self
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_typed_field_resolves() {
        let field = Field::select("color", "Color", vec![opt("blue", "Blue")]);
        assert_eq!(
            field.field_type().unwrap(),
            FieldType::Select(vec![opt("blue", "Blue")])
        );
        assert_eq!(Field::textarea("notes", "Notes").field_type().unwrap().tag(), "textarea");
    }

    #[test]
    fn test_declared_without_tag_is_text() {
        let field = Field::declared("option_key_4", "Enter some text", None::<String>);
        assert_eq!(field.field_type().unwrap(), FieldType::Text);
    }

    #[test]
    fn test_declared_unknown_tag() {
        let field = Field::declared("flag", "Flag", Some("checkbox"));
        match field.field_type() {
            Err(Error::UnsupportedFieldType { field, tag }) => {
                assert_eq!(field, "flag");
                assert_eq!(tag, "checkbox");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_declared_select_requires_options() {
        let bare = Field::declared("color", "Color", Some("select"));
        assert!(matches!(bare.field_type(), Err(Error::InvalidSchema { .. })));

        let with = bare.with_options(vec![opt("red", "Red")]);
        assert_eq!(with.field_type().unwrap().tag(), "select");
    }

    #[test]
    fn test_with_options_ignored_for_typed() {
        let field = Field::text("name", "Name").with_options(vec![opt("a", "A")]);
        assert_eq!(field.kind, FieldKind::Typed(FieldType::Text));
    }

    #[test]
    fn test_kind_sanitize_without_resolution() {
        assert_eq!(Field::number("n", "N").kind.sanitize(), Sanitize::Integer);
        assert_eq!(
            Field::declared("n", "N", Some("number")).kind.sanitize(),
            Sanitize::Integer
        );
        assert_eq!(
            Field::declared("c", "C", Some("checkbox")).kind.sanitize(),
            Sanitize::Text
        );
    }

    #[test]
    fn test_integer_coercion() {
        assert_eq!(Sanitize::Integer.apply("42"), Some(json!(42)));
        assert_eq!(Sanitize::Integer.apply("-3"), Some(json!(-3)));
        assert_eq!(Sanitize::Integer.apply("12abc"), Some(json!(12)));
        assert_eq!(Sanitize::Integer.apply("abc"), None);
        assert_eq!(Sanitize::Integer.apply(""), None);
    }

    #[test]
    fn test_integer_overflow_saturates() {
        assert_eq!(
            Sanitize::Integer.apply("99999999999999999999"),
            Some(json!(i64::MAX))
        );
        assert_eq!(
            Sanitize::Integer.apply("-99999999999999999999 apples"),
            Some(json!(i64::MIN))
        );
        assert_eq!(
            Sanitize::Integer.read(&json!("+99999999999999999999")),
            Some(json!(i64::MAX))
        );
    }

    #[test]
    fn test_integer_read_back() {
        assert_eq!(Sanitize::Integer.read(&json!(42)), Some(json!(42)));
        assert_eq!(Sanitize::Integer.read(&json!("42")), Some(json!(42)));
        assert_eq!(Sanitize::Integer.read(&json!("abc")), None);
        assert_eq!(Sanitize::Integer.read(&json!(true)), None);
        assert_eq!(Sanitize::Integer.read(&Value::Null), None);
    }

    #[test]
    fn test_text_read_keeps_empty_string() {
        assert_eq!(Sanitize::Text.read(&json!("")), Some(json!("")));
        assert_eq!(Sanitize::Text.read(&Value::Null), None);
    }

    #[test]
    fn test_section_builder_keeps_order() {
        let section = Section::new("s", "S")
            .field(Field::text("b", "B"))
            .fields([Field::text("a", "A"), Field::text("c", "C")]);
        let ids: Vec<_> = section.fields.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, ["b", "a", "c"]);
    }
}
