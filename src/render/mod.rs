//! Field widgets and page markup
//!
//! [`FieldRenderer`] turns one field plus its stored value into a form widget. The
//! [`layout`] functions wrap widgets into rows, sections and the page frame.
//!
//! Every visible string goes through the host [`Translator`] and every emitted string through the
//! host [`Escaper`].

pub mod layout;

use crate::config::{Field, FieldType};
use crate::error::Result;
use crate::host::{Escaper, Translator};
use crate::persistence::value_text;
use serde_json::Value;
use std::borrow::Cow;
use std::fmt::Write;

/// Stored value of a Yes/No field when "Yes" is chosen
pub const YES_VALUE: &str = "true";
/// Stored value of a Yes/No field when "No" is chosen; also the unset default
pub const NO_VALUE: &str = "false";

/// Renders form widgets for one text domain
///
/// # Example
///
/// ```rust
/// use optpage::{Field, FieldRenderer, HtmlEscaper, Untranslated};
///
/// let renderer = FieldRenderer::new(&Untranslated, &HtmlEscaper, "shop");
/// let field = Field::yes_no("shop_open", "Open");
///
/// let html = renderer.render_field("shop_open", &field, None)?;
/// assert!(html.contains(r#"<option value="false" selected="selected">No</option>"#));
/// # Ok::<(), optpage::Error>(())
/// ```
pub struct FieldRenderer<'a> {
    translator: &'a dyn Translator,
    escaper: &'a dyn Escaper,
    text_domain: &'a str,
}

impl<'a> FieldRenderer<'a> {
    /// Create a renderer translating within `text_domain`
    pub fn new(
        translator: &'a dyn Translator,
        escaper: &'a dyn Escaper,
        text_domain: &'a str,
    ) -> Self {
        Self {
            translator,
            escaper,
            text_domain,
        }
    }

    fn t<'s>(&'s self, text: &'s str) -> Cow<'s, str> {
        self.translator.translate(text, self.text_domain)
    }

    /// Resolve the field's type and render it
    ///
    /// # Errors
    ///
    /// Returns the resolution error of [`Field::field_type`] for declared fields with an
    /// unsupported or incomplete type.
    pub fn render_field(
        &self,
        name: &str,
        field: &Field,
        current: Option<&Value>,
    ) -> Result<String> {
        let field_type = field.field_type()?;
        Ok(self.render(name, field, &field_type, current))
    }

    /// Render the widget for a resolved field type, followed by the field description
    ///
    /// `name` is the input name and id (the field's store key).
    pub fn render(
        &self,
        name: &str,
        field: &Field,
        field_type: &FieldType,
        current: Option<&Value>,
    ) -> String {
        let current = current
            .and_then(|value| field_type.sanitize().read(value))
            .and_then(|value| value_text(&value));

        let mut html = match field_type {
            FieldType::YesNo => {
                let options = [(YES_VALUE, self.t("Yes")), (NO_VALUE, self.t("No"))];
                let selected = match current.as_deref() {
                    Some(YES_VALUE) => YES_VALUE,
                    _ => NO_VALUE,
                };
                self.select(name, options, Some(selected))
            }
            FieldType::Select(options) => self.select(
                name,
                options
                    .iter()
                    .map(|opt| (opt.value.as_str(), self.t(&opt.label))),
                current.as_deref(),
            ),
            FieldType::Number => self.text_input(name, current.as_deref(), "small-text"),
            FieldType::Text => self.text_input(name, current.as_deref(), "regular-text"),
            FieldType::TextArea => self.textarea(name, current.as_deref()),
        };

        if let Some(description) = &field.description {
            let _ = write!(
                html,
                "\n<p class=\"description\">{}</p>",
                self.escaper.html(&self.t(description))
            );
        }
        html
    }

    fn select<'o>(
        &self,
        name: &str,
        options: impl IntoIterator<Item = (&'o str, Cow<'o, str>)>,
        selected: Option<&str>,
    ) -> String {
        let name = self.escaper.attr(name);
        let mut html = format!("<select id=\"{name}\" name=\"{name}\">\n");
        for (value, label) in options {
            let marker = if selected == Some(value) {
                " selected=\"selected\""
            } else {
                ""
            };
            let _ = writeln!(
                html,
                "<option value=\"{}\"{marker}>{}</option>",
                self.escaper.attr(value),
                self.escaper.html(&label)
            );
        }
        html.push_str("</select>");
        html
    }

    fn text_input(&self, name: &str, value: Option<&str>, class: &str) -> String {
        let name = self.escaper.attr(name);
        format!(
            "<input type=\"text\" id=\"{name}\" name=\"{name}\" value=\"{}\" class=\"{class}\" />",
            self.escaper.attr(value.unwrap_or_default())
        )
    }

    fn textarea(&self, name: &str, value: Option<&str>) -> String {
        let name = self.escaper.attr(name);
        format!(
            "<textarea id=\"{name}\" name=\"{name}\" rows=\"5\" cols=\"50\" class=\"large-text\">{}</textarea>",
            self.escaper.html(value.unwrap_or_default())
        )
    }
}

// =============================================================================
// Tests
// =============================================================================
