//! Translation and escaping

use std::borrow::Cow;
use std::collections::HashMap;

/// Translates visible strings within a text domain
pub trait Translator: Send + Sync {
    /// Translate `text` in `domain`, returning it unchanged when no translation exists
    fn translate<'a>(&'a self, text: &'a str, domain: &str) -> Cow<'a, str>;
}

/// Translator that returns every string unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct Untranslated;

impl Translator for Untranslated {
    fn translate<'a>(&'a self, text: &'a str, _domain: &str) -> Cow<'a, str> {
        Cow::Borrowed(text)
    }
}

/// In-memory message catalog, keyed by text domain then source string
///
/// # Example
///
/// ```rust
/// use optpage::{Catalog, Translator};
///
/// let catalog = Catalog::new()
///     .message("shop", "Settings Saved", "Einstellungen gespeichert");
///
/// assert_eq!(catalog.translate("Settings Saved", "shop"), "Einstellungen gespeichert");
/// assert_eq!(catalog.translate("Settings Saved", "blog"), "Settings Saved");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    domains: HashMap<String, HashMap<String, String>>,
}

impl Catalog {
    /// Create an empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a translation
    #[must_use]
    pub fn message(
        mut self,
        domain: impl Into<String>,
        source: impl Into<String>,
        translated: impl Into<String>,
    ) -> Self {
        self.domains
            .entry(domain.into())
            .or_default()
            .insert(source.into(), translated.into());
        self
    }
}

impl Translator for Catalog {
    fn translate<'a>(&'a self, text: &'a str, domain: &str) -> Cow<'a, str> {
        self.domains
            .get(domain)
            .and_then(|messages| messages.get(text))
            .map_or(Cow::Borrowed(text), |t| Cow::Borrowed(t.as_str()))
    }
}

/// Escapes strings before they are written into markup
pub trait Escaper: Send + Sync {
    /// Escape text placed between tags
    fn html(&self, text: &str) -> String;

    /// Escape text placed inside a double-quoted attribute value
    fn attr(&self, text: &str) -> String;
}

/// Default HTML escaper
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlEscaper;

impl Escaper for HtmlEscaper {
    fn html(&self, text: &str) -> String {
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&#039;")
    }

    fn attr(&self, text: &str) -> String {
        self.html(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escaper() {
        let esc = HtmlEscaper;
        assert_eq!(
            esc.html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#039;Jerry&#039;&lt;/b&gt;"
        );
        assert_eq!(esc.attr("a\"b"), "a&quot;b");
        assert_eq!(esc.html("plain"), "plain");
    }

    #[test]
    fn test_untranslated() {
        assert_eq!(Untranslated.translate("Yes", "shop"), "Yes");
    }

    #[test]
    fn test_catalog_scoped_by_domain() {
        let catalog = Catalog::new()
            .message("shop", "Yes", "Ja")
            .message("blog", "Yes", "Oui");

        assert_eq!(catalog.translate("Yes", "shop"), "Ja");
        assert_eq!(catalog.translate("Yes", "blog"), "Oui");
        assert_eq!(catalog.translate("No", "shop"), "No");
    }
}
