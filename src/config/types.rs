//! Configuration for the settings page controller

use serde::{Deserialize, Serialize};

/// How a field id maps to its option store key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyStrategy {
    /// The field id is the key. Two domains declaring the same field id share one stored value.
    #[default]
    Bare,
    /// Keys are `{domain}_{field}`, so equal field ids in different domains stay apart
    DomainPrefixed,
}

impl KeyStrategy {
    /// Store key for a field of a domain
    ///
    /// # Example
    /// ```rust
    /// use optpage::KeyStrategy;
    ///
    /// assert_eq!(KeyStrategy::Bare.key("shop", "color"), "color");
    /// assert_eq!(KeyStrategy::DomainPrefixed.key("shop", "color"), "shop_color");
    /// ```
    #[must_use]
    pub fn key(&self, domain: &str, field_id: &str) -> String {
        match self {
            KeyStrategy::Bare => field_id.to_string(),
            KeyStrategy::DomainPrefixed => format!("{domain}_{field_id}"),
        }
    }
}

/// Configuration for [`SettingsPages`](crate::SettingsPages)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagesConfig {
    /// Capability a caller needs to view or submit a page
    pub capability: String,

    /// Appended to the domain id to form the page slug
    pub page_suffix: String,

    /// Endpoint the settings form posts to
    pub form_action: String,

    /// Admin page URL used for post-submit redirects
    pub admin_url: String,

    /// Field id → store key mapping
    pub key_strategy: KeyStrategy,

    /// Label of the submit button (translated per domain)
    pub submit_label: String,

    /// Acknowledgment shown after a save (translated per domain)
    pub saved_message: String,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            capability: "manage_options".into(),
            page_suffix: "-page".into(),
            form_action: "options.php".into(),
            admin_url: "admin.php".into(),
            key_strategy: KeyStrategy::Bare,
            submit_label: "Save Settings".into(),
            saved_message: "Settings Saved".into(),
        }
    }
}

impl PagesConfig {
    /// Create a new builder for PagesConfig
    ///
    /// # Example
    /// ```rust
    /// use optpage::{KeyStrategy, PagesConfig};
    ///
    /// let config = PagesConfig::builder()
    ///     .capability("edit_settings")
    ///     .key_strategy(KeyStrategy::DomainPrefixed)
    ///     .build();
    /// assert_eq!(config.capability, "edit_settings");
    /// ```
    pub fn builder() -> PagesConfigBuilder {
        PagesConfigBuilder::default()
    }

    /// Page slug for a domain
    #[must_use]
    pub fn page_slug(&self, domain: &str) -> String {
        format!("{domain}{}", self.page_suffix)
    }

    /// Domain id for a page slug, if the slug carries the configured suffix
    #[must_use]
    pub fn domain_for_page<'a>(&self, page: &'a str) -> Option<&'a str> {
        page.strip_suffix(self.page_suffix.as_str())
            .filter(|domain| !domain.is_empty())
    }
}

/// Builder for creating PagesConfig with a fluent API
#[derive(Debug, Clone, Default)]
pub struct PagesConfigBuilder {
    config: PagesConfig,
}

impl PagesConfigBuilder {
    /// Capability required to view or submit (default: `manage_options`)
    pub fn capability(mut self, capability: impl Into<String>) -> Self {
        self.config.capability = capability.into();
        self
    }

    /// Page slug suffix (default: `-page`)
    pub fn page_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.config.page_suffix = suffix.into();
        self
    }

    /// Form post endpoint (default: `options.php`)
    pub fn form_action(mut self, action: impl Into<String>) -> Self {
        self.config.form_action = action.into();
        self
    }

    /// Redirect base after a submit (default: `admin.php`)
    pub fn admin_url(mut self, url: impl Into<String>) -> Self {
        self.config.admin_url = url.into();
        self
    }

    /// Store key strategy (default: [`KeyStrategy::Bare`])
    pub fn key_strategy(mut self, strategy: KeyStrategy) -> Self {
        self.config.key_strategy = strategy;
        self
    }

    /// Submit button label (default: `Save Settings`)
    pub fn submit_label(mut self, label: impl Into<String>) -> Self {
        self.config.submit_label = label.into();
        self
    }

    /// Saved acknowledgment text (default: `Settings Saved`)
    pub fn saved_message(mut self, message: impl Into<String>) -> Self {
        self.config.saved_message = message.into();
        self
    }

    /// Build the PagesConfig
    pub fn build(self) -> PagesConfig {
        self.config
    }
}
