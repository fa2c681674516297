//! Request-scoped inputs to the page controller

use std::collections::{HashMap, HashSet};

/// The user making a request, as far as permissions go
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Caller {
    capabilities: HashSet<String>,
}

impl Caller {
    /// Caller without any capability
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Caller holding `manage_options`
    #[must_use]
    pub fn administrator() -> Self {
        Self::default().with_capability("manage_options")
    }

    /// Grant a capability
    #[must_use]
    pub fn with_capability(mut self, capability: impl Into<String>) -> Self {
        self.capabilities.insert(capability.into());
        self
    }

    /// Whether the caller holds a capability
    #[must_use]
    pub fn can(&self, capability: &str) -> bool {
        self.capabilities.contains(capability)
    }
}

/// A request to view a settings page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    /// Requested page slug (`{domain}-page` by default)
    pub page: Option<String>,
    /// Set by the host on the redirect that follows a successful save
    pub settings_updated: bool,
    /// Who is asking
    pub caller: Caller,
}

impl PageRequest {
    /// Request for a page slug
    pub fn new(page: impl Into<String>, caller: Caller) -> Self {
        Self {
            page: Some(page.into()),
            settings_updated: false,
            caller,
        }
    }

    /// Mark this request as the redirect after a save
    #[must_use]
    pub fn settings_updated(mut self, updated: bool) -> Self {
        self.settings_updated = updated;
        self
    }

    /// Build a request from a URL query string
    ///
    /// Reads `page` and the presence of `settings-updated`. A leading `?` is ignored.
    ///
    /// # Example
    ///
    /// ```rust
    /// use optpage::{Caller, PageRequest};
    ///
    /// let req = PageRequest::from_query(
    ///     "?page=examplesettings-page&settings-updated=true",
    ///     Caller::administrator(),
    /// );
    /// assert_eq!(req.page.as_deref(), Some("examplesettings-page"));
    /// assert!(req.settings_updated);
    /// ```
    pub fn from_query(query: &str, caller: Caller) -> Self {
        let mut request = Self {
            caller,
            ..Self::default()
        };

        for (name, value) in parse_query(query) {
            match name.as_str() {
                "page" => request.page = Some(value),
                "settings-updated" => request.settings_updated = true,
                _ => {}
            }
        }
        request
    }
}

/// A settings form posted back by the browser
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitRequest {
    /// Domain the form belongs to (the hidden `option_page` input)
    pub option_page: String,
    /// Posted inputs, by input name (the store key)
    pub values: HashMap<String, String>,
    /// Who is submitting
    pub caller: Caller,
}

impl SubmitRequest {
    /// Submission for a domain
    pub fn new(option_page: impl Into<String>, caller: Caller) -> Self {
        Self {
            option_page: option_page.into(),
            values: HashMap::new(),
            caller,
        }
    }

    /// Add a posted input
    #[must_use]
    pub fn value(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Build a submission from an `application/x-www-form-urlencoded` body
    ///
    /// `option_page` is taken from the body. Later duplicates of a name win.
    pub fn from_form(body: &str, caller: Caller) -> Self {
        let mut request = Self::new(String::new(), caller);
        for (name, value) in parse_query(body) {
            if name == "option_page" {
                request.option_page = value;
            } else {
                request.values.insert(name, value);
            }
        }
        request
    }
}

fn parse_query(query: &str) -> impl Iterator<Item = (String, String)> + '_ {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode(name), decode(value))
        })
}

fn decode(component: &str) -> String {
    let spaced = component.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| component.replace('+', " "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caller_capabilities() {
        assert!(Caller::administrator().can("manage_options"));
        assert!(!Caller::anonymous().can("manage_options"));
        assert!(Caller::anonymous().with_capability("edit").can("edit"));
    }

    #[test]
    fn test_from_query_plain_view() {
        let req = PageRequest::from_query("page=shop-page", Caller::anonymous());
        assert_eq!(req.page.as_deref(), Some("shop-page"));
        assert!(!req.settings_updated);
    }

    #[test]
    fn test_from_query_without_page() {
        let req = PageRequest::from_query("", Caller::anonymous());
        assert_eq!(req.page, None);
    }

    #[test]
    fn test_from_form_decodes() {
        let form = SubmitRequest::from_form(
            "option_page=shop&option_key_4=hello+world%21&notes=a%0Ab&action=update",
            Caller::administrator(),
        );
        assert_eq!(form.option_page, "shop");
        assert_eq!(form.values["option_key_4"], "hello world!");
        assert_eq!(form.values["notes"], "a\nb");
    }
}
