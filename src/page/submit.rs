//! Form submission handling

use super::{FieldError, SettingsPages};
use crate::error::{Error, Result};
use log::{debug, error, info};

/// What a form submission changed
#[derive(Debug)]
pub struct SubmitOutcome {
    /// Where the host should redirect the browser: the domain's page, flagged as saved
    pub redirect: String,
    /// Store keys written (or cleared) by the submission
    pub saved: Vec<String>,
    /// Posted fields that could not be stored
    pub errors: Vec<FieldError>,
}

impl SettingsPages {
    /// Store a posted settings form
    ///
    /// Every field of the domain whose store key was posted is coerced and written. Fields missing
    /// from the form keep their stored value. Returns `None` when the caller lacks the configured
    /// capability; nothing is written then.
    ///
    /// # Example
    ///
    /// ```rust
    /// use optpage::{Caller, Field, MemoryStore, SchemaRegistry, Section, SettingsPages, SubmitRequest};
    /// use std::sync::Arc;
    ///
    /// let registry = Arc::new(SchemaRegistry::new());
    /// registry.register_domain("Shop", "shop", vec![
    ///     Section::new("general", "General").field(Field::text("greeting", "Greeting")),
    /// ]);
    /// let pages = SettingsPages::builder(registry, Arc::new(MemoryStore::new())).build();
    ///
    /// let form = SubmitRequest::new("shop", Caller::administrator()).value("greeting", "Hello");
    /// let outcome = pages.handle_submit(&form)?.unwrap();
    /// assert_eq!(outcome.redirect, "admin.php?page=shop-page&settings-updated=true");
    /// # Ok::<(), optpage::Error>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `Error::DomainNotFound` if `option_page` names no registered domain. Failures of
    /// single fields are reported in [`SubmitOutcome::errors`] instead.
    pub fn handle_submit(
        &self,
        request: &crate::host::SubmitRequest,
    ) -> Result<Option<SubmitOutcome>> {
        if !request.caller.can(&self.config.capability) {
            debug!(
                "Caller lacks '{}', submission for '{}' ignored",
                self.config.capability, request.option_page
            );
            return Ok(None);
        }

        let domain = self
            .registry
            .get(&request.option_page)
            .ok_or_else(|| Error::DomainNotFound(request.option_page.clone()))?;

        let mut saved = Vec::new();
        let mut errors = Vec::new();
        for (section, field) in domain.fields() {
            let key = self.bridge.storage_key(&domain.id, &field.id);
            let Some(raw) = request.values.get(&key) else {
                continue;
            };

            match self.bridge.set(&domain.id, field, raw) {
                Ok(_) => saved.push(key),
                Err(e) => {
                    error!("Failed to store option '{key}' of domain '{}': {e}", domain.id);
                    errors.push(FieldError {
                        section: section.id.clone(),
                        field: field.id.clone(),
                        error: e,
                    });
                }
            }
        }

        info!(
            "Saved {} options for domain '{}' ({} failed)",
            saved.len(),
            domain.id,
            errors.len()
        );

        Ok(Some(SubmitOutcome {
            redirect: format!(
                "{}?page={}&settings-updated=true",
                self.config.admin_url,
                urlencoding::encode(&self.config.page_slug(&domain.id))
            ),
            saved,
            errors,
        }))
    }
}
