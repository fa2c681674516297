//! Settings page controller
//!
//! [`SettingsPages`] serves every registered domain's admin page:
//!
//! - [`bootstrap`](SettingsPages::bootstrap) wires menu entries and store keys, once
//! - [`render_page`](SettingsPages::render_page) renders a page view
//! - [`handle_submit`](SettingsPages::handle_submit) stores a posted form and names the redirect

mod builder;
mod notices;
mod submit;

pub use builder::SettingsPagesBuilder;
pub use submit::SubmitOutcome;

use crate::config::PagesConfig;
use crate::error::{Error, Result};
use crate::host::{Escaper, MenuPage, MenuRegistrar, PageRequest, Translator};
use crate::persistence::OptionsBridge;
use crate::registry::{Domain, SchemaRegistry};
use crate::render::FieldRenderer;
use crate::render::layout::{self, Notice, NoticeKind};
use crate::sync::RwLockExt;
use log::{debug, error, info};
use notices::NoticeBoard;
use std::collections::HashSet;
use std::sync::{Arc, RwLock};

/// A field that could not be rendered or stored
#[derive(Debug)]
pub struct FieldError {
    /// Section holding the field
    pub section: String,
    /// Field id
    pub field: String,
    /// What went wrong
    pub error: Error,
}

/// Result of a page view
#[derive(Debug, Default)]
pub struct PageOutput {
    /// Page markup; empty when the caller may not see the page
    pub markup: String,
    /// Fields left out of the markup, in page order
    pub field_errors: Vec<FieldError>,
}

impl PageOutput {
    /// Whether nothing was emitted
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markup.is_empty()
    }
}

/// Admin settings pages for all domains of a registry
///
/// # Example
///
/// ```rust
/// use optpage::{Caller, Field, MemoryStore, MenuRecorder, PageRequest, SchemaRegistry, Section, SettingsPages};
/// use std::sync::Arc;
///
/// let registry = Arc::new(SchemaRegistry::new());
/// registry.register_domain("Shop Settings", "shop", vec![
///     Section::new("general", "General").field(Field::yes_no("shop_open", "Open")),
/// ]);
///
/// let pages = SettingsPages::builder(registry, Arc::new(MemoryStore::new())).build();
/// let menu = MenuRecorder::new();
/// pages.bootstrap(&menu)?;
///
/// let output = pages.render_page(&PageRequest::new("shop-page", Caller::administrator()))?;
/// assert!(output.markup.contains("<h1>Shop Settings</h1>"));
/// # Ok::<(), optpage::Error>(())
/// ```
pub struct SettingsPages {
    pub(crate) registry: Arc<SchemaRegistry>,
    pub(crate) bridge: OptionsBridge,
    pub(crate) config: PagesConfig,
    pub(crate) translator: Arc<dyn Translator>,
    pub(crate) escaper: Arc<dyn Escaper>,
    notices: NoticeBoard,
    /// Slugs whose menu page and keys are wired; held for the whole bootstrap
    wired: RwLock<HashSet<String>>,
    bootstrapped: RwLock<bool>,
}

impl std::fmt::Debug for SettingsPages {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsPages")
            .field("domains", &self.registry.len())
            .field("bridge", &self.bridge)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SettingsPages {
    /// Create a builder over a registry and the host's option store
    pub fn builder(
        registry: Arc<SchemaRegistry>,
        store: Arc<dyn crate::store::OptionStore>,
    ) -> SettingsPagesBuilder {
        SettingsPagesBuilder::new(registry, store)
    }

    /// The domain registry
    pub fn registry(&self) -> &Arc<SchemaRegistry> {
        &self.registry
    }

    /// The persistence bridge (store access and change events)
    pub fn bridge(&self) -> &OptionsBridge {
        &self.bridge
    }

    /// The controller configuration
    pub fn config(&self) -> &PagesConfig {
        &self.config
    }

    fn t<'a>(&'a self, text: &'a str, domain: &str) -> std::borrow::Cow<'a, str> {
        self.translator.translate(text, domain)
    }

    /// Wire every registered domain into the host: one menu page each, and every field's store
    /// key registered under the domain
    ///
    /// Call once at startup after plugins registered their domains. Later calls do nothing and
    /// return `false`. If wiring fails part-way, the next call resumes with the domains not yet
    /// wired; no menu page is added twice.
    ///
    /// The registrar may query [`is_bootstrapped`](SettingsPages::is_bootstrapped) but must not
    /// call `bootstrap` itself.
    ///
    /// # Errors
    ///
    /// Returns the first menu or store registration error.
    pub fn bootstrap(&self, menu: &dyn MenuRegistrar) -> Result<bool> {
        let mut wired = self.wired.write_recovered();
        if self.is_bootstrapped() {
            debug!("Settings pages already bootstrapped");
            return Ok(false);
        }

        let mut keys = 0;
        let mut pages = 0;
        for domain in self.registry.domains() {
            let slug = self.config.page_slug(&domain.id);
            if wired.contains(&slug) {
                continue;
            }

            keys += self.bridge.register_domain(&domain)?;
            menu.add_menu_page(MenuPage {
                page_title: domain.title.clone(),
                menu_title: self.t(&domain.title, &domain.id).into_owned(),
                capability: self.config.capability.clone(),
                slug: slug.clone(),
            })?;
            wired.insert(slug);
            pages += 1;
        }

        *self.bootstrapped.write_recovered() = true;
        info!("Bootstrapped {pages} settings pages with {keys} option keys");
        Ok(true)
    }

    /// Whether [`bootstrap`](SettingsPages::bootstrap) has completed
    #[must_use]
    pub fn is_bootstrapped(&self) -> bool {
        *self.bootstrapped.read_recovered()
    }

    /// Queue a notice for the domain's next page view
    ///
    /// # Errors
    ///
    /// Returns `Error::DomainNotFound` if no domain is registered under `domain`.
    pub fn add_notice(&self, domain: &str, notice: Notice) -> Result<()> {
        if self.registry.get(domain).is_none() {
            return Err(Error::DomainNotFound(domain.to_string()));
        }
        self.notices.add(domain, notice);
        Ok(())
    }

    fn resolve_domain(&self, request: &PageRequest) -> Result<Arc<Domain>> {
        let page = request.page.as_deref().ok_or(Error::MissingPage)?;
        self.config
            .domain_for_page(page)
            .and_then(|id| self.registry.get(id))
            .ok_or_else(|| Error::DomainNotFound(page.to_string()))
    }

    /// Render a settings page view
    ///
    /// Callers without the configured capability get an empty output. A request flagged as the
    /// post-save redirect shows the saved acknowledgment once. Fields that fail to render are left
    /// out and reported in [`PageOutput::field_errors`]; the rest of the page renders normally.
    ///
    /// # Errors
    ///
    /// * `Error::MissingPage` - the request names no page
    /// * `Error::DomainNotFound` - the page does not belong to a registered domain
    pub fn render_page(&self, request: &PageRequest) -> Result<PageOutput> {
        if !request.caller.can(&self.config.capability) {
            debug!("Caller lacks '{}', page not rendered", self.config.capability);
            return Ok(PageOutput::default());
        }

        let domain = self.resolve_domain(request)?;
        debug!("Rendering settings page for domain '{}'", domain.id);

        if request.settings_updated {
            self.notices.add(
                &domain.id,
                Notice {
                    code: format!("{}-message", domain.id),
                    message: self.t(&self.config.saved_message, &domain.id).into_owned(),
                    kind: NoticeKind::Updated,
                },
            );
        }

        let esc = self.escaper.as_ref();
        let mut markup = layout::notices(esc, &self.notices.take(&domain.id));
        let (body, field_errors) = self.render_sections(&domain);

        markup.push_str(&layout::page(
            esc,
            &self.t(&domain.title, &domain.id),
            &self.config.form_action,
            &domain.id,
            &body,
            &self.t(&self.config.submit_label, &domain.id),
        ));

        Ok(PageOutput {
            markup,
            field_errors,
        })
    }

    fn render_sections(&self, domain: &Domain) -> (String, Vec<FieldError>) {
        let esc = self.escaper.as_ref();
        let renderer = FieldRenderer::new(self.translator.as_ref(), esc, &domain.id);
        let mut body = String::new();
        let mut errors = Vec::new();

        for section in &domain.sections {
            let mut rows = String::new();
            for field in &section.fields {
                let name = self.bridge.storage_key(&domain.id, &field.id);
                let widget = field.field_type().and_then(|field_type| {
                    let current = self.bridge.get(&domain.id, field)?;
                    Ok(renderer.render(&name, field, &field_type, current.as_ref()))
                });

                match widget {
                    Ok(widget) => rows.push_str(&layout::field_row(
                        esc,
                        &name,
                        &self.t(&field.label, &domain.id),
                        &widget,
                    )),
                    Err(e) => {
                        error!(
                            "Field '{}' in section '{}' of domain '{}' not rendered: {}",
                            field.id, section.id, domain.id, e
                        );
                        errors.push(FieldError {
                            section: section.id.clone(),
                            field: field.id.clone(),
                            error: e,
                        });
                    }
                }
            }

            body.push_str(&layout::section(
                esc,
                &section.id,
                &self.t(&section.label, &domain.id),
                section
                    .description
                    .as_deref()
                    .map(|d| self.t(d, &domain.id))
                    .as_deref(),
                &rows,
            ));
        }

        (body, errors)
    }
}
