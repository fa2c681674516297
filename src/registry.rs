//! Registry of settings domains
//!
//! Plugins register their domains once during application startup. Page rendering then reads the
//! registry from any number of requests.

use crate::config::{DomainDocument, Section};
use crate::sync::RwLockExt;
use log::{debug, warn};
use std::sync::{Arc, RwLock};

/// A single plugin's settings namespace, rendered as one admin page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domain {
    /// Unique identifier; also the translation text domain
    pub id: String,
    /// Page and menu title
    pub title: String,
    /// Sections in display order
    pub sections: Vec<Section>,
}

impl Domain {
    /// Iterate over every field of the domain in display order, with its section
    pub fn fields(&self) -> impl Iterator<Item = (&Section, &crate::config::Field)> {
        self.sections
            .iter()
            .flat_map(|section| section.fields.iter().map(move |field| (section, field)))
    }

    /// Find a field by id
    #[must_use]
    pub fn field(&self, field_id: &str) -> Option<&crate::config::Field> {
        self.fields()
            .map(|(_, field)| field)
            .find(|field| field.id == field_id)
    }
}

/// Store of registered settings domains, in registration order
///
/// # Example
///
/// ```rust
/// use optpage::{Field, SchemaRegistry, Section};
///
/// let registry = SchemaRegistry::new();
/// registry.register_domain("Shop Settings", "shop", vec![
///     Section::new("general", "General").field(Field::yes_no("shop_open", "Open")),
/// ]);
///
/// let ids: Vec<_> = registry.domains().map(|d| d.id.clone()).collect();
/// assert_eq!(ids, ["shop"]);
/// ```
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    domains: RwLock<Vec<Arc<Domain>>>,
}

impl SchemaRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a domain, replacing any domain already registered under `id`
    ///
    /// A replaced domain keeps its position in the registration order. Field shapes are not
    /// checked here; declared fields with bad tags fail when rendered.
    pub fn register_domain(
        &self,
        title: impl Into<String>,
        id: impl Into<String>,
        sections: Vec<Section>,
    ) -> Arc<Domain> {
        let domain = Arc::new(Domain {
            id: id.into(),
            title: title.into(),
            sections,
        });

        let mut domains = self.domains.write_recovered();
        warn_on_shared_fields(&domains, &domain);

        match domains.iter_mut().find(|existing| existing.id == domain.id) {
            Some(slot) => {
                debug!("Replacing settings domain '{}'", domain.id);
                *slot = Arc::clone(&domain);
            }
            None => {
                debug!("Registering settings domain '{}'", domain.id);
                domains.push(Arc::clone(&domain));
            }
        }

        domain
    }

    /// Register a domain described by a schema document
    pub fn register_document(
        &self,
        title: impl Into<String>,
        id: impl Into<String>,
        document: DomainDocument,
    ) -> Arc<Domain> {
        self.register_domain(title, id, document.into_sections())
    }

    /// Registered domains in registration order
    ///
    /// The iterator works on a snapshot taken at call time; call again to restart.
    #[must_use]
    pub fn domains(&self) -> Domains {
        Domains {
            inner: self.domains.read_recovered().clone().into_iter(),
        }
    }

    /// Look up a domain by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Arc<Domain>> {
        self.domains
            .read_recovered()
            .iter()
            .find(|domain| domain.id == id)
            .cloned()
    }

    /// Number of registered domains
    #[must_use]
    pub fn len(&self) -> usize {
        self.domains.read_recovered().len()
    }

    /// Whether no domain has been registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.domains.read_recovered().is_empty()
    }
}

/// Iterator over registered domains, see [`SchemaRegistry::domains`]
#[derive(Debug, Clone)]
pub struct Domains {
    inner: std::vec::IntoIter<Arc<Domain>>,
}

impl Iterator for Domains {
    type Item = Arc<Domain>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Domains {}

// Field ids double as bare store keys, so equal ids in two domains alias one value.
fn warn_on_shared_fields(existing: &[Arc<Domain>], incoming: &Domain) {
    for other in existing.iter().filter(|d| d.id != incoming.id) {
        for (_, field) in incoming.fields() {
            if other.field(&field.id).is_some() {
                warn!(
                    "Field '{}' of domain '{}' is also declared by domain '{}'; with bare keys they share one stored value",
                    field.id, incoming.id, other.id
                );
            }
        }
    }
}
