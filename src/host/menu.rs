//! Admin menu registration

use crate::error::Result;
use crate::sync::RwLockExt;
use std::sync::RwLock;

/// One admin menu entry pointing at a settings page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuPage {
    /// Browser/page title (untranslated)
    pub page_title: String,
    /// Menu label (translated)
    pub menu_title: String,
    /// Capability required to see the entry
    pub capability: String,
    /// Page slug the host routes back to the controller
    pub slug: String,
}

/// Host facility that adds admin menu entries
pub trait MenuRegistrar {
    /// Add one menu entry
    ///
    /// # Errors
    ///
    /// Returns `Error::Menu` if the host rejects the entry.
    fn add_menu_page(&self, page: MenuPage) -> Result<()>;
}

/// Menu registrar that records entries in memory
///
/// Useful for hosts that build their navigation after bootstrap, and for tests.
#[derive(Debug, Default)]
pub struct MenuRecorder {
    pages: RwLock<Vec<MenuPage>>,
}

impl MenuRecorder {
    /// Create an empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded entries in registration order
    #[must_use]
    pub fn pages(&self) -> Vec<MenuPage> {
        self.pages.read_recovered().clone()
    }

    /// Entry for a slug
    #[must_use]
    pub fn find(&self, slug: &str) -> Option<MenuPage> {
        self.pages
            .read_recovered()
            .iter()
            .find(|page| page.slug == slug)
            .cloned()
    }
}

impl MenuRegistrar for MenuRecorder {
    fn add_menu_page(&self, page: MenuPage) -> Result<()> {
        self.pages.write_recovered().push(page);
        Ok(())
    }
}
