//! Pending admin notices per domain

use crate::render::layout::Notice;
use crate::sync::RwLockExt;
use std::collections::HashMap;
use std::sync::RwLock;

/// Notices waiting to be shown on a domain's next page view
///
/// Showing notices drains them, so each one is displayed once.
#[derive(Debug, Default)]
pub(crate) struct NoticeBoard {
    pending: RwLock<HashMap<String, Vec<Notice>>>,
}

impl NoticeBoard {
    /// Queue a notice; a notice with the same code replaces the earlier one
    pub(crate) fn add(&self, domain: &str, notice: Notice) {
        let mut pending = self.pending.write_recovered();
        let queue = pending.entry(domain.to_string()).or_default();
        match queue.iter_mut().find(|n| n.code == notice.code) {
            Some(existing) => *existing = notice,
            None => queue.push(notice),
        }
    }

    /// Remove and return the notices queued for a domain
    pub(crate) fn take(&self, domain: &str) -> Vec<Notice> {
        self.pending
            .write_recovered()
            .remove(domain)
            .unwrap_or_default()
    }
}
