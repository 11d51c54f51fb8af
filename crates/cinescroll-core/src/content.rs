//! Arrival barrier for asynchronously loaded content.
//!
//! The loader reports each id as loaded or failed; once every id has been
//! reported the manifest is settled and layout can run on whatever arrived.
//! Layout itself never waits on loading.

use crate::layout::ContentId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentStatus {
    Pending,
    Loaded,
    Failed,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ContentManifest {
    statuses: Vec<ContentStatus>,
}

impl ContentManifest {
    pub fn new(expected: usize) -> Self {
        Self {
            statuses: vec![ContentStatus::Pending; expected],
        }
    }

    #[inline]
    pub fn expected(&self) -> usize {
        self.statuses.len()
    }

    /// Record a successful load. Returns true when this report settled the manifest.
    pub fn record_loaded(&mut self, id: ContentId) -> bool {
        self.record(id, ContentStatus::Loaded)
    }

    /// Record a failed load. Returns true when this report settled the manifest.
    pub fn record_failed(&mut self, id: ContentId) -> bool {
        self.record(id, ContentStatus::Failed)
    }

    fn record(&mut self, id: ContentId, status: ContentStatus) -> bool {
        let was_settled = self.is_settled();
        match self.statuses.get_mut(id as usize) {
            Some(slot) if *slot == ContentStatus::Pending => {
                *slot = status;
                if status == ContentStatus::Failed {
                    log::warn!("[content] failed to load content {id}");
                }
            }
            Some(_) => {
                log::warn!("[content] duplicate report for content {id} ignored");
                return false;
            }
            None => {
                log::warn!(
                    "[content] report for unknown content {id} ignored (expected {})",
                    self.statuses.len()
                );
                return false;
            }
        }
        !was_settled && self.is_settled()
    }

    pub fn status(&self, id: ContentId) -> Option<ContentStatus> {
        self.statuses.get(id as usize).copied()
    }

    pub fn is_settled(&self) -> bool {
        self.statuses.iter().all(|s| *s != ContentStatus::Pending)
    }

    pub fn available(&self) -> Vec<ContentId> {
        self.statuses
            .iter()
            .enumerate()
            .filter(|(_, s)| **s == ContentStatus::Loaded)
            .map(|(i, _)| i as ContentId)
            .collect()
    }

    pub fn failed_count(&self) -> usize {
        self.statuses
            .iter()
            .filter(|s| **s == ContentStatus::Failed)
            .count()
    }
}
