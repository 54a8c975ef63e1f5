//! Deduplicated five-level work-item hierarchy.

use serde::Serialize;

use super::work_item::{WorkItem, WorkItemType};

/// Five ordered level collections, each keyed by `id` with no duplicates.
/// Built incrementally by the resolver and discarded after the query.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItemHierarchy {
    pub business_briefs: Vec<WorkItem>,
    pub initiatives: Vec<WorkItem>,
    pub features: Vec<WorkItem>,
    pub epics: Vec<WorkItem>,
    pub stories: Vec<WorkItem>,
}

impl WorkItemHierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    /// The collection for one level.
    pub fn level(&self, kind: WorkItemType) -> &[WorkItem] {
        match kind {
            WorkItemType::BusinessBrief => &self.business_briefs,
            WorkItemType::Initiative => &self.initiatives,
            WorkItemType::Feature => &self.features,
            WorkItemType::Epic => &self.epics,
            WorkItemType::Story => &self.stories,
        }
    }

    fn level_mut(&mut self, kind: WorkItemType) -> &mut Vec<WorkItem> {
        match kind {
            WorkItemType::BusinessBrief => &mut self.business_briefs,
            WorkItemType::Initiative => &mut self.initiatives,
            WorkItemType::Feature => &mut self.features,
            WorkItemType::Epic => &mut self.epics,
            WorkItemType::Story => &mut self.stories,
        }
    }

    /// Add an item to its level unless an entry with the same `id` is
    /// already present. Returns whether the item was actually added, so
    /// traversals can skip subtrees that were already walked.
    pub fn add(&mut self, item: WorkItem) -> bool {
        let level = self.level_mut(item.kind());
        if level.iter().any(|existing| existing.id() == item.id()) {
            return false;
        }
        level.push(item);
        true
    }

    pub fn is_empty(&self) -> bool {
        WorkItemType::ALL.iter().all(|kind| self.level(*kind).is_empty())
    }

    pub fn len(&self) -> usize {
        WorkItemType::ALL.iter().map(|kind| self.level(*kind).len()).sum()
    }

    /// All items, briefs first, stories last.
    pub fn iter(&self) -> impl Iterator<Item = &WorkItem> {
        self.business_briefs
            .iter()
            .chain(self.initiatives.iter())
            .chain(self.features.iter())
            .chain(self.epics.iter())
            .chain(self.stories.iter())
    }
}
