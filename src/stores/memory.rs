//! In-memory work-item store, used by the demo binary (seeded from a JSON
//! snapshot) and by tests.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::errors::Result;
use crate::types::{WorkItem, WorkItemType};

use super::{TextSearchHit, WorkItemStore};

/// `WorkItemStore` over an in-memory item set, grouped by level.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkItemStore {
    levels: HashMap<WorkItemType, Vec<WorkItem>>,
}

impl InMemoryWorkItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<WorkItem>) -> Self {
        let mut store = Self::new();
        for item in items {
            store.insert(item);
        }
        store
    }

    pub fn insert(&mut self, item: WorkItem) {
        self.levels.entry(item.kind()).or_default().push(item);
    }

    fn level(&self, kind: WorkItemType) -> &[WorkItem] {
        self.levels.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[async_trait]
impl WorkItemStore for InMemoryWorkItemStore {
    async fn find_by_id(&self, kind: WorkItemType, id: &str) -> Result<Option<WorkItem>> {
        Ok(self
            .level(kind)
            .iter()
            .find(|item| item.id().eq_ignore_ascii_case(id))
            .cloned())
    }

    async fn children_of(&self, parent_id: &str, child_kind: WorkItemType) -> Result<Vec<WorkItem>> {
        Ok(self
            .level(child_kind)
            .iter()
            .filter(|item| {
                item.parent_id()
                    .is_some_and(|pid| pid.eq_ignore_ascii_case(parent_id))
            })
            .cloned()
            .collect())
    }

    async fn find_by_title(&self, kind: WorkItemType, needle: &str) -> Result<Vec<WorkItem>> {
        let needle = needle.to_lowercase();
        Ok(self
            .level(kind)
            .iter()
            .filter(|item| item.title().to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn list_all(&self, kind: WorkItemType) -> Result<Vec<WorkItem>> {
        Ok(self.level(kind).to_vec())
    }

    async fn known_titles(&self) -> Result<Vec<String>> {
        let mut titles = Vec::new();
        for kind in WorkItemType::ALL {
            titles.extend(self.level(kind).iter().map(|item| item.title().to_string()));
        }
        Ok(titles)
    }

    async fn search_by_text(&self, query: &str) -> Result<Vec<TextSearchHit>> {
        let lowered = query.to_lowercase();
        // Whole-phrase match, or any meaningful token of the question.
        let tokens: Vec<&str> = lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|token| token.len() >= 4)
            .collect();

        let mut hits = Vec::new();
        for kind in WorkItemType::ALL {
            for item in self.level(kind) {
                let core = item.core();
                let haystack = format!(
                    "{} {}",
                    core.title.to_lowercase(),
                    core.description.as_deref().unwrap_or("").to_lowercase()
                );
                let matched = haystack.contains(&lowered)
                    || tokens.iter().any(|token| haystack.contains(token));
                if matched {
                    hits.push(TextSearchHit {
                        id: core.id.clone(),
                        item_type: kind,
                        title: core.title.clone(),
                        description: core.description.clone().unwrap_or_default(),
                        status: core.status.clone(),
                        priority: core.priority.clone(),
                        assigned_to: None,
                    });
                }
            }
        }
        Ok(hits)
    }
}
