//! Hierarchy resolution over the work-item graph.
//!
//! Builds a deduplicated five-level hierarchy from an ID, a title
//! substring, or nothing at all (whole-graph listing). Lookup failures are
//! logged and yield an empty hierarchy; the resolver never errors to its
//! caller.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::errors::Result;
use crate::stores::WorkItemStore;
use crate::types::{QueryContext, WorkItem, WorkItemHierarchy, WorkItemType};

pub struct HierarchyResolver {
    store: Arc<dyn WorkItemStore>,
}

impl HierarchyResolver {
    pub fn new(store: Arc<dyn WorkItemStore>) -> Self {
        Self { store }
    }

    /// Resolve the hierarchy the query context points at.
    pub async fn resolve(&self, ctx: &QueryContext) -> WorkItemHierarchy {
        let mut hierarchy = WorkItemHierarchy::new();

        let outcome = if let Some(id) = &ctx.work_item_id {
            self.resolve_by_id(id, &mut hierarchy).await
        } else if let Some(title) = &ctx.work_item_title {
            self.resolve_by_title(title, &mut hierarchy).await
        } else {
            self.resolve_all(&mut hierarchy).await
        };

        match outcome {
            Ok(()) => hierarchy,
            Err(e) => {
                warn!(error = %e, "hierarchy resolution failed, returning empty hierarchy");
                WorkItemHierarchy::new()
            }
        }
    }

    /// Dispatch on the ID's level prefix, then walk upward to ancestors
    /// and downward level by level.
    async fn resolve_by_id(&self, id: &str, hierarchy: &mut WorkItemHierarchy) -> Result<()> {
        let Some(kind) = id.split_once('-').and_then(|(prefix, _)| WorkItemType::from_id_prefix(prefix))
        else {
            debug!(id, "work item id has no known level prefix");
            return Ok(());
        };

        let Some(item) = self.store.find_by_id(kind, id).await? else {
            debug!(id, "work item not found");
            return Ok(());
        };

        self.add_ancestors(&item, hierarchy).await?;
        hierarchy.add(item.clone());
        self.descend(&item, hierarchy).await
    }

    /// Title substring match issued independently against all five levels.
    /// Matching business briefs additionally walk downward, deduplicating
    /// against whatever the hierarchy already holds.
    async fn resolve_by_title(&self, title: &str, hierarchy: &mut WorkItemHierarchy) -> Result<()> {
        for kind in WorkItemType::ALL {
            let matches = self.store.find_by_title(kind, title).await?;
            for item in matches {
                let added = hierarchy.add(item.clone());
                if added && kind == WorkItemType::BusinessBrief {
                    self.descend(&item, hierarchy).await?;
                }
            }
        }
        Ok(())
    }

    /// Whole-graph listing when neither identifying field is set.
    async fn resolve_all(&self, hierarchy: &mut WorkItemHierarchy) -> Result<()> {
        for kind in WorkItemType::ALL {
            for item in self.store.list_all(kind).await? {
                hierarchy.add(item);
            }
        }
        Ok(())
    }

    /// Follow `parent_id` references up to the owning business brief.
    async fn add_ancestors(&self, item: &WorkItem, hierarchy: &mut WorkItemHierarchy) -> Result<()> {
        let mut current = item.clone();
        while let (Some(parent_kind), Some(parent_id)) = (current.kind().parent(), current.parent_id())
        {
            let Some(parent) = self.store.find_by_id(parent_kind, parent_id).await? else {
                debug!(parent_id, "dangling parent reference");
                break;
            };
            hierarchy.add(parent.clone());
            current = parent;
        }
        Ok(())
    }

    /// Level-by-level downward walk. Each level's fetch depends on the
    /// parent IDs produced by the previous one; items already present are
    /// not walked again.
    async fn descend(&self, root: &WorkItem, hierarchy: &mut WorkItemHierarchy) -> Result<()> {
        let mut frontier = vec![root.clone()];
        let mut kind = root.kind();

        while let Some(child_kind) = kind.child() {
            let mut next = Vec::new();
            for parent in &frontier {
                for child in self.store.children_of(parent.id(), child_kind).await? {
                    if hierarchy.add(child.clone()) {
                        next.push(child);
                    }
                }
            }
            frontier = next;
            kind = child_kind;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::memory::InMemoryWorkItemStore;
    use crate::types::{QueryType, RequestedInfo, WorkItemCore};

    fn item(kind: WorkItemType, id: &str, title: &str, parent: Option<&str>) -> WorkItem {
        let core = WorkItemCore {
            id: id.to_string(),
            title: title.to_string(),
            description: None,
            status: "active".to_string(),
            priority: "medium".to_string(),
            workflow_stage: "execution".to_string(),
            completion_percentage: 0,
            parent_id: parent.map(String::from),
        };
        match kind {
            WorkItemType::BusinessBrief => WorkItem::BusinessBrief { core },
            WorkItemType::Initiative => WorkItem::Initiative { core },
            WorkItemType::Feature => WorkItem::Feature { core },
            WorkItemType::Epic => WorkItem::Epic { core },
            WorkItemType::Story => WorkItem::Story { core, story_points: None },
        }
    }

    fn seeded_store() -> Arc<InMemoryWorkItemStore> {
        Arc::new(InMemoryWorkItemStore::from_items(vec![
            item(WorkItemType::BusinessBrief, "bb-001", "Mobile Payment Integration", None),
            item(WorkItemType::Initiative, "init-001", "Wallet", Some("bb-001")),
            item(WorkItemType::Initiative, "init-002", "Refunds", Some("bb-001")),
            item(WorkItemType::Feature, "fea-001", "Apple Pay", Some("init-001")),
            item(WorkItemType::Feature, "fea-002", "Google Pay", Some("init-001")),
            item(WorkItemType::Feature, "fea-003", "Refund Flow", Some("init-002")),
            item(WorkItemType::Epic, "epic-001", "Tokenization", Some("fea-001")),
            item(WorkItemType::Epic, "epic-002", "Receipts", Some("fea-002")),
            item(WorkItemType::Epic, "epic-003", "Disputes", Some("fea-003")),
            item(WorkItemType::Story, "story-001", "Card scan", Some("epic-001")),
        ]))
    }

    fn ctx(id: Option<&str>, title: Option<&str>) -> QueryContext {
        QueryContext {
            query_type: QueryType::Relationship,
            requested_info: RequestedInfo::Count,
            work_item_type: None,
            work_item_id: id.map(String::from),
            work_item_title: title.map(String::from),
            relationship_type: None,
            previous_context: None,
        }
    }

    #[tokio::test]
    async fn test_resolve_brief_by_id_walks_down() {
        let resolver = HierarchyResolver::new(seeded_store());
        let hierarchy = resolver.resolve(&ctx(Some("bb-001"), None)).await;

        assert_eq!(hierarchy.business_briefs.len(), 1);
        assert_eq!(hierarchy.initiatives.len(), 2);
        assert_eq!(hierarchy.features.len(), 3);
        assert_eq!(hierarchy.epics.len(), 3);
        assert_eq!(hierarchy.stories.len(), 1);
    }

    #[tokio::test]
    async fn test_resolve_epic_by_id_walks_up_and_down() {
        let resolver = HierarchyResolver::new(seeded_store());
        let hierarchy = resolver.resolve(&ctx(Some("epic-001"), None)).await;

        // Ancestors: feature, initiative, brief. Descendants: one story.
        assert_eq!(hierarchy.business_briefs.len(), 1);
        assert_eq!(hierarchy.initiatives.len(), 1);
        assert_eq!(hierarchy.features.len(), 1);
        assert_eq!(hierarchy.epics.len(), 1);
        assert_eq!(hierarchy.stories.len(), 1);
        assert_eq!(hierarchy.features[0].id(), "fea-001");
    }

    #[tokio::test]
    async fn test_resolve_by_title_never_duplicates() {
        let resolver = HierarchyResolver::new(seeded_store());
        // "Pay" matches the brief (walks everything down) and two features
        // independently; the features must not appear twice.
        let hierarchy = resolver.resolve(&ctx(None, Some("Pay"))).await;

        assert_eq!(hierarchy.business_briefs.len(), 1);
        assert_eq!(hierarchy.features.len(), 3);
        for kind in WorkItemType::ALL {
            let level = hierarchy.level(kind);
            let mut ids: Vec<&str> = level.iter().map(|i| i.id()).collect();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), level.len(), "duplicate id at {kind:?}");
        }
    }

    #[tokio::test]
    async fn test_resolve_without_entity_lists_whole_graph() {
        let resolver = HierarchyResolver::new(seeded_store());
        let hierarchy = resolver.resolve(&ctx(None, None)).await;
        assert_eq!(hierarchy.len(), 10);
    }

    #[tokio::test]
    async fn test_unknown_id_yields_empty_hierarchy() {
        let resolver = HierarchyResolver::new(seeded_store());
        let hierarchy = resolver.resolve(&ctx(Some("bb-999"), None)).await;
        assert!(hierarchy.is_empty());

        let hierarchy = resolver.resolve(&ctx(Some("xyz-1"), None)).await;
        assert!(hierarchy.is_empty());
    }
}
