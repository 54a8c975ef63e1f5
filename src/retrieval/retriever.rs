//! Multi-source context retrieval.
//!
//! Fans out to three independent sources (document index, work-item index
//! with text fallback, SAFe framework reference) and renders resolved
//! hierarchies into fragments for relationship/status questions. Every
//! source is individually fault-tolerant: a failing source contributes
//! zero fragments and never aborts its siblings.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::Result;
use crate::hierarchy::{safe_process, sdlc_phase};
use crate::stores::{VectorHit, VectorStore, WorkItemStore};
use crate::types::{
    ContextMetadata, QueryContext, QueryType, RequestedInfo, RetrievedContext, WorkItem,
    WorkItemHierarchy, WorkItemSummary, WorkItemType,
};

/// Fixed relevance for text-fallback hits, always below a successful
/// vector hit's ceiling so vector results win when both exist.
const TEXT_FALLBACK_RELEVANCE: f32 = 0.7;

/// Hierarchy-rendered fragments are authoritative.
const HIERARCHY_RELEVANCE: f32 = 1.0;

const HIERARCHY_SOURCE: &str = "Work Item Hierarchy";

/// Keyword heuristic gating the framework-reference search.
const SAFE_TERMS: &[&str] = &[
    "safe",
    "scaled agile",
    "epic",
    "program increment",
    "portfolio",
    "value stream",
    "agile release train",
    "pi planning",
    "iteration",
];

/// Retrieval settings: result cap and collection names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrieverConfig {
    pub max_results: usize,
    pub documents_collection: String,
    pub work_items_collection: String,
    pub framework_collection: String,
}

impl Default for RetrieverConfig {
    fn default() -> Self {
        Self {
            max_results: 5,
            documents_collection: "aura_documents".to_string(),
            work_items_collection: "aura_work_items".to_string(),
            framework_collection: "safe_framework".to_string(),
        }
    }
}

pub struct ContextRetriever {
    vectors: Arc<dyn VectorStore>,
    store: Arc<dyn WorkItemStore>,
    config: RetrieverConfig,
}

impl ContextRetriever {
    pub fn new(
        vectors: Arc<dyn VectorStore>,
        store: Arc<dyn WorkItemStore>,
        config: RetrieverConfig,
    ) -> Self {
        Self { vectors, store, config }
    }

    /// Retrieve context for one question. Hierarchy rendering answers
    /// relationship/status intents; generic search runs for general
    /// intents and whenever hierarchy rendering produced nothing, so any
    /// source with matching data yields *some* context.
    pub async fn retrieve(
        &self,
        ctx: &QueryContext,
        hierarchy: &WorkItemHierarchy,
        question: &str,
    ) -> Vec<RetrievedContext> {
        let mut fragments = Vec::new();

        if matches!(
            ctx.query_type,
            QueryType::Relationship | QueryType::Status | QueryType::Followup
        ) {
            fragments.extend(self.render_hierarchy(ctx, hierarchy));
        }

        if ctx.query_type == QueryType::General || fragments.is_empty() {
            // Independent reads; merge order does not matter here because
            // the ranker re-sorts by relevance.
            let (documents, work_items, framework) = tokio::join!(
                self.search_documents(question),
                self.search_work_items(question),
                self.search_framework(question, ctx.requested_info),
            );
            fragments.extend(documents);
            fragments.extend(work_items);
            fragments.extend(framework);
        }

        fragments
    }

    // ---- document search ----

    async fn search_documents(&self, query: &str) -> Vec<RetrievedContext> {
        match self.try_search_documents(query).await {
            Ok(fragments) => fragments,
            Err(e) => {
                warn!(error = %e, "document search failed");
                Vec::new()
            }
        }
    }

    async fn try_search_documents(&self, query: &str) -> Result<Vec<RetrievedContext>> {
        let collection = &self.config.documents_collection;
        if !self.collection_exists(collection).await? {
            // Normal startup state before any document upload.
            debug!(%collection, "document collection does not exist yet");
            return Ok(Vec::new());
        }

        let hits = self.vectors.search(collection, query, self.config.max_results).await?;
        Ok(hits.into_iter().map(document_fragment).collect())
    }

    // ---- work-item search ----

    async fn search_work_items(&self, query: &str) -> Vec<RetrievedContext> {
        match self.try_search_work_items(query).await {
            Ok(fragments) => fragments,
            Err(e) => {
                warn!(error = %e, "work item search failed");
                Vec::new()
            }
        }
    }

    /// Vector similarity first; zero hits (including a failed vector
    /// index) fall back to text matching over title/description at a
    /// fixed, lower relevance.
    async fn try_search_work_items(&self, query: &str) -> Result<Vec<RetrievedContext>> {
        match self.vector_work_item_hits(query).await {
            Ok(hits) if !hits.is_empty() => {
                return Ok(hits.into_iter().map(work_item_fragment).collect());
            }
            Ok(_) => {}
            Err(e) => warn!(error = %e, "work item vector search failed, trying text fallback"),
        }

        let hits = self.store.search_by_text(query).await?;
        Ok(hits
            .into_iter()
            .map(|hit| {
                let content = format!(
                    "{}: {} - Status: {}, Priority: {}",
                    hit.title, hit.description, hit.status, hit.priority
                );
                let summary = WorkItemSummary {
                    id: hit.id,
                    kind: Some(hit.item_type),
                    title: hit.title,
                    status: Some(hit.status),
                    priority: Some(hit.priority),
                    workflow_stage: None,
                };
                RetrievedContext::new(content, "Work Item Search", TEXT_FALLBACK_RELEVANCE)
                    .with_metadata(ContextMetadata {
                        work_item: Some(summary),
                        ..Default::default()
                    })
            })
            .collect())
    }

    async fn vector_work_item_hits(&self, query: &str) -> Result<Vec<VectorHit>> {
        let collection = &self.config.work_items_collection;
        if !self.collection_exists(collection).await? {
            debug!(%collection, "work item collection does not exist yet");
            return Ok(Vec::new());
        }
        self.vectors.search(collection, query, self.config.max_results).await
    }

    // ---- framework reference search ----

    async fn search_framework(&self, query: &str, info: RequestedInfo) -> Vec<RetrievedContext> {
        let lowered = query.to_lowercase();
        let wanted = info == RequestedInfo::Safe
            || SAFE_TERMS.iter().any(|term| lowered.contains(term));
        if !wanted {
            return Vec::new();
        }

        match self.try_search_framework(query).await {
            Ok(fragments) => fragments,
            Err(e) => {
                warn!(error = %e, "framework reference search failed");
                Vec::new()
            }
        }
    }

    async fn try_search_framework(&self, query: &str) -> Result<Vec<RetrievedContext>> {
        let collection = &self.config.framework_collection;
        if !self.collection_exists(collection).await? {
            debug!(%collection, "framework reference collection does not exist");
            return Ok(Vec::new());
        }

        let hits = self.vectors.search(collection, query, self.config.max_results).await?;
        Ok(hits
            .into_iter()
            .map(|hit| {
                let relevance = (1.0 - hit.distance).clamp(0.0, 1.0);
                RetrievedContext::new(hit.content, "SAFe Framework", relevance)
            })
            .collect())
    }

    async fn collection_exists(&self, name: &str) -> Result<bool> {
        let collections = self.vectors.list_collections().await?;
        Ok(collections.iter().any(|c| c == name))
    }

    // ---- hierarchy rendering ----

    fn render_hierarchy(
        &self,
        ctx: &QueryContext,
        hierarchy: &WorkItemHierarchy,
    ) -> Vec<RetrievedContext> {
        if hierarchy.is_empty() {
            return Vec::new();
        }

        match ctx.requested_info {
            RequestedInfo::Count => vec![render_counts(ctx, hierarchy)],
            RequestedInfo::List => render_breakdowns(hierarchy),
            RequestedInfo::Status | RequestedInfo::Sdlc | RequestedInfo::Safe => {
                render_item_statuses(hierarchy, ctx.requested_info)
            }
            RequestedInfo::Details => render_item_statuses(hierarchy, RequestedInfo::Status),
        }
    }
}

fn document_fragment(hit: VectorHit) -> RetrievedContext {
    let file_name = hit
        .metadata
        .get("fileName")
        .and_then(|v| v.as_str())
        .map(String::from);
    let chunk_index = hit.metadata.get("chunkIndex").and_then(|v| v.as_u64());

    let source = file_name
        .as_deref()
        .map(|name| format!("Document: {name}"))
        .unwrap_or_else(|| "Uploaded document".to_string());

    let relevance = (1.0 - hit.distance).clamp(0.0, 1.0);
    RetrievedContext::new(hit.content, source, relevance).with_metadata(ContextMetadata {
        file_name,
        chunk_index,
        work_item: None,
    })
}

fn work_item_fragment(hit: VectorHit) -> RetrievedContext {
    let id = hit
        .metadata
        .get("workItemId")
        .and_then(|v| v.as_str())
        .map(String::from);
    let kind = hit
        .metadata
        .get("workItemType")
        .and_then(|v| v.as_str())
        .and_then(|s| serde_json::from_value(serde_json::Value::String(s.to_string())).ok());
    let title = hit
        .metadata
        .get("title")
        .and_then(|v| v.as_str())
        .map(String::from);

    let work_item = match (id, title) {
        (Some(id), Some(title)) => Some(WorkItemSummary {
            id,
            kind,
            title,
            status: hit.metadata.get("status").and_then(|v| v.as_str()).map(String::from),
            priority: hit.metadata.get("priority").and_then(|v| v.as_str()).map(String::from),
            workflow_stage: None,
        }),
        _ => None,
    };

    let relevance = (1.0 - hit.distance).clamp(0.0, 1.0);
    RetrievedContext::new(hit.content, "Work Items", relevance).with_metadata(ContextMetadata {
        work_item,
        ..Default::default()
    })
}

/// One fragment summarizing per-level counts for the resolved root.
fn render_counts(ctx: &QueryContext, hierarchy: &WorkItemHierarchy) -> RetrievedContext {
    let root = hierarchy
        .business_briefs
        .first()
        .map(|brief| brief.title().to_string())
        .or_else(|| ctx.work_item_title.clone())
        .or_else(|| ctx.work_item_id.clone())
        .unwrap_or_else(|| "all work items".to_string());

    let content = format!(
        "Hierarchy summary for {root} - Initiatives: {}, Features: {}, Epics: {}, Stories: {}",
        hierarchy.initiatives.len(),
        hierarchy.features.len(),
        hierarchy.epics.len(),
        hierarchy.stories.len(),
    );

    RetrievedContext::new(content, HIERARCHY_SOURCE, HIERARCHY_RELEVANCE)
}

/// One fragment per root item, each a formatted multi-level breakdown.
fn render_breakdowns(hierarchy: &WorkItemHierarchy) -> Vec<RetrievedContext> {
    let roots = WorkItemType::ALL
        .iter()
        .map(|kind| hierarchy.level(*kind))
        .find(|level| !level.is_empty())
        .unwrap_or(&[]);

    roots
        .iter()
        .map(|root| {
            let mut lines = Vec::new();
            subtree_lines(hierarchy, root, 0, &mut lines);
            RetrievedContext::new(lines.join("\n"), HIERARCHY_SOURCE, HIERARCHY_RELEVANCE)
                .with_metadata(ContextMetadata {
                    work_item: Some(WorkItemSummary::from(root)),
                    ..Default::default()
                })
        })
        .collect()
}

fn subtree_lines(
    hierarchy: &WorkItemHierarchy,
    item: &WorkItem,
    depth: usize,
    lines: &mut Vec<String>,
) {
    let core = item.core();
    if depth == 0 {
        lines.push(format!(
            "{} [{}] - Status: {}, Priority: {}",
            core.title,
            item.kind().label(),
            core.status,
            core.priority
        ));
    } else {
        lines.push(format!(
            "{}{}: {} - Status: {}, Priority: {}",
            "  ".repeat(depth),
            item.kind().label(),
            core.title,
            core.status,
            core.priority
        ));
    }

    if let Some(child_kind) = item.kind().child() {
        for child in hierarchy
            .level(child_kind)
            .iter()
            .filter(|child| child.parent_id() == Some(item.id()))
        {
            subtree_lines(hierarchy, child, depth + 1, lines);
        }
    }
}

/// One fragment per work item, annotated with its mapped SDLC phase or
/// SAFe process name.
fn render_item_statuses(hierarchy: &WorkItemHierarchy, info: RequestedInfo) -> Vec<RetrievedContext> {
    hierarchy
        .iter()
        .map(|item| {
            let core = item.core();
            let annotation = match info {
                RequestedInfo::Safe => {
                    format!("SAFe Process: {}", safe_process(item.kind(), &core.workflow_stage))
                }
                _ => format!("SDLC Phase: {}", sdlc_phase(&core.workflow_stage)),
            };
            let content = format!(
                "{} [{}] - Status: {}, Priority: {}, Stage: {}, {}% complete - {}",
                core.title,
                item.kind().label(),
                core.status,
                core.priority,
                core.workflow_stage,
                core.completion_percentage,
                annotation
            );
            RetrievedContext::new(content, HIERARCHY_SOURCE, HIERARCHY_RELEVANCE).with_metadata(
                ContextMetadata {
                    work_item: Some(WorkItemSummary::from(item)),
                    ..Default::default()
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{QueryType, WorkItemCore};

    fn item(kind: WorkItemType, id: &str, title: &str, parent: Option<&str>, stage: &str) -> WorkItem {
        let core = WorkItemCore {
            id: id.to_string(),
            title: title.to_string(),
            description: None,
            status: "in-progress".to_string(),
            priority: "high".to_string(),
            workflow_stage: stage.to_string(),
            completion_percentage: 50,
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

    fn sample_hierarchy() -> WorkItemHierarchy {
        let mut hierarchy = WorkItemHierarchy::new();
        hierarchy.add(item(WorkItemType::BusinessBrief, "bb-001", "Payments", None, "planning"));
        hierarchy.add(item(WorkItemType::Initiative, "init-001", "Wallet", Some("bb-001"), "execution"));
        hierarchy.add(item(WorkItemType::Feature, "fea-001", "Apple Pay", Some("init-001"), "design"));
        hierarchy.add(item(WorkItemType::Feature, "fea-002", "Google Pay", Some("init-001"), "testing"));
        hierarchy
    }

    fn ctx(info: RequestedInfo) -> QueryContext {
        QueryContext {
            query_type: QueryType::Relationship,
            requested_info: info,
            work_item_type: None,
            work_item_id: Some("bb-001".to_string()),
            work_item_title: None,
            relationship_type: None,
            previous_context: None,
        }
    }

    #[test]
    fn test_render_counts_reports_each_level() {
        let fragment = render_counts(&ctx(RequestedInfo::Count), &sample_hierarchy());
        assert!(fragment.content.contains("Initiatives: 1"));
        assert!(fragment.content.contains("Features: 2"));
        assert!(fragment.content.contains("Epics: 0"));
        assert_eq!(fragment.relevance, 1.0);
        assert_eq!(fragment.source, HIERARCHY_SOURCE);
    }

    #[test]
    fn test_render_breakdowns_one_fragment_per_root() {
        let fragments = render_breakdowns(&sample_hierarchy());
        assert_eq!(fragments.len(), 1);
        let content = &fragments[0].content;
        assert!(content.contains("Payments [Business Brief]"));
        assert!(content.contains("Feature: Apple Pay - Status: in-progress, Priority: high"));
        assert!(content.contains("Feature: Google Pay"));
    }

    #[test]
    fn test_render_statuses_maps_sdlc_phase() {
        let fragments = render_item_statuses(&sample_hierarchy(), RequestedInfo::Sdlc);
        assert_eq!(fragments.len(), 4);
        let testing = fragments
            .iter()
            .find(|f| f.content.contains("Google Pay"))
            .unwrap();
        assert!(testing.content.contains("SDLC Phase: Testing & QA"));
        let summary = testing.metadata.work_item.as_ref().unwrap();
        assert_eq!(summary.id, "fea-002");
    }

    #[test]
    fn test_render_statuses_maps_safe_process() {
        let fragments = render_item_statuses(&sample_hierarchy(), RequestedInfo::Safe);
        let initiative = fragments
            .iter()
            .find(|f| f.content.contains("Wallet"))
            .unwrap();
        assert!(initiative.content.contains("SAFe Process: Iteration Planning"));
    }

    #[test]
    fn test_document_fragment_carries_file_metadata() {
        let mut metadata = std::collections::HashMap::new();
        metadata.insert("fileName".to_string(), serde_json::json!("prd.md"));
        metadata.insert("chunkIndex".to_string(), serde_json::json!(3));
        let fragment = document_fragment(VectorHit {
            content: "chunk text".to_string(),
            metadata,
            distance: 0.25,
        });
        assert_eq!(fragment.source, "Document: prd.md");
        assert!((fragment.relevance - 0.75).abs() < f32::EPSILON);
        assert_eq!(fragment.metadata.chunk_index, Some(3));
    }
}
