//! Retrieved context fragments and the terminal chat response.

use serde::{Deserialize, Serialize};

use super::work_item::{WorkItem, WorkItemType};

/// Structured snapshot of a work item carried on a fragment, so the
/// deterministic fallback reads fields directly instead of re-parsing the
/// rendered text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItemSummary {
    pub id: String,
    pub kind: Option<WorkItemType>,
    pub title: String,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub workflow_stage: Option<String>,
}

impl From<&WorkItem> for WorkItemSummary {
    fn from(item: &WorkItem) -> Self {
        let core = item.core();
        Self {
            id: core.id.clone(),
            kind: Some(item.kind()),
            title: core.title.clone(),
            status: Some(core.status.clone()),
            priority: Some(core.priority.clone()),
            workflow_stage: Some(core.workflow_stage.clone()),
        }
    }
}

/// Source-specific fragment metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_index: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_item: Option<WorkItemSummary>,
}

/// One scored piece of evidence. Never mutated in place; ranking produces
/// a new sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedContext {
    pub content: String,
    /// Human-readable source label.
    pub source: String,
    /// Retrieval strength, always within the closed unit interval.
    pub relevance: f32,
    #[serde(default)]
    pub metadata: ContextMetadata,
}

impl RetrievedContext {
    pub fn new(content: impl Into<String>, source: impl Into<String>, relevance: f32) -> Self {
        let relevance = if relevance.is_finite() { relevance.clamp(0.0, 1.0) } else { 0.0 };
        Self {
            content: content.into(),
            source: source.into(),
            relevance,
            metadata: ContextMetadata::default(),
        }
    }

    pub fn with_metadata(mut self, metadata: ContextMetadata) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Terminal output object, one per question.
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub message: String,
    /// Final ranked fragment list the answer was grounded in.
    pub context: Vec<RetrievedContext>,
    /// Deduplicated source labels, in ranked order.
    pub sources: Vec<String>,
    /// Overall grounding quality, within the closed unit interval.
    pub confidence: f32,
}
