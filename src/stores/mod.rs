//! Collaborator seams: the relational work-item store (with its free-text
//! fallback search) and the vector index. The engine only reads through
//! these traits; persistence and ingestion live elsewhere.

pub mod memory;
pub mod qdrant;

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::errors::Result;
use crate::types::{WorkItem, WorkItemType};

/// Row shape returned by the free-text fallback search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSearchHit {
    pub id: String,
    #[serde(rename = "type")]
    pub item_type: WorkItemType,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: String,
    pub priority: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
}

/// Read-only view of the relational work-item store. Lookups are keyed the
/// way the underlying schema is: by id, by parent foreign key, and by
/// case-insensitive title pattern.
#[async_trait]
pub trait WorkItemStore: Send + Sync {
    async fn find_by_id(&self, kind: WorkItemType, id: &str) -> Result<Option<WorkItem>>;

    /// Direct children of `parent_id` at the given child level.
    async fn children_of(&self, parent_id: &str, child_kind: WorkItemType) -> Result<Vec<WorkItem>>;

    /// Case-insensitive title substring match within one level.
    async fn find_by_title(&self, kind: WorkItemType, needle: &str) -> Result<Vec<WorkItem>>;

    async fn list_all(&self, kind: WorkItemType) -> Result<Vec<WorkItem>>;

    /// Titles across all levels, for entity extraction.
    async fn known_titles(&self) -> Result<Vec<String>>;

    /// Free-text match over title/description, used when vector search
    /// over work items yields nothing.
    async fn search_by_text(&self, query: &str) -> Result<Vec<TextSearchHit>>;
}

/// One similarity-search result.
#[derive(Debug, Clone)]
pub struct VectorHit {
    pub content: String,
    pub metadata: HashMap<String, JsonValue>,
    /// Distance in [0, 1]; relevance is `1 - distance`.
    pub distance: f32,
}

/// Named similarity-search index over embedded text chunks.
#[async_trait]
pub trait VectorStore: Send + Sync {
    async fn list_collections(&self) -> Result<Vec<String>>;

    async fn search(&self, collection: &str, query: &str, limit: usize) -> Result<Vec<VectorHit>>;
}
