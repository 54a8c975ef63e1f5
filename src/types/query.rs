//! Query classification types.

use serde::{Deserialize, Serialize};

use super::work_item::WorkItemType;

/// Classified intent of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QueryType {
    Relationship,
    Status,
    List,
    General,
    Followup,
}

/// Kind of information the question asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RequestedInfo {
    Count,
    List,
    Status,
    Sdlc,
    Safe,
    Details,
}

/// Direction of a relationship query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RelationshipType {
    Children,
    Parent,
    Siblings,
}

/// Everything the pipeline knows about one question. Created fresh per
/// question and immutable after classification (the engine only fills in
/// inherited entity references for follow-ups before resolution starts).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryContext {
    pub query_type: QueryType,
    pub requested_info: RequestedInfo,
    pub work_item_type: Option<WorkItemType>,
    pub work_item_id: Option<String>,
    pub work_item_title: Option<String>,
    pub relationship_type: Option<RelationshipType>,
    /// Prior turn's question, for follow-up resolution.
    pub previous_context: Option<String>,
}
