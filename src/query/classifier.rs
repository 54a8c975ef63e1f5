//! Intent classification: priority-ordered keyword rules.
//!
//! Deterministic and stateless. The rule table is deliberately preserved
//! behind this function so a statistical classifier can replace it without
//! touching callers.

use crate::types::{QueryContext, QueryType, RelationshipType, RequestedInfo};

use super::entities::ExtractedEntities;

/// Classify one question into an intent and requested-information kind.
/// First matching rule wins.
pub fn classify(question: &str, entities: &ExtractedEntities, history: &[String]) -> QueryContext {
    let q = question.to_lowercase();

    let (query_type, requested_info) = if q.contains("how many") {
        (QueryType::Relationship, RequestedInfo::Count)
    } else if q.contains("list")
        || q.contains("epics for")
        || q.contains("initiatives for")
        || q.contains("stories of")
    {
        (QueryType::Relationship, RequestedInfo::List)
    } else if q.contains("status of") || q.contains("what's the status") {
        (QueryType::Status, RequestedInfo::Status)
    } else if q.contains("where in") && (q.contains("sdlc") || q.contains("safe")) {
        let info = if q.contains("safe") { RequestedInfo::Safe } else { RequestedInfo::Sdlc };
        (QueryType::Status, info)
    } else if q.contains("that ") || q.contains("those ") || q.contains("the previous") {
        // Pronoun back-reference; status is the default assumption.
        (QueryType::Followup, RequestedInfo::Status)
    } else {
        (QueryType::General, RequestedInfo::Details)
    };

    let relationship_type = match (query_type, requested_info) {
        // Count and list queries walk the hierarchy downward.
        (QueryType::Relationship, RequestedInfo::Count | RequestedInfo::List) => {
            Some(RelationshipType::Children)
        }
        _ => None,
    };

    QueryContext {
        query_type,
        requested_info,
        work_item_type: entities.work_item_type,
        work_item_id: entities.work_item_id.clone(),
        work_item_title: entities.work_item_title.clone(),
        relationship_type,
        previous_context: history.last().cloned(),
    }
}
