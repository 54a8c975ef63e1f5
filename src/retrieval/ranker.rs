//! Fragment ranking: merge, stable-sort by relevance, truncate.

use crate::types::RetrievedContext;

/// Stable-sort fragments descending by relevance and truncate to twice the
/// nominal result cap. Context is deliberately over-provided so the
/// response assembler has enough grounding material. Equal-relevance
/// fragments keep their source-emission order.
pub fn rank(mut fragments: Vec<RetrievedContext>, max_results: usize) -> Vec<RetrievedContext> {
    fragments.sort_by(|a, b| {
        b.relevance
            .partial_cmp(&a.relevance)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    fragments.truncate(max_results * 2);
    fragments
}
