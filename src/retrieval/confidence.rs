//! Answer confidence derived from the ranked fragment set.

use crate::types::RetrievedContext;

/// `avgRelevance * 0.7 + min(count / maxResults, 1) * 0.3`, rounded to two
/// decimals. Exactly 0 for an empty fragment set.
pub fn score(fragments: &[RetrievedContext], max_results: usize) -> f32 {
    if fragments.is_empty() || max_results == 0 {
        return 0.0;
    }

    let avg_relevance =
        fragments.iter().map(|f| f.relevance).sum::<f32>() / fragments.len() as f32;
    let coverage = (fragments.len() as f32 / max_results as f32).min(1.0);

    let confidence = avg_relevance * 0.7 + coverage * 0.3;
    (confidence * 100.0).round() / 100.0
}
