//! Deterministic context-only response rendering.
//!
//! Used when no model provider is configured or the model call fails.
//! Answers are composed strictly from the ranked fragments' structured
//! metadata and content; nothing is fabricated.

use crate::types::{RetrievedContext, WorkItemSummary};

/// How many generic fragments to quote when no structured work items are
/// present.
const MAX_QUOTED_FRAGMENTS: usize = 3;

pub const NO_CONTEXT_MESSAGE: &str =
    "I couldn't find any relevant information for that question. Try referencing a work item \
     by its ID (e.g. BB-001) or title, or upload related documents first.";

/// Compose a templated answer from ranked fragments, always citing the
/// originating source.
pub fn render(fragments: &[RetrievedContext]) -> String {
    if fragments.is_empty() {
        return NO_CONTEXT_MESSAGE.to_string();
    }

    let items: Vec<(&WorkItemSummary, &str)> = fragments
        .iter()
        .filter_map(|f| f.metadata.work_item.as_ref().map(|w| (w, f.source.as_str())))
        .collect();

    match items.as_slice() {
        [] => render_generic(fragments),
        [(item, source)] => format!(
            "Here's what I found about {}: status {}, priority {}. (Source: {})",
            item.title,
            item.status.as_deref().unwrap_or("unknown"),
            item.priority.as_deref().unwrap_or("unknown"),
            source
        ),
        many => {
            let mut lines = vec!["Here's what I found:".to_string()];
            for (index, (item, source)) in many.iter().enumerate() {
                lines.push(format!(
                    "{}. {} - Status: {}, Priority: {} (Source: {})",
                    index + 1,
                    item.title,
                    item.status.as_deref().unwrap_or("unknown"),
                    item.priority.as_deref().unwrap_or("unknown"),
                    source
                ));
            }
            lines.join("\n")
        }
    }
}

/// No structured work items in context; quote the top fragments verbatim.
fn render_generic(fragments: &[RetrievedContext]) -> String {
    let mut lines = vec!["Here's what I found:".to_string()];
    for fragment in fragments.iter().take(MAX_QUOTED_FRAGMENTS) {
        lines.push(format!("{}\n(Source: {})", fragment.content, fragment.source));
    }
    lines.join("\n\n")
}
