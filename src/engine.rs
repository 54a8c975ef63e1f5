//! The chat engine: the single exposed operation of the retrieval core.
//!
//! `answer` never fails. Every collaborator failure degrades: sources
//! contribute nothing, the model path falls back to deterministic
//! rendering, and the worst case is an empty-context, zero-confidence
//! answer saying nothing relevant was found.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::Config;
use crate::hierarchy::HierarchyResolver;
use crate::model::ChatModel;
use crate::query::{classify, EntityExtractor};
use crate::response::ResponseAssembler;
use crate::retrieval::{confidence, ranker, ContextRetriever};
use crate::stores::{VectorStore, WorkItemStore};
use crate::types::{ChatResponse, QueryContext, QueryType, WorkItemHierarchy};

pub struct ChatEngine {
    store: Arc<dyn WorkItemStore>,
    resolver: HierarchyResolver,
    retriever: ContextRetriever,
    assembler: ResponseAssembler,
    max_results: usize,
}

impl ChatEngine {
    pub fn new(
        store: Arc<dyn WorkItemStore>,
        vectors: Arc<dyn VectorStore>,
        model: Option<Arc<dyn ChatModel>>,
        config: &Config,
    ) -> Self {
        Self {
            resolver: HierarchyResolver::new(store.clone()),
            retriever: ContextRetriever::new(vectors, store.clone(), config.retrieval.clone()),
            assembler: ResponseAssembler::new(model, config.model.options(), config.model.timeout()),
            max_results: config.retrieval.max_results,
            store,
        }
    }

    /// Answer one question against the work-item graph and uploaded
    /// documents, grounding the reply in retrieved evidence.
    pub async fn answer(&self, question: &str, history: &[String]) -> ChatResponse {
        let known_titles = match self.store.known_titles().await {
            Ok(titles) => titles,
            Err(e) => {
                warn!(error = %e, "known-titles lookup failed, extracting without titles");
                Vec::new()
            }
        };

        let extractor = EntityExtractor::new(known_titles);
        let entities = extractor.extract(question);
        let mut ctx = classify(question, &entities, history);
        debug!(?ctx.query_type, ?ctx.requested_info, "classified question");

        // A follow-up without its own entity inherits the previous turn's
        // work-item reference.
        if ctx.query_type == QueryType::Followup && entities.is_unconstrained() {
            if let Some(previous) = ctx.previous_context.clone() {
                let inherited = extractor.extract(&previous);
                ctx.work_item_id = inherited.work_item_id;
                ctx.work_item_title = inherited.work_item_title;
                ctx.work_item_type = ctx.work_item_type.or(inherited.work_item_type);
            }
        }

        let hierarchy = if needs_hierarchy(&ctx) {
            self.resolver.resolve(&ctx).await
        } else {
            WorkItemHierarchy::new()
        };

        let fragments = self.retriever.retrieve(&ctx, &hierarchy, question).await;
        let ranked = ranker::rank(fragments, self.max_results);
        let confidence = confidence::score(&ranked, self.max_results);

        let mut sources: Vec<String> = Vec::new();
        for fragment in &ranked {
            if !sources.contains(&fragment.source) {
                sources.push(fragment.source.clone());
            }
        }

        let message = self.assembler.assemble(question, &ranked).await;

        ChatResponse {
            message,
            context: ranked,
            sources,
            confidence,
        }
    }
}

fn needs_hierarchy(ctx: &QueryContext) -> bool {
    matches!(
        ctx.query_type,
        QueryType::Relationship | QueryType::Status | QueryType::Followup
    )
}
