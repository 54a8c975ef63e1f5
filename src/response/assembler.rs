//! Final answer assembly.
//!
//! With a configured provider, builds a single grounded prompt from the
//! ranked fragments and calls the model under a timeout. Any failure (no
//! provider, call error, timeout, blank completion) falls through to the
//! deterministic context-only renderer; the caller never sees an error.

use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::model::{ChatModel, ModelOptions};
use crate::types::RetrievedContext;

use super::fallback;

const SYSTEM_PROMPT: &str = "You are Aura's assistant for SDLC work tracking. Answer the user's \
    question using only the provided context. Cite the sources you used. If the context does not \
    contain the answer, say so plainly instead of guessing.";

const FRAGMENT_SEPARATOR: &str = "\n\n---\n\n";

pub struct ResponseAssembler {
    model: Option<Arc<dyn ChatModel>>,
    options: ModelOptions,
    timeout: Duration,
}

impl ResponseAssembler {
    /// `model: None` means every answer uses the deterministic fallback.
    pub fn new(model: Option<Arc<dyn ChatModel>>, options: ModelOptions, timeout: Duration) -> Self {
        Self { model, options, timeout }
    }

    pub async fn assemble(&self, question: &str, ranked: &[RetrievedContext]) -> String {
        if ranked.is_empty() {
            return fallback::NO_CONTEXT_MESSAGE.to_string();
        }

        if let Some(model) = &self.model {
            let prompt = build_prompt(question, ranked);
            match tokio::time::timeout(self.timeout, model.chat(SYSTEM_PROMPT, &prompt, &self.options))
                .await
            {
                Ok(Ok(answer)) if !answer.trim().is_empty() => return answer,
                Ok(Ok(_)) => warn!("model returned an empty completion, using fallback"),
                Ok(Err(e)) => warn!(error = %e, "model call failed, using fallback"),
                Err(_) => warn!(timeout = ?self.timeout, "model call timed out, using fallback"),
            }
        }

        fallback::render(ranked)
    }
}

/// One prompt embedding every ranked fragment plus the question.
fn build_prompt(question: &str, ranked: &[RetrievedContext]) -> String {
    let context = ranked
        .iter()
        .map(|fragment| format!("Source: {}\nContent: {}", fragment.source, fragment.content))
        .collect::<Vec<_>>()
        .join(FRAGMENT_SEPARATOR);

    format!("Context:\n{context}\n\nQuestion: {question}")
}
