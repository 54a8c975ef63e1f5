//! Generative-model and embedding provider seams.
//!
//! The engine receives its provider as an explicit `Option<Arc<dyn
//! ChatModel>>`; there is no hidden client state, and `None` means the
//! deterministic fallback answers every question.

pub mod ollama;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::Result;

pub use ollama::OllamaClient;

/// Per-call generation parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelOptions {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for ModelOptions {
    fn default() -> Self {
        Self {
            model: "qwen2.5:7b-instruct".to_string(),
            temperature: 0.2,
            max_tokens: 1024,
        }
    }
}

/// A generative language-model provider.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn chat(&self, system_prompt: &str, user_prompt: &str, options: &ModelOptions)
        -> Result<String>;
}

/// Text embedding provider, used to embed queries for vector search.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}
