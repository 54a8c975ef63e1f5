//! Error types for the aura-chat retrieval engine
//!
//! Collaborator failures are represented here, but none of them escape the
//! pipeline entry points: sources degrade to empty results and the model
//! path degrades to the deterministic fallback (see `retrieval` and
//! `response`).

use thiserror::Error;

/// Main error type for the retrieval-and-grounding engine
#[derive(Error, Debug)]
pub enum ChatError {
    /// Relational work-item store errors
    #[error("Work item store error: {0}")]
    Store(String),

    /// Vector index errors
    #[error("Vector store error: {0}")]
    VectorStore(String),

    /// Embedding computation errors
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Generative model provider errors
    #[error("Model provider error: {0}")]
    Model(String),

    /// HTTP client errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for the engine
pub type Result<T> = std::result::Result<T, ChatError>;
