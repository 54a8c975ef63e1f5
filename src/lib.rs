//! aura-chat - retrieval-and-grounding engine for Aura's AI-assisted
//! work-tracking chat.
//!
//! Answers natural-language questions about a five-level work-item graph
//! (business brief → initiative → feature → epic → story) and uploaded
//! reference documents, grounding each answer in retrieved evidence.
//!
//! # Pipeline
//!
//! question + history → entity extraction → intent classification →
//! hierarchy resolution (relationship/status intents) → multi-source
//! context retrieval → ranking → confidence scoring → answer assembly
//! (model-grounded, with a deterministic context-only fallback).

pub mod config;
pub mod engine;
pub mod errors;
pub mod hierarchy;
pub mod model;
pub mod query;
pub mod response;
pub mod retrieval;
pub mod stores;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use engine::ChatEngine;
pub use errors::{ChatError, Result};
pub use types::{ChatResponse, RetrievedContext};
