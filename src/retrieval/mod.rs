//! Context retrieval, ranking, and confidence scoring.

pub mod confidence;
pub mod ranker;
pub mod retriever;

pub use retriever::{ContextRetriever, RetrieverConfig};
