//! Question understanding: entity extraction and intent classification.

pub mod classifier;
pub mod entities;

pub use classifier::classify;
pub use entities::{EntityExtractor, ExtractedEntities};
