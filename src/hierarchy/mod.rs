//! Work-item graph traversal and stage mapping tables.

pub mod mapping;
pub mod resolver;

pub use mapping::{safe_process, sdlc_phase};
pub use resolver::HierarchyResolver;
