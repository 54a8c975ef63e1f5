//! Core data model: work items, query classification, hierarchies, and
//! retrieved context fragments.

pub mod context;
pub mod hierarchy;
pub mod query;
pub mod work_item;

pub use context::{ChatResponse, ContextMetadata, RetrievedContext, WorkItemSummary};
pub use hierarchy::WorkItemHierarchy;
pub use query::{QueryContext, QueryType, RelationshipType, RequestedInfo};
pub use work_item::{WorkItem, WorkItemCore, WorkItemType};
