//! End-to-end tests for the chat engine.
//!
//! Exercises the full pipeline (extract → classify → resolve → retrieve →
//! rank → score → assemble) against in-memory fakes, with no network and
//! no model provider.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use aura_chat::config::Config;
use aura_chat::engine::ChatEngine;
use aura_chat::errors::{ChatError, Result};
use aura_chat::response::fallback::NO_CONTEXT_MESSAGE;
use aura_chat::stores::memory::InMemoryWorkItemStore;
use aura_chat::stores::{VectorHit, VectorStore};
use aura_chat::types::{WorkItem, WorkItemCore, WorkItemType};

/// Vector store fake: a fixed set of collections with canned hits.
#[derive(Default)]
struct FakeVectorStore {
    collections: Vec<String>,
    hits: HashMap<String, Vec<VectorHit>>,
}

#[async_trait]
impl VectorStore for FakeVectorStore {
    async fn list_collections(&self) -> Result<Vec<String>> {
        Ok(self.collections.clone())
    }

    async fn search(&self, collection: &str, _query: &str, limit: usize) -> Result<Vec<VectorHit>> {
        let mut hits = self.hits.get(collection).cloned().unwrap_or_default();
        hits.truncate(limit);
        Ok(hits)
    }
}

/// Vector store fake that fails every call.
struct FailingVectorStore;

#[async_trait]
impl VectorStore for FailingVectorStore {
    async fn list_collections(&self) -> Result<Vec<String>> {
        Err(ChatError::VectorStore("connection refused".to_string()))
    }

    async fn search(&self, _: &str, _: &str, _: usize) -> Result<Vec<VectorHit>> {
        Err(ChatError::VectorStore("connection refused".to_string()))
    }
}

fn item(
    kind: WorkItemType,
    id: &str,
    title: &str,
    parent: Option<&str>,
    stage: &str,
    description: Option<&str>,
) -> WorkItem {
    let core = WorkItemCore {
        id: id.to_string(),
        title: title.to_string(),
        description: description.map(String::from),
        status: "in-progress".to_string(),
        priority: "high".to_string(),
        workflow_stage: stage.to_string(),
        completion_percentage: 50,
        parent_id: parent.map(String::from),
    };
    match kind {
        WorkItemType::BusinessBrief => WorkItem::BusinessBrief { core },
        WorkItemType::Initiative => WorkItem::Initiative { core },
        WorkItemType::Feature => WorkItem::Feature { core },
        WorkItemType::Epic => WorkItem::Epic { core },
        WorkItemType::Story => WorkItem::Story { core, story_points: None },
    }
}

/// BB-001 with 2 initiatives, 3 features, 5 epics.
fn payment_graph() -> Arc<InMemoryWorkItemStore> {
    use WorkItemType::*;
    Arc::new(InMemoryWorkItemStore::from_items(vec![
        item(BusinessBrief, "bb-001", "Mobile Payment Integration", None, "planning", None),
        item(Initiative, "init-001", "Wallet Support", Some("bb-001"), "execution", None),
        item(Initiative, "init-002", "Refund Handling", Some("bb-001"), "planning", None),
        item(Feature, "fea-001", "Apple Pay", Some("init-001"), "design", None),
        item(Feature, "fea-002", "Google Pay", Some("init-001"), "execution", None),
        item(Feature, "fea-003", "Refund Flow", Some("init-002"), "testing", None),
        item(Epic, "epic-001", "Tokenization", Some("fea-001"), "execution", None),
        item(Epic, "epic-002", "Wallet UI", Some("fea-001"), "design", None),
        item(Epic, "epic-003", "Receipt Sync", Some("fea-002"), "testing", None),
        item(Epic, "epic-004", "Dispute Intake", Some("fea-003"), "idea", None),
        item(Epic, "epic-005", "Refund Ledger", Some("fea-003"), "completed", None),
    ]))
}

fn engine(store: Arc<InMemoryWorkItemStore>, vectors: Arc<dyn VectorStore>) -> ChatEngine {
    // Default config: no model provider, deterministic fallback only.
    ChatEngine::new(store, vectors, None, &Config::default())
}

#[tokio::test]
async fn scenario_count_epics_for_brief() {
    let engine = engine(payment_graph(), Arc::new(FakeVectorStore::default()));
    let response = engine.answer("How many epics for BB-001?", &[]).await;

    assert_eq!(response.context.len(), 1);
    let content = &response.context[0].content;
    assert!(content.contains("Initiatives: 2"), "{content}");
    assert!(content.contains("Features: 3"), "{content}");
    assert!(content.contains("Epics: 5"), "{content}");
    assert_eq!(response.sources, vec!["Work Item Hierarchy".to_string()]);
    assert!(response.confidence > 0.0);
}

#[tokio::test]
async fn scenario_list_features_by_title() {
    use WorkItemType::*;
    let store = Arc::new(InMemoryWorkItemStore::from_items(vec![
        item(BusinessBrief, "bb-001", "Mobile Payment Integration", None, "planning", None),
        item(Initiative, "init-001", "Wallet Support", Some("bb-001"), "execution", None),
        item(Feature, "fea-001", "Apple Pay", Some("init-001"), "design", None),
        item(Feature, "fea-002", "Google Pay", Some("init-001"), "execution", None),
    ]));
    let engine = engine(store, Arc::new(FakeVectorStore::default()));
    let response = engine
        .answer("List the features for Mobile Payment Integration", &[])
        .await;

    assert_eq!(response.context.len(), 1);
    let fragment = &response.context[0];
    assert_eq!(fragment.relevance, 1.0);
    assert!(fragment.content.contains("Apple Pay"));
    assert!(fragment.content.contains("Google Pay"));
    assert!(fragment.content.contains("Priority: high"));
}

#[tokio::test]
async fn scenario_missing_document_collection_degrades_to_work_items() {
    use WorkItemType::*;
    let store = Arc::new(InMemoryWorkItemStore::from_items(vec![item(
        Epic,
        "epic-001",
        "Payment Gateway",
        None,
        "execution",
        Some("Integrate the external payment gateway"),
    )]));
    // No collections exist at all: the pre-upload startup state.
    let engine = engine(store, Arc::new(FakeVectorStore::default()));
    let response = engine.answer("what do we know about the payment gateway?", &[]).await;

    assert!(!response.context.is_empty());
    assert!(response.sources.contains(&"Work Item Search".to_string()));
    assert!(response.context.iter().all(|f| f.relevance == 0.7));
    assert!(response.message.contains("Payment Gateway"));
}

#[tokio::test]
async fn scenario_status_question_maps_sdlc_phase() {
    let engine = engine(payment_graph(), Arc::new(FakeVectorStore::default()));
    let response = engine.answer("What's the status of EPIC-003?", &[]).await;

    // Ancestor chain brief → initiative → feature plus the epic itself.
    assert_eq!(response.context.len(), 4);
    let epic = response
        .context
        .iter()
        .find(|f| f.content.contains("Receipt Sync"))
        .expect("epic fragment present");
    assert!(epic.content.contains("SDLC Phase: Testing & QA"), "{}", epic.content);

    // avg relevance 1.0, coverage 4/5: 0.7 + 0.8 * 0.3
    assert_eq!(response.confidence, 0.94);
    assert!(response.message.contains("(Source: Work Item Hierarchy)"));
}

#[tokio::test]
async fn scenario_safe_question_maps_process_names() {
    let engine = engine(payment_graph(), Arc::new(FakeVectorStore::default()));
    let response = engine.answer("Where in SAFe is INIT-001?", &[]).await;

    let initiative = response
        .context
        .iter()
        .find(|f| f.content.contains("Wallet Support"))
        .expect("initiative fragment present");
    assert!(
        initiative.content.contains("SAFe Process: Iteration Planning"),
        "{}",
        initiative.content
    );
}

#[tokio::test]
async fn followup_inherits_previous_work_item() {
    let engine = engine(payment_graph(), Arc::new(FakeVectorStore::default()));
    let history = vec!["What's the status of EPIC-003?".to_string()];
    let response = engine.answer("is that still on track?", &history).await;

    assert!(response
        .context
        .iter()
        .any(|f| f.content.contains("Receipt Sync")));
    assert_eq!(response.sources, vec!["Work Item Hierarchy".to_string()]);
}

#[tokio::test]
async fn vector_hits_preferred_over_text_fallback() {
    let mut vectors = FakeVectorStore {
        collections: vec!["aura_work_items".to_string()],
        hits: HashMap::new(),
    };
    let mut metadata = HashMap::new();
    metadata.insert("workItemId".to_string(), serde_json::json!("epic-009"));
    metadata.insert("workItemType".to_string(), serde_json::json!("epic"));
    metadata.insert("title".to_string(), serde_json::json!("Chargeback Review"));
    vectors.hits.insert(
        "aura_work_items".to_string(),
        vec![VectorHit {
            content: "Chargeback Review: handle disputed transactions".to_string(),
            metadata,
            distance: 0.2,
        }],
    );

    let engine = engine(payment_graph(), Arc::new(vectors));
    let response = engine.answer("tell me about chargeback handling", &[]).await;

    assert!(response.sources.contains(&"Work Items".to_string()));
    assert!(!response.sources.contains(&"Work Item Search".to_string()));
    let hit = response
        .context
        .iter()
        .find(|f| f.source == "Work Items")
        .unwrap();
    assert!((hit.relevance - 0.8).abs() < 1e-6);
}

#[tokio::test]
async fn failing_vector_store_still_answers_from_text() {
    use WorkItemType::*;
    let store = Arc::new(InMemoryWorkItemStore::from_items(vec![item(
        Story,
        "story-001",
        "Checkout Button",
        None,
        "execution",
        Some("New checkout button styling"),
    )]));
    let engine = engine(store, Arc::new(FailingVectorStore));
    let response = engine.answer("what is happening with the checkout button?", &[]).await;

    assert!(response.sources.contains(&"Work Item Search".to_string()));
    assert!(response.confidence > 0.0);
}

#[tokio::test]
async fn no_matching_data_yields_zero_confidence_answer() {
    let store = Arc::new(InMemoryWorkItemStore::new());
    let engine = engine(store, Arc::new(FakeVectorStore::default()));
    let response = engine.answer("zzzz qqqq?", &[]).await;

    assert!(response.context.is_empty());
    assert!(response.sources.is_empty());
    assert_eq!(response.confidence, 0.0);
    assert_eq!(response.message, NO_CONTEXT_MESSAGE);
}

#[tokio::test]
async fn whole_graph_listing_without_entities() {
    let engine = engine(payment_graph(), Arc::new(FakeVectorStore::default()));
    let response = engine.answer("how many epics do we have?", &[]).await;

    assert_eq!(response.context.len(), 1);
    assert!(response.context[0].content.contains("Epics: 5"));
}
