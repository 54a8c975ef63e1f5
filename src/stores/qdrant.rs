//! Qdrant-backed `VectorStore`.
//!
//! Queries are embedded through the configured `Embedder`, then searched
//! with cosine similarity. Scores come back as similarities; they are
//! converted to the `distance` the retriever expects (`1 - score`).

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use qdrant_client::{
    client::QdrantClient,
    qdrant::{with_payload_selector::SelectorOptions, SearchPoints, Value as QdrantValue, WithPayloadSelector},
};
use serde_json::Value as JsonValue;

use crate::errors::{ChatError, Result};
use crate::model::Embedder;

use super::{VectorHit, VectorStore};

pub struct QdrantVectorStore {
    client: QdrantClient,
    embedder: Arc<dyn Embedder>,
}

impl QdrantVectorStore {
    pub fn new(url: &str, embedder: Arc<dyn Embedder>) -> Result<Self> {
        let client = QdrantClient::from_url(url)
            .build()
            .map_err(|e| ChatError::VectorStore(format!("failed to create client: {e}")))?;
        Ok(Self { client, embedder })
    }
}

#[async_trait]
impl VectorStore for QdrantVectorStore {
    async fn list_collections(&self) -> Result<Vec<String>> {
        let response = self
            .client
            .list_collections()
            .await
            .map_err(|e| ChatError::VectorStore(format!("list collections failed: {e}")))?;
        Ok(response.collections.into_iter().map(|c| c.name).collect())
    }

    async fn search(&self, collection: &str, query: &str, limit: usize) -> Result<Vec<VectorHit>> {
        let vector = self.embedder.embed(query).await?;

        let response = self
            .client
            .search_points(&SearchPoints {
                collection_name: collection.to_string(),
                vector,
                limit: limit as u64,
                with_payload: Some(WithPayloadSelector {
                    selector_options: Some(SelectorOptions::Enable(true)),
                }),
                ..Default::default()
            })
            .await
            .map_err(|e| ChatError::VectorStore(format!("search in {collection} failed: {e}")))?;

        let hits = response
            .result
            .into_iter()
            .map(|point| {
                let payload = point.payload;
                let content = payload
                    .get("content")
                    .or_else(|| payload.get("document"))
                    .and_then(qdrant_value_to_string)
                    .unwrap_or_default();

                let mut metadata = HashMap::new();
                for (key, value) in payload {
                    if key != "content" && key != "document" {
                        if let Some(json) = qdrant_to_json_value(&value) {
                            metadata.insert(key, json);
                        }
                    }
                }

                VectorHit {
                    content,
                    metadata,
                    // Cosine similarity -> distance.
                    distance: (1.0 - point.score).clamp(0.0, 1.0),
                }
            })
            .collect();

        Ok(hits)
    }
}

fn qdrant_to_json_value(value: &QdrantValue) -> Option<JsonValue> {
    use qdrant_client::qdrant::value::Kind;
    value.kind.as_ref().and_then(|kind| match kind {
        Kind::StringValue(s) => Some(JsonValue::String(s.clone())),
        Kind::IntegerValue(i) => Some(JsonValue::Number((*i).into())),
        Kind::DoubleValue(f) => serde_json::Number::from_f64(*f).map(JsonValue::Number),
        Kind::BoolValue(b) => Some(JsonValue::Bool(*b)),
        _ => None,
    })
}

fn qdrant_value_to_string(value: &QdrantValue) -> Option<String> {
    use qdrant_client::qdrant::value::Kind;
    value.kind.as_ref().and_then(|kind| match kind {
        Kind::StringValue(s) => Some(s.clone()),
        _ => None,
    })
}
