//! In-memory vector index keyed by chunk id

use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::types::{Collection, EmbeddedChunk, Metadata};

/// One stored point: vector plus the chunk payload
#[derive(Debug, Clone)]
pub struct StoredPoint {
    /// Embedding vector
    pub vector: Vec<f32>,
    /// Chunk text
    pub text: String,
    /// Chunk metadata
    pub metadata: Metadata,
}

#[derive(Debug)]
struct CollectionState {
    dimension: usize,
    points: HashMap<Uuid, StoredPoint>,
}

/// In-memory vector index
///
/// Collections are created lazily on first upsert with that batch's
/// dimension; later batches must match it. Points are keyed by chunk id,
/// so re-upserting an id overwrites the previous point.
#[derive(Debug, Default)]
pub struct InMemoryIndex {
    collections: DashMap<String, CollectionState>,
}

impl InMemoryIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a collection's descriptor, if it has been created
    pub fn collection(&self, name: &str) -> Option<Collection> {
        self.collections.get(name).map(|state| Collection {
            name: name.to_string(),
            dimension: state.dimension,
        })
    }

    /// Fetch a stored point by id
    pub fn point(&self, collection: &str, id: &Uuid) -> Option<StoredPoint> {
        self.collections
            .get(collection)
            .and_then(|state| state.points.get(id).cloned())
    }
}

#[async_trait]
impl crate::providers::VectorIndexProvider for InMemoryIndex {
    async fn upsert(&self, collection: &str, items: &[EmbeddedChunk]) -> Result<()> {
        let Some(first) = items.first() else {
            return Ok(());
        };

        let mut state = self
            .collections
            .entry(collection.to_string())
            .or_insert_with(|| CollectionState {
                dimension: first.vector_dim,
                points: HashMap::new(),
            });

        for item in items {
            if item.vector_dim != state.dimension {
                return Err(Error::index(format!(
                    "dimension mismatch in collection '{}': expected {}, got {}",
                    collection, state.dimension, item.vector_dim
                )));
            }
            state.points.insert(
                item.chunk.id,
                StoredPoint {
                    vector: item.vector.clone(),
                    text: item.chunk.text.clone(),
                    metadata: item.chunk.metadata.clone(),
                },
            );
        }
        Ok(())
    }

    async fn collection_len(&self, collection: &str) -> Result<usize> {
        Ok(self
            .collections
            .get(collection)
            .map(|state| state.points.len())
            .unwrap_or(0))
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::VectorIndexProvider;
    use crate::types::Chunk;

    fn embedded(text: &str, vector: Vec<f32>) -> EmbeddedChunk {
        let chunk = Chunk::new("a.txt", 0, text, 1, Metadata::new());
        EmbeddedChunk::new(chunk, vector, "test-model")
    }

    #[tokio::test]
    async fn test_collection_created_lazily() {
        let index = InMemoryIndex::new();
        assert!(index.collection("docs").is_none());
        assert_eq!(index.collection_len("docs").await.unwrap(), 0);

        index.upsert("docs", &[embedded("A.", vec![1.0, 2.0])]).await.unwrap();

        let collection = index.collection("docs").unwrap();
        assert_eq!(collection.dimension, 2);
        assert_eq!(index.collection_len("docs").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_upsert_overwrites_by_id() {
        let index = InMemoryIndex::new();
        let mut item = embedded("A.", vec![1.0, 2.0]);
        index.upsert("docs", &[item.clone()]).await.unwrap();

        item.vector = vec![3.0, 4.0];
        index.upsert("docs", &[item.clone()]).await.unwrap();

        assert_eq!(index.collection_len("docs").await.unwrap(), 1);
        let stored = index.point("docs", &item.chunk.id).unwrap();
        assert_eq!(stored.vector, vec![3.0, 4.0]);
    }

    #[tokio::test]
    async fn test_dimension_mismatch_is_rejected() {
        let index = InMemoryIndex::new();
        index.upsert("docs", &[embedded("A.", vec![1.0, 2.0])]).await.unwrap();

        let err = index
            .upsert("docs", &[embedded("B.", vec![1.0, 2.0, 3.0])])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Index(_)));
    }

    #[tokio::test]
    async fn test_empty_upsert_is_a_noop() {
        let index = InMemoryIndex::new();
        index.upsert("docs", &[]).await.unwrap();
        assert!(index.collection("docs").is_none());
    }
}
