//! Record, chunk, and collection types flowing through the pipeline

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use uuid::Uuid;

/// Free-form metadata attached to records and chunks
pub type Metadata = HashMap<String, Value>;

/// One logical sub-unit emitted by a document reader
/// (the whole document for most formats, one row for CSV)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRecord {
    /// File the record came from
    pub source_path: PathBuf,
    /// Extracted text content
    pub text: String,
    /// Reader-supplied metadata (format, content hash, page/row info)
    pub metadata: Metadata,
}

impl RawRecord {
    /// Create a record with empty metadata
    pub fn new(source_path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            source_path: source_path.into(),
            text: text.into(),
            metadata: Metadata::new(),
        }
    }

    /// Attach a metadata entry
    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}

/// A retrieval-sized span of a document's text
///
/// Chunks are immutable after creation. Within one source document,
/// `sequence_index` starts at 0 and increases by 1 with no gaps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// Unique chunk id, used as the upsert key
    pub id: Uuid,
    /// File the chunk came from
    pub source_path: PathBuf,
    /// Position of the chunk within its source document
    pub sequence_index: usize,
    /// Chunk text
    pub text: String,
    /// Sentence count of `text` as reported by the sentence counter
    pub sentence_count: usize,
    /// Metadata inherited from the source record
    pub metadata: Metadata,
}

impl Chunk {
    /// Create a new chunk
    pub fn new(
        source_path: impl Into<PathBuf>,
        sequence_index: usize,
        text: impl Into<String>,
        sentence_count: usize,
        metadata: Metadata,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            source_path: source_path.into(),
            sequence_index,
            text: text.into(),
            sentence_count,
            metadata,
        }
    }
}

/// A chunk paired with its embedding vector
///
/// Wraps, never replaces, the underlying [`Chunk`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddedChunk {
    /// The embedded chunk
    pub chunk: Chunk,
    /// Embedding vector
    pub vector: Vec<f32>,
    /// Vector dimension, must match the destination collection
    pub vector_dim: usize,
    /// Model that produced the vector
    pub model_id: String,
}

impl EmbeddedChunk {
    /// Wrap a chunk with its embedding
    pub fn new(chunk: Chunk, vector: Vec<f32>, model_id: impl Into<String>) -> Self {
        let vector_dim = vector.len();
        Self {
            chunk,
            vector,
            vector_dim,
            model_id: model_id.into(),
        }
    }
}

/// A named destination in the vector index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    /// Collection name
    pub name: String,
    /// Embedding dimension of the collection
    pub dimension: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_embedded_chunk_records_dimension() {
        let chunk = Chunk::new("a.txt", 0, "Hello.", 1, Metadata::new());
        let embedded = EmbeddedChunk::new(chunk, vec![0.1, 0.2, 0.3], "test-model");
        assert_eq!(embedded.vector_dim, 3);
        assert_eq!(embedded.model_id, "test-model");
        assert_eq!(embedded.chunk.text, "Hello.");
    }

    #[test]
    fn test_record_metadata_builder() {
        let record = RawRecord::new("a.csv", "x: 1").with_metadata("row", json!(0));
        assert_eq!(record.metadata.get("row"), Some(&json!(0)));
    }
}
