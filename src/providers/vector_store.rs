//! Vector index provider trait

use async_trait::async_trait;

use crate::error::Result;
use crate::types::EmbeddedChunk;

/// Trait for upserting embedded chunks into a vector index
///
/// Collections are created implicitly and idempotently on first upsert with
/// the batch's dimension. Implementations must be safe for concurrent
/// upserts into the same collection; id uniqueness/versioning is the
/// index's own contract.
#[async_trait]
pub trait VectorIndexProvider: Send + Sync {
    /// Insert-or-overwrite embedded chunks into `collection`
    async fn upsert(&self, collection: &str, items: &[EmbeddedChunk]) -> Result<()>;

    /// Number of points stored in `collection` (0 if absent)
    async fn collection_len(&self, collection: &str) -> Result<usize>;

    /// Check if the index is healthy
    async fn health_check(&self) -> Result<bool>;

    /// Provider name for logging
    fn name(&self) -> &str;
}
