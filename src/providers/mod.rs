//! Provider abstractions for embeddings and vector storage
//!
//! Trait-based seams for the pipeline's external collaborators: the
//! embedding model and the vector index.

pub mod embedding;
pub mod memory;
pub mod ollama;
pub mod vector_store;

pub use embedding::EmbeddingProvider;
pub use memory::InMemoryIndex;
pub use ollama::OllamaEmbedder;
pub use vector_store::VectorIndexProvider;
