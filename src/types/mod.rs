//! Core value types for the ingestion pipeline

pub mod document;
pub mod report;

pub use document::{Chunk, Collection, EmbeddedChunk, Metadata, RawRecord};
pub use report::{Report, SkipReason, SkippedFile};
