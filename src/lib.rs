//! corpus-ingest: content-aware document chunking and vector ingestion
//!
//! This crate turns a directory of heterogeneous documents into an indexed
//! set of embedded chunks. Files are dispatched to format-specific readers,
//! split into chunks sized by a sentence-counting rule, embedded in batches,
//! and upserted into a vector index — with per-file fault isolation, so one
//! broken file never aborts a run.

pub mod config;
pub mod error;
pub mod ingestion;
pub mod processing;
pub mod providers;
pub mod types;

pub use config::IngestConfig;
pub use error::{Error, Result};
pub use processing::IngestionOrchestrator;
pub use types::{Chunk, EmbeddedChunk, RawRecord, Report, SkipReason};
