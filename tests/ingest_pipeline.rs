//! End-to-end ingestion runs against a mock embedder and the in-memory index

use async_trait::async_trait;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use corpus_ingest::config::IngestConfig;
use corpus_ingest::error::{Error, Result};
use corpus_ingest::providers::{EmbeddingProvider, InMemoryIndex, VectorIndexProvider};
use corpus_ingest::types::SkipReason;
use corpus_ingest::IngestionOrchestrator;

/// Deterministic embedder: vector derived from text length, call count tracked
struct MockEmbedder {
    dimensions: usize,
    calls: AtomicUsize,
    fail: bool,
}

impl MockEmbedder {
    fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            calls: AtomicUsize::new(0),
            fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            dimensions: 4,
            calls: AtomicUsize::new(0),
            fail: true,
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(Error::embedding("mock embedder offline"));
        }
        let seed = text.len() as f32;
        Ok((0..self.dimensions).map(|i| seed + i as f32).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model_id(&self) -> &str {
        "mock-embed"
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(!self.fail)
    }

    fn name(&self) -> &str {
        "mock"
    }
}

fn trace_init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn config_for(dir: &Path) -> IngestConfig {
    let mut config = IngestConfig::default();
    config.source_dir = dir.to_path_buf();
    config.collection_name = "test_documents".to_string();
    config
}

#[tokio::test]
async fn six_sentence_text_file_yields_two_overlapping_chunks() {
    trace_init();
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("notes.txt"), "A. B. C. D. E. F.").unwrap();

    let embedder = Arc::new(MockEmbedder::new(4));
    let index = Arc::new(InMemoryIndex::new());
    let orchestrator = IngestionOrchestrator::new(
        config_for(dir.path()),
        embedder.clone(),
        index.clone(),
    );

    let report = orchestrator.run().await.unwrap();

    assert_eq!(report.files_processed, 1);
    assert_eq!(report.files_skipped(), 0);
    assert_eq!(report.chunks_indexed, 2);
    assert_eq!(embedder.call_count(), 2);

    let collection = index.collection("test_documents").unwrap();
    assert_eq!(collection.dimension, 4);
    assert_eq!(index.collection_len("test_documents").await.unwrap(), 2);
}

#[tokio::test]
async fn unknown_extension_is_recorded_as_unsupported() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("blob.xyz"), "whatever").unwrap();

    let embedder = Arc::new(MockEmbedder::new(4));
    let index = Arc::new(InMemoryIndex::new());
    let orchestrator =
        IngestionOrchestrator::new(config_for(dir.path()), embedder.clone(), index.clone());

    let report = orchestrator.run().await.unwrap();

    assert_eq!(report.files_processed, 0);
    assert_eq!(report.chunks_indexed, 0);
    assert_eq!(report.files_skipped(), 1);
    assert_eq!(report.skipped[0].reason, SkipReason::UnsupportedFormat);
    assert_eq!(embedder.call_count(), 0);
}

#[tokio::test]
async fn invalid_configuration_aborts_before_any_file_is_read() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("notes.txt"), "A. B. C.").unwrap();

    let mut config = config_for(dir.path());
    config.chunking.chunk_size = 1;
    config.chunking.overlap = 1;

    let embedder = Arc::new(MockEmbedder::new(4));
    let index = Arc::new(InMemoryIndex::new());
    let orchestrator = IngestionOrchestrator::new(config, embedder.clone(), index.clone());

    let err = orchestrator.run().await.unwrap_err();
    assert!(matches!(err, Error::Config(_)));
    assert_eq!(embedder.call_count(), 0);
    assert!(index.collection("test_documents").is_none());
}

#[tokio::test]
async fn read_failure_is_isolated_to_the_broken_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("broken.json"), "{not json at all").unwrap();
    std::fs::write(dir.path().join("table.csv"), "name,age\nalice,30\nbob,25\n").unwrap();

    let embedder = Arc::new(MockEmbedder::new(4));
    let index = Arc::new(InMemoryIndex::new());
    let orchestrator =
        IngestionOrchestrator::new(config_for(dir.path()), embedder.clone(), index.clone());

    let report = orchestrator.run().await.unwrap();

    assert_eq!(report.files_processed, 1);
    assert_eq!(report.files_skipped(), 1);
    assert!(matches!(
        report.skipped[0].reason,
        SkipReason::ReadFailure(_)
    ));
    // one chunk per CSV row
    assert_eq!(report.chunks_indexed, 2);
    assert_eq!(index.collection_len("test_documents").await.unwrap(), 2);
}

#[tokio::test]
async fn embedding_failure_is_recorded_and_run_still_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("notes.txt"), "A. B. C.").unwrap();

    let embedder = Arc::new(MockEmbedder::failing());
    let index = Arc::new(InMemoryIndex::new());
    let orchestrator =
        IngestionOrchestrator::new(config_for(dir.path()), embedder.clone(), index.clone());

    let report = orchestrator.run().await.unwrap();

    assert_eq!(report.files_processed, 0);
    assert_eq!(report.files_skipped(), 1);
    assert!(matches!(
        report.skipped[0].reason,
        SkipReason::EmbeddingFailure(_)
    ));
    assert_eq!(index.collection_len("test_documents").await.unwrap(), 0);
}

#[tokio::test]
async fn empty_directory_completes_with_empty_report() {
    let dir = tempfile::tempdir().unwrap();

    let embedder = Arc::new(MockEmbedder::new(4));
    let index = Arc::new(InMemoryIndex::new());
    let orchestrator =
        IngestionOrchestrator::new(config_for(dir.path()), embedder, index);

    let report = orchestrator.run().await.unwrap();
    assert_eq!(report.files_processed, 0);
    assert_eq!(report.files_skipped(), 0);
    assert_eq!(report.chunks_indexed, 0);
}

#[tokio::test]
async fn mixed_directory_processes_every_supported_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.txt"), "First. Second.").unwrap();
    std::fs::write(dir.path().join("b.dat"), "Third. Fourth.").unwrap();
    std::fs::write(
        dir.path().join("c.html"),
        "<html><body><p>Fifth sentence here.</p></body></html>",
    )
    .unwrap();
    std::fs::write(dir.path().join("skip.bin"), [0u8, 1, 2]).unwrap();

    let embedder = Arc::new(MockEmbedder::new(4));
    let index = Arc::new(InMemoryIndex::new());
    let orchestrator =
        IngestionOrchestrator::new(config_for(dir.path()), embedder, index.clone());

    let report = orchestrator.run().await.unwrap();

    assert_eq!(report.files_processed, 3);
    assert_eq!(report.files_skipped(), 1);
    assert_eq!(report.chunks_indexed, 3);
    assert_eq!(index.collection_len("test_documents").await.unwrap(), 3);
}
