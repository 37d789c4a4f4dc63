//! Ingestion run loop with per-file fault isolation

use futures_util::future::join_all;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;

use crate::config::IngestConfig;
use crate::error::Result;
use crate::ingestion::{resolve_reader, ChunkSplitter};
use crate::providers::{EmbeddingProvider, VectorIndexProvider};
use crate::types::{EmbeddedChunk, Report, SkipReason};

/// Outcome of running one file through the pipeline
enum FileOutcome {
    Processed { chunks: usize },
    Skipped(SkipReason),
}

/// Runs a directory of files through read → split → embed → upsert
///
/// One file's failure never aborts the run: every per-file error is
/// converted into a recorded skip. Only configuration errors are fatal,
/// and those fail before any file is read.
pub struct IngestionOrchestrator {
    config: IngestConfig,
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndexProvider>,
}

impl IngestionOrchestrator {
    /// Create an orchestrator over an explicitly owned embedder and index
    ///
    /// Both collaborators are constructed once by the caller and reused
    /// across all files of the run.
    pub fn new(
        config: IngestConfig,
        embedder: Arc<dyn EmbeddingProvider>,
        index: Arc<dyn VectorIndexProvider>,
    ) -> Self {
        Self {
            config,
            embedder,
            index,
        }
    }

    /// Run the ingestion pipeline over the configured source directory
    pub async fn run(&self) -> Result<Report> {
        self.config.validate()?;

        let files = self.list_files()?;
        let parallel_files = self.config.processing.effective_parallel_files();
        tracing::info!(
            source_dir = %self.config.source_dir.display(),
            files = files.len(),
            workers = parallel_files,
            "starting ingestion run"
        );

        let semaphore = Arc::new(Semaphore::new(parallel_files));
        let futures: Vec<_> = files
            .into_iter()
            .map(|path| {
                let semaphore = semaphore.clone();
                let embedder = self.embedder.clone();
                let index = self.index.clone();
                let splitter = ChunkSplitter::from_config(&self.config.chunking);
                let collection = self.config.collection_name.clone();

                async move {
                    let _permit = semaphore.acquire().await.expect("semaphore closed");
                    let outcome = process_file(
                        &path,
                        &splitter,
                        embedder.as_ref(),
                        index.as_ref(),
                        &collection,
                    )
                    .await;
                    (path, outcome)
                }
            })
            .collect();

        let mut report = Report::default();
        for (path, outcome) in join_all(futures).await {
            match outcome {
                FileOutcome::Processed { chunks } => {
                    tracing::info!(path = %path.display(), chunks, "file indexed");
                    report.record_processed(chunks);
                }
                FileOutcome::Skipped(reason) => {
                    tracing::warn!(path = %path.display(), %reason, "file skipped");
                    report.record_skipped(path, reason);
                }
            }
        }

        tracing::info!(
            processed = report.files_processed,
            skipped = report.files_skipped(),
            chunks = report.chunks_indexed,
            "ingestion run complete"
        );
        Ok(report)
    }

    /// Immediate file entries of the source directory, sorted by name
    /// for reproducible run order
    fn list_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in std::fs::read_dir(&self.config.source_dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                files.push(entry.path());
            }
        }
        files.sort();
        Ok(files)
    }
}

async fn process_file(
    path: &Path,
    splitter: &ChunkSplitter,
    embedder: &dyn EmbeddingProvider,
    index: &dyn VectorIndexProvider,
    collection: &str,
) -> FileOutcome {
    let Some(reader) = resolve_reader(path) else {
        return FileOutcome::Skipped(SkipReason::UnsupportedFormat);
    };

    // parsers are sync and possibly heavy, keep them off the async workers
    let load_path = path.to_path_buf();
    let records = match tokio::task::spawn_blocking(move || reader.load(&load_path)).await {
        Ok(Ok(records)) => records,
        Ok(Err(e)) => return FileOutcome::Skipped(SkipReason::ReadFailure(e.to_string())),
        Err(e) => {
            return FileOutcome::Skipped(SkipReason::ReadFailure(format!(
                "reader task failed: {}",
                e
            )))
        }
    };

    let chunks = splitter.split(&records);
    if chunks.is_empty() {
        return FileOutcome::Processed { chunks: 0 };
    }

    let texts: Vec<String> = chunks.iter().map(|chunk| chunk.text.clone()).collect();
    let vectors = match embedder.embed_batch(&texts).await {
        Ok(vectors) => vectors,
        Err(e) => return FileOutcome::Skipped(SkipReason::EmbeddingFailure(e.to_string())),
    };
    if vectors.len() != chunks.len() {
        return FileOutcome::Skipped(SkipReason::EmbeddingFailure(format!(
            "embedder returned {} vectors for {} chunks",
            vectors.len(),
            chunks.len()
        )));
    }

    let expected_dim = embedder.dimensions();
    let model_id = embedder.model_id().to_string();
    let items: Vec<EmbeddedChunk> = chunks
        .into_iter()
        .zip(vectors)
        .map(|(chunk, vector)| EmbeddedChunk::new(chunk, vector, model_id.clone()))
        .collect();

    if let Some(bad) = items.iter().find(|item| item.vector_dim != expected_dim) {
        return FileOutcome::Skipped(SkipReason::EmbeddingFailure(format!(
            "vector dimension {} does not match model dimension {}",
            bad.vector_dim, expected_dim
        )));
    }

    match index.upsert(collection, &items).await {
        Ok(()) => FileOutcome::Processed {
            chunks: items.len(),
        },
        Err(e) => FileOutcome::Skipped(SkipReason::IndexFailure(e.to_string())),
    }
}
