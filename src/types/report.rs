//! Run summary with typed per-file outcomes

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Why a file was skipped during a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    /// No reader registered for the file's extension
    UnsupportedFormat,
    /// Reader failed to load or parse the file
    ReadFailure(String),
    /// Embedding the file's chunks failed
    EmbeddingFailure(String),
    /// Upserting into the vector index failed
    IndexFailure(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedFormat => write!(f, "unsupported format"),
            Self::ReadFailure(msg) => write!(f, "read failure: {}", msg),
            Self::EmbeddingFailure(msg) => write!(f, "embedding failure: {}", msg),
            Self::IndexFailure(msg) => write!(f, "index failure: {}", msg),
        }
    }
}

/// A file skipped during a run, with its cause
#[derive(Debug, Clone, Serialize)]
pub struct SkippedFile {
    /// Path of the skipped file
    pub path: PathBuf,
    /// Why it was skipped
    pub reason: SkipReason,
}

/// Summary of one ingestion run
#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    /// Files fully processed and indexed
    pub files_processed: usize,
    /// Chunks upserted into the index
    pub chunks_indexed: usize,
    /// Files skipped, with reasons
    pub skipped: Vec<SkippedFile>,
}

impl Report {
    /// Record a successfully processed file
    pub fn record_processed(&mut self, chunks: usize) {
        self.files_processed += 1;
        self.chunks_indexed += chunks;
    }

    /// Record a skipped file
    pub fn record_skipped(&mut self, path: impl Into<PathBuf>, reason: SkipReason) {
        self.skipped.push(SkippedFile {
            path: path.into(),
            reason,
        });
    }

    /// Number of files skipped
    pub fn files_skipped(&self) -> usize {
        self.skipped.len()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} file(s) processed, {} chunk(s) indexed, {} file(s) skipped",
            self.files_processed,
            self.chunks_indexed,
            self.skipped.len()
        )?;
        for skipped in &self.skipped {
            writeln!(f, "  skipped {}: {}", skipped.path.display(), skipped.reason)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_accumulation() {
        let mut report = Report::default();
        report.record_processed(3);
        report.record_processed(2);
        report.record_skipped("bad.xyz", SkipReason::UnsupportedFormat);

        assert_eq!(report.files_processed, 2);
        assert_eq!(report.chunks_indexed, 5);
        assert_eq!(report.files_skipped(), 1);
        assert_eq!(report.skipped[0].reason, SkipReason::UnsupportedFormat);
    }

    #[test]
    fn test_report_display_lists_causes() {
        let mut report = Report::default();
        report.record_skipped("a.json", SkipReason::ReadFailure("bad syntax".into()));
        let rendered = report.to_string();
        assert!(rendered.contains("a.json"));
        assert!(rendered.contains("read failure: bad syntax"));
    }
}
