//! Configuration for the ingestion pipeline

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Main ingestion configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Directory whose immediate entries are candidate files
    pub source_dir: PathBuf,
    /// Destination collection in the vector index
    #[serde(default = "default_collection_name")]
    pub collection_name: String,
    /// Chunking configuration
    #[serde(default)]
    pub chunking: ChunkingConfig,
    /// Embedding configuration
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    /// Processing configuration
    #[serde(default)]
    pub processing: ProcessingConfig,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("data"),
            collection_name: default_collection_name(),
            chunking: ChunkingConfig::default(),
            embedding: EmbeddingConfig::default(),
            processing: ProcessingConfig::default(),
        }
    }
}

impl IngestConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| Error::config(format!("invalid config file: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration invariants
    pub fn validate(&self) -> Result<()> {
        self.chunking.validate()
    }
}

/// Text chunking configuration (sizes are in sentence units)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Target chunk size in sentence units
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// Overlap between consecutive chunks in sentence units
    #[serde(default = "default_overlap")]
    pub overlap: usize,
    /// Separator along which text is first partitioned into units
    #[serde(default = "default_separator")]
    pub separator: String,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            overlap: default_overlap(),
            separator: default_separator(),
        }
    }
}

impl ChunkingConfig {
    /// Validate chunking invariants
    ///
    /// `chunk_size` must be positive and strictly greater than `overlap`,
    /// otherwise chunk accumulation cannot make forward progress.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(Error::config("chunk_size must be greater than 0"));
        }
        if self.overlap >= self.chunk_size {
            return Err(Error::config(format!(
                "overlap ({}) must be smaller than chunk_size ({})",
                self.overlap, self.chunk_size
            )));
        }
        Ok(())
    }
}

/// Embedding backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Ollama base URL
    pub base_url: String,
    /// Embedding model name
    pub model: String,
    /// Embedding dimensions (768 for nomic-embed-text)
    pub dimensions: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Number of retries for failed requests
    pub max_retries: u32,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "nomic-embed-text".to_string(),
            dimensions: 768,
            timeout_secs: 120,
            max_retries: 2,
        }
    }
}

/// Processing configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessingConfig {
    /// Number of files processed in parallel (default: CPU count, max 8)
    pub parallel_files: Option<usize>,
}

impl ProcessingConfig {
    /// Effective worker count for a run
    pub fn effective_parallel_files(&self) -> usize {
        self.parallel_files
            .unwrap_or_else(|| num_cpus::get().min(8))
            .max(1)
    }
}

fn default_collection_name() -> String {
    "documents".to_string()
}

fn default_chunk_size() -> usize {
    5
}

fn default_overlap() -> usize {
    1
}

fn default_separator() -> String {
    "\n".to_string()
}
