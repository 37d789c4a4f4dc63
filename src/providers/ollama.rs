//! Ollama-backed embedding provider

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::EmbeddingConfig;
use crate::error::{Error, Result};

use super::embedding::EmbeddingProvider;

#[derive(Serialize)]
struct EmbedRequest {
    model: String,
    prompt: String,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embedding: Vec<f32>,
}

/// Embedding provider backed by an Ollama server
pub struct OllamaEmbedder {
    client: reqwest::Client,
    base_url: String,
    model: String,
    dimensions: usize,
    max_retries: u32,
}

impl OllamaEmbedder {
    /// Create a new embedder from configuration
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            dimensions: config.dimensions,
            max_retries: config.max_retries,
        })
    }

    async fn request_embedding(&self, text: &str) -> Result<Vec<f32>> {
        let request = EmbedRequest {
            model: self.model.clone(),
            prompt: text.to_string(),
        };

        let response = self
            .client
            .post(format!("{}/api/embeddings", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::embedding(format!("embedding request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::embedding(format!(
                "embedding failed: HTTP {}",
                response.status()
            )));
        }

        let parsed: EmbedResponse = response
            .json()
            .await
            .map_err(|e| Error::embedding(format!("invalid embedding response: {}", e)))?;

        if parsed.embedding.len() != self.dimensions {
            return Err(Error::embedding(format!(
                "model '{}' returned {} dimensions, expected {}",
                self.model,
                parsed.embedding.len(),
                self.dimensions
            )));
        }

        Ok(parsed.embedding)
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut last_error = None;
        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let backoff = Duration::from_millis(250 * 2u64.pow(attempt - 1));
                tracing::warn!(attempt, "retrying embedding request after {:?}", backoff);
                tokio::time::sleep(backoff).await;
            }
            match self.request_embedding(text).await {
                Ok(vector) => return Ok(vector),
                Err(e) => last_error = Some(e),
            }
        }
        Err(last_error.unwrap_or_else(|| Error::embedding("embedding request failed")))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model_id(&self) -> &str {
        &self.model
    }

    async fn health_check(&self) -> Result<bool> {
        let response = self
            .client
            .get(format!("{}/api/tags", self.base_url))
            .send()
            .await;
        Ok(matches!(response, Ok(r) if r.status().is_success()))
    }

    fn name(&self) -> &str {
        "ollama"
    }
}
