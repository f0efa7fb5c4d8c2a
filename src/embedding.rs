//! Embedding provider abstraction and implementations.
//!
//! Defines the [`EmbeddingProvider`] trait and concrete implementations:
//! - **[`OllamaEmbedder`]** — calls the Ollama embeddings API.
//! - **[`HashEmbedder`]** — deterministic hash-derived vectors used as a
//!   fallback when the real backend is unavailable. Retrieval quality is
//!   meaningless with this provider; callers may rely only on embedding
//!   *presence* and determinism.
//!
//! Also provides [`cosine_similarity`] for scoring vectors against a query.

use anyhow::Result;
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::sync::Arc;

use crate::ollama::OllamaClient;

/// Trait for embedding backends.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Returns the provider identifier (e.g. `"ollama"`).
    fn name(&self) -> &str;

    /// Returns the embedding vector dimensionality.
    fn dims(&self) -> usize;

    /// Embed a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed a batch of texts, one vector per input, in input order.
    ///
    /// The default implementation embeds sequentially; the Ollama API has
    /// no native batch endpoint.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut embeddings = Vec::with_capacity(texts.len());
        for text in texts {
            embeddings.push(self.embed(text).await?);
        }
        Ok(embeddings)
    }
}

// ============ Ollama Provider ============

/// Embedding provider backed by the Ollama embeddings API.
pub struct OllamaEmbedder {
    client: Arc<OllamaClient>,
    dims: usize,
}

impl OllamaEmbedder {
    pub fn new(client: Arc<OllamaClient>, dims: usize) -> Self {
        Self { client, dims }
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaEmbedder {
    fn name(&self) -> &str {
        "ollama"
    }

    fn dims(&self) -> usize {
        self.dims
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.client.embed(text).await
    }
}

// ============ Deterministic Fallback Provider ============

/// Deterministic pseudo-embedding provider.
///
/// Derives a fixed-dimensionality vector from a SHA-256 stream over the
/// text: same text, same vector, every run. Used so the index can still be
/// built when the embedding backend is down.
pub struct HashEmbedder {
    dims: usize,
}

impl HashEmbedder {
    pub fn new(dims: usize) -> Self {
        Self { dims }
    }

    fn derive(&self, text: &str) -> Vec<f32> {
        let mut vector = Vec::with_capacity(self.dims);
        let mut block: u64 = 0;
        while vector.len() < self.dims {
            let mut hasher = Sha256::new();
            hasher.update(text.as_bytes());
            hasher.update(block.to_le_bytes());
            let digest = hasher.finalize();
            for word in digest.chunks_exact(4) {
                if vector.len() == self.dims {
                    break;
                }
                let raw = u32::from_le_bytes([word[0], word[1], word[2], word[3]]);
                // Map to [-1.0, 1.0]
                let value = (raw as f64 / u32::MAX as f64) * 2.0 - 1.0;
                vector.push(value as f32);
            }
            block += 1;
        }
        vector
    }
}

#[async_trait]
impl EmbeddingProvider for HashEmbedder {
    fn name(&self) -> &str {
        "hash-fallback"
    }

    fn dims(&self) -> usize {
        self.dims
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.derive(text))
    }
}

// ============ Vector utilities ============

/// Compute cosine similarity between two embedding vectors.
///
/// Returns a value in `[-1.0, 1.0]`; `0.0` for empty vectors or vectors
/// of different lengths.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom < f32::EPSILON {
        return 0.0;
    }

    dot / denom
}
