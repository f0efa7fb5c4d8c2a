//! In-memory vector similarity index.
//!
//! Built once from the full corpus at startup and read-only afterwards;
//! there is no incremental update path. Search is brute-force cosine
//! similarity over all stored vectors, which is plenty for a personal
//! corpus of a few hundred snippets.

use anyhow::Result;

use crate::embedding::{cosine_similarity, EmbeddingProvider};
use crate::models::{IndexedChunk, SearchHit};

pub struct VectorIndex {
    chunks: Vec<IndexedChunk>,
}

impl VectorIndex {
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Build an index over `texts` in one batch pass.
    ///
    /// Embeds with `primary`; if the whole batch fails (backend down,
    /// model missing), logs one warning and re-embeds everything with
    /// `fallback` so a degraded index can still be built. Returns the
    /// index together with the provider that actually embedded it, so
    /// queries stay aligned with the stored vectors.
    ///
    /// An empty `texts` builds an empty index without error.
    pub async fn build(
        texts: Vec<String>,
        primary: Box<dyn EmbeddingProvider>,
        fallback: Box<dyn EmbeddingProvider>,
    ) -> Result<(Self, Box<dyn EmbeddingProvider>)> {
        if texts.is_empty() {
            return Ok((Self { chunks: Vec::new() }, primary));
        }

        let (vectors, provider) = match primary.embed_batch(&texts).await {
            Ok(vectors) => (vectors, primary),
            Err(e) => {
                eprintln!(
                    "Warning: embedding backend '{}' failed ({}); \
                     building index with deterministic fallback embeddings",
                    primary.name(),
                    e
                );
                (fallback.embed_batch(&texts).await?, fallback)
            }
        };

        let chunks = texts
            .into_iter()
            .zip(vectors)
            .map(|(text, embedding)| IndexedChunk { text, embedding })
            .collect();

        Ok((Self { chunks }, provider))
    }

    /// Return the `top_k` chunks most similar to `query`, best first.
    ///
    /// Ordering is deterministic: cosine similarity descending, insertion
    /// order as the tie-break.
    pub fn search(&self, query: &[f32], top_k: usize) -> Vec<SearchHit> {
        let mut scored: Vec<(usize, f32)> = self
            .chunks
            .iter()
            .enumerate()
            .map(|(i, chunk)| (i, cosine_similarity(query, &chunk.embedding)))
            .collect();

        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        scored.truncate(top_k);

        scored
            .into_iter()
            .map(|(i, score)| SearchHit {
                text: self.chunks[i].text.clone(),
                score,
            })
            .collect()
    }
}
