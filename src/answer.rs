//! Retrieval-augmented answering.
//!
//! The [`Answerer`] owns the built index and the embedding provider the
//! index was built with, so query vectors always live in the same space as
//! the stored vectors. A question turns into: embed → top-K retrieve →
//! context prompt → one generate call.
//!
//! Failures here propagate to the caller; the chat loop is the only place
//! that catches them.

use anyhow::Result;
use std::sync::Arc;

use crate::embedding::EmbeddingProvider;
use crate::index::VectorIndex;
use crate::models::SearchHit;
use crate::ollama::OllamaClient;

/// Returned without a model call when nothing was indexed.
pub const NO_CONTEXT_ANSWER: &str = "I don't have any personal data indexed yet, so there is \
no context available to answer from. Configure a mail, notes, or calendar source and restart.";

pub struct Answerer {
    index: VectorIndex,
    embedder: Box<dyn EmbeddingProvider>,
    llm: Arc<OllamaClient>,
    top_k: usize,
}

impl Answerer {
    pub fn new(
        index: VectorIndex,
        embedder: Box<dyn EmbeddingProvider>,
        llm: Arc<OllamaClient>,
        top_k: usize,
    ) -> Self {
        Self {
            index,
            embedder,
            llm,
            top_k,
        }
    }

    pub fn has_context(&self) -> bool {
        !self.index.is_empty()
    }

    /// Answer a question from retrieved personal context.
    pub async fn answer(&self, question: &str) -> Result<String> {
        if self.index.is_empty() {
            return Ok(NO_CONTEXT_ANSWER.to_string());
        }

        let query = self.embedder.embed(question).await?;
        let hits = self.index.search(&query, self.top_k);
        let prompt = build_prompt(question, &hits);
        self.llm.generate(&prompt).await
    }
}

/// Assemble retrieved chunks into a numbered context block.
fn build_context(hits: &[SearchHit]) -> String {
    let mut context = String::new();
    for (i, hit) in hits.iter().enumerate() {
        context.push_str(&format!("[{}] {}\n\n", i + 1, hit.text));
    }
    context
}

fn build_prompt(question: &str, hits: &[SearchHit]) -> String {
    format!(
        "Use the following pieces of personal context to answer the question at \
the end. The context comes from the user's email, notes, and calendar. If the \
answer is not in the context, say you don't know; do not make anything up.\n\n\
Context:\n{}Question: {}\n\nAnswer:",
        build_context(hits),
        question
    )
}
