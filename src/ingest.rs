//! Startup orchestration: loaders → corpus → chunks → index → agent.
//!
//! Everything here runs to completion before the first question can be
//! answered; the index is never queried while loading is in flight.

use anyhow::Result;
use std::sync::Arc;

use crate::agent::Agent;
use crate::answer::Answerer;
use crate::chunk::chunk_text;
use crate::config::Config;
use crate::corpus;
use crate::embedding::{HashEmbedder, OllamaEmbedder};
use crate::index::VectorIndex;
use crate::ollama::OllamaClient;

/// Process-wide state: the built index wired into the agent. Created once
/// at startup, read-only for the life of the chat loop, no persistence.
pub struct Session {
    pub agent: Agent,
}

pub async fn build_session(config: &Config) -> Result<Session> {
    let corpus = corpus::load_corpus(config).await;

    let mut texts: Vec<String> = Vec::with_capacity(corpus.len());
    for item in &corpus {
        texts.extend(chunk_text(
            item.as_str(),
            config.chunking.max_tokens,
            config.chunking.overlap_tokens,
        ));
    }

    let llm = Arc::new(OllamaClient::new(&config.model)?);
    let primary = Box::new(OllamaEmbedder::new(Arc::clone(&llm), config.embedding.dims));
    let fallback = Box::new(HashEmbedder::new(config.embedding.dims));

    let (index, embedder) = VectorIndex::build(texts, primary, fallback).await?;
    println!("indexed {} chunks", index.len());

    let answerer = Answerer::new(index, embedder, Arc::clone(&llm), config.retrieval.top_k);
    Ok(Session {
        agent: Agent::new(answerer, llm),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answer::NO_CONTEXT_ANSWER;

    #[tokio::test]
    async fn test_empty_session_answers_without_context() {
        // Default config: no credentials anywhere, so every loader comes
        // back empty and the question never reaches the model.
        let config = Config::default();
        let session = build_session(&config).await.unwrap();
        let answer = session
            .agent
            .respond("What meetings do I have?")
            .await
            .unwrap();
        assert_eq!(answer, NO_CONTEXT_ANSWER);
    }
}
