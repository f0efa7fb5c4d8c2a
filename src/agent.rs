//! Per-turn dispatch between a direct reply and the memory answerer.
//!
//! Each user turn is routed exactly one of two ways: smalltalk gets a bare
//! model call, everything else goes through retrieval. The decision step is
//! explicit and deterministic — there is no reasoning loop and no hidden
//! tool-calling control flow.

use anyhow::Result;
use std::sync::Arc;

use crate::answer::Answerer;
use crate::ollama::OllamaClient;

/// How a turn is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Conversational input that needs no personal context.
    Direct,
    /// A question answered from the indexed corpus.
    Memory,
}

const SMALLTALK: &[&str] = &[
    "hi",
    "hello",
    "hey",
    "good morning",
    "good afternoon",
    "good evening",
    "how are you",
    "thanks",
    "thank you",
    "ok",
    "okay",
];

/// Classify one input line. Anything not recognized as smalltalk is a
/// memory question.
pub fn route(input: &str) -> Route {
    let normalized = input
        .trim()
        .to_lowercase()
        .trim_end_matches(|c| matches!(c, '!' | '.' | '?'))
        .trim()
        .to_string();

    if SMALLTALK.contains(&normalized.as_str()) {
        Route::Direct
    } else {
        Route::Memory
    }
}

pub struct Agent {
    answerer: Answerer,
    llm: Arc<OllamaClient>,
}

impl Agent {
    pub fn new(answerer: Answerer, llm: Arc<OllamaClient>) -> Self {
        Self { answerer, llm }
    }

    /// Handle one user turn. Errors propagate to the chat loop.
    pub async fn respond(&self, input: &str) -> Result<String> {
        match route(input) {
            Route::Direct => self.llm.generate(&direct_prompt(input)).await,
            Route::Memory => self.answerer.answer(input).await,
        }
    }
}

fn direct_prompt(input: &str) -> String {
    format!(
        "You are a friendly personal memory assistant. Reply briefly and \
conversationally.\n\nUser: {}\nAssistant:",
        input.trim()
    )
}
