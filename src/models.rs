//! Core data types used throughout the pipeline.
//!
//! These types represent the text snippets, embedded chunks, and search hits
//! that flow from the source connectors into the index and out to the answerer.

use std::fmt;

/// A flattened plain-text representation of one source record.
///
/// One email, one notes page, or one calendar event collapses into a single
/// opaque string. No structured fields survive the flattening.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextItem(String);

impl TextItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TextItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TextItem {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TextItem {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A chunk of corpus text together with its embedding vector.
///
/// Owned exclusively by the index; never mutated after creation.
#[derive(Debug, Clone)]
pub struct IndexedChunk {
    pub text: String,
    pub embedding: Vec<f32>,
}

/// A retrieval result: chunk text plus its cosine similarity to the query.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub text: String,
    pub score: f32,
}
