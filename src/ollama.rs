//! Ollama HTTP client for answer generation and embeddings.
//!
//! Talks to a local Ollama server (`/api/generate`, `/api/embeddings`).
//! Generation runs at the configured temperature (0 by default, for
//! reproducible phrasing) with `stream: false`.
//!
//! # Retry Strategy
//!
//! Transient failures are retried with exponential backoff:
//! - HTTP 429 and 5xx → retry
//! - other 4xx → fail immediately
//! - network errors → retry
//! - Backoff: 1s, 2s, 4s, 8s, ... (capped at 2^5)

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::ModelConfig;

pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
    generate_model: String,
    embed_model: String,
    temperature: f32,
    max_retries: u32,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embedding: Vec<f32>,
}

impl OllamaClient {
    pub fn new(config: &ModelConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            generate_model: config.generate_model.clone(),
            embed_model: config.embed_model.clone(),
            temperature: config.temperature,
            max_retries: config.max_retries,
        })
    }

    /// Generate a completion for `prompt`. Returns the model's full text.
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/api/generate", self.base_url);
        let body = GenerateRequest {
            model: &self.generate_model,
            prompt,
            stream: false,
            options: GenerateOptions {
                temperature: self.temperature,
            },
        };

        let json = self.post_with_retry(&url, &body).await?;
        let parsed: GenerateResponse = serde_json::from_value(json)
            .map_err(|e| anyhow::anyhow!("Invalid generate response: {}", e))?;
        Ok(parsed.response)
    }

    /// Embed a single text with the configured embedding model.
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let url = format!("{}/api/embeddings", self.base_url);
        let body = EmbedRequest {
            model: &self.embed_model,
            prompt: text,
        };

        let json = self.post_with_retry(&url, &body).await?;
        let parsed: EmbedResponse = serde_json::from_value(json)
            .map_err(|e| anyhow::anyhow!("Invalid embedding response: {}", e))?;

        if parsed.embedding.is_empty() {
            bail!("Ollama returned an empty embedding");
        }
        Ok(parsed.embedding)
    }

    async fn post_with_retry<T: Serialize>(
        &self,
        url: &str,
        body: &T,
    ) -> Result<serde_json::Value> {
        let mut last_err = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = Duration::from_secs(1 << (attempt - 1).min(5));
                tokio::time::sleep(delay).await;
            }

            let resp = self.client.post(url).json(body).send().await;

            match resp {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        return Ok(response.json().await?);
                    }

                    // Rate limited or server error — retry
                    if status.as_u16() == 429 || status.is_server_error() {
                        let body_text = response.text().await.unwrap_or_default();
                        last_err =
                            Some(anyhow::anyhow!("Ollama error {}: {}", status, body_text));
                        continue;
                    }

                    // Client error — don't retry
                    let body_text = response.text().await.unwrap_or_default();
                    bail!("Ollama error {}: {}", status, body_text);
                }
                Err(e) => {
                    last_err = Some(e.into());
                    continue;
                }
            }
        }

        Err(last_err.unwrap_or_else(|| anyhow::anyhow!("Ollama request failed after retries")))
    }
}
