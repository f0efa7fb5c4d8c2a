use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    #[serde(default)]
    pub chunking: ChunkingConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    #[serde(default)]
    pub notion: NotionConfig,
    #[serde(default)]
    pub google: GoogleConfig,
}

/// Ollama endpoint and model settings.
#[derive(Debug, Deserialize, Clone)]
pub struct ModelConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_generate_model")]
    pub generate_model: String,
    #[serde(default = "default_embed_model")]
    pub embed_model: String,
    #[serde(default)]
    pub temperature: f32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            generate_model: default_generate_model(),
            embed_model: default_embed_model(),
            temperature: 0.0,
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:11434".to_string()
}
fn default_generate_model() -> String {
    "llama3.2".to_string()
}
fn default_embed_model() -> String {
    "nomic-embed-text".to_string()
}
fn default_timeout_secs() -> u64 {
    120
}
fn default_max_retries() -> u32 {
    2
}

#[derive(Debug, Deserialize, Clone)]
pub struct EmbeddingConfig {
    /// Vector dimensionality; also the size of fallback embeddings.
    #[serde(default = "default_dims")]
    pub dims: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            dims: default_dims(),
        }
    }
}

fn default_dims() -> usize {
    768
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChunkingConfig {
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,
    #[serde(default = "default_overlap_tokens")]
    pub overlap_tokens: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_tokens: default_max_tokens(),
            overlap_tokens: default_overlap_tokens(),
        }
    }
}

fn default_max_tokens() -> usize {
    700
}
fn default_overlap_tokens() -> usize {
    80
}

#[derive(Debug, Deserialize, Clone)]
pub struct RetrievalConfig {
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
        }
    }
}

fn default_top_k() -> usize {
    4
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct NotionConfig {
    pub api_key: Option<String>,
    pub database_id: Option<String>,
}

impl NotionConfig {
    /// Placeholder values shipped in example env files count as unconfigured.
    pub fn is_configured(&self) -> bool {
        matches!(
            (self.api_key.as_deref(), self.database_id.as_deref()),
            (Some(key), Some(db))
                if !key.is_empty()
                    && !db.is_empty()
                    && key != "your-notion-api-key"
                    && db != "your-database-id"
        )
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct GoogleConfig {
    pub client_secret_file: Option<PathBuf>,
    #[serde(default = "default_gmail_token_file")]
    pub gmail_token_file: PathBuf,
    #[serde(default = "default_calendar_token_file")]
    pub calendar_token_file: PathBuf,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            client_secret_file: None,
            gmail_token_file: default_gmail_token_file(),
            calendar_token_file: default_calendar_token_file(),
        }
    }
}

fn default_gmail_token_file() -> PathBuf {
    PathBuf::from("token.json")
}
fn default_calendar_token_file() -> PathBuf {
    PathBuf::from("token_calendar.json")
}

/// Load configuration from a TOML file and overlay secrets from the
/// environment (including a `.env` file, if present).
///
/// A missing config file is not an error — defaults apply, and the
/// environment overlay may still supply credentials. A file that exists
/// but fails to read or parse is an error.
pub fn load_config(path: &Path) -> Result<Config> {
    let mut config = if path.exists() {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content).with_context(|| "Failed to parse config file")?
    } else {
        Config::default()
    };

    apply_env_overlay(&mut config);
    validate(&config)?;

    Ok(config)
}

/// Overlay secrets from the process environment. This is the only place
/// the crate reads ambient environment; components receive the finished
/// [`Config`] and never look at env themselves.
fn apply_env_overlay(config: &mut Config) {
    // Best-effort: absence of a .env file is fine.
    let _ = dotenvy::dotenv();

    if let Ok(key) = std::env::var("NOTION_API_KEY") {
        if !key.is_empty() {
            config.notion.api_key = Some(key);
        }
    }
    if let Ok(db) = std::env::var("NOTION_DB_ID") {
        if !db.is_empty() {
            config.notion.database_id = Some(db);
        }
    }
    if let Ok(file) = std::env::var("GOOGLE_CLIENT_SECRET_FILE") {
        if !file.is_empty() {
            config.google.client_secret_file = Some(PathBuf::from(file));
        }
    }
    if let Ok(url) = std::env::var("OLLAMA_BASE_URL") {
        if !url.is_empty() {
            config.model.base_url = url;
        }
    }
}

fn validate(config: &Config) -> Result<()> {
    if config.chunking.max_tokens == 0 {
        anyhow::bail!("chunking.max_tokens must be > 0");
    }
    if config.chunking.overlap_tokens >= config.chunking.max_tokens {
        anyhow::bail!("chunking.overlap_tokens must be < chunking.max_tokens");
    }
    if config.retrieval.top_k < 1 {
        anyhow::bail!("retrieval.top_k must be >= 1");
    }
    if config.embedding.dims == 0 {
        anyhow::bail!("embedding.dims must be > 0");
    }
    if !(0.0..=2.0).contains(&config.model.temperature) {
        anyhow::bail!("model.temperature must be in [0.0, 2.0]");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.model.base_url, "http://localhost:11434");
        assert_eq!(config.model.temperature, 0.0);
        assert_eq!(config.retrieval.top_k, 4);
        assert_eq!(config.embedding.dims, 768);
        assert_eq!(config.google.gmail_token_file, PathBuf::from("token.json"));
        assert_eq!(
            config.google.calendar_token_file,
            PathBuf::from("token_calendar.json")
        );
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: Config = toml::from_str(
            r#"
            [model]
            generate_model = "mistral"

            [retrieval]
            top_k = 8
            "#,
        )
        .unwrap();
        assert_eq!(config.model.generate_model, "mistral");
        assert_eq!(config.model.embed_model, "nomic-embed-text");
        assert_eq!(config.retrieval.top_k, 8);
    }

    #[test]
    fn test_notion_placeholder_not_configured() {
        let notion = NotionConfig {
            api_key: Some("your-notion-api-key".to_string()),
            database_id: Some("your-database-id".to_string()),
        };
        assert!(!notion.is_configured());

        let notion = NotionConfig {
            api_key: Some("secret_abc123".to_string()),
            database_id: Some("d9824bdc".to_string()),
        };
        assert!(notion.is_configured());

        assert!(!NotionConfig::default().is_configured());
    }

    #[test]
    fn test_validate_rejects_zero_top_k() {
        let mut config = Config::default();
        config.retrieval.top_k = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_validate_rejects_overlap_ge_max() {
        let mut config = Config::default();
        config.chunking.max_tokens = 50;
        config.chunking.overlap_tokens = 50;
        assert!(validate(&config).is_err());
    }
}
