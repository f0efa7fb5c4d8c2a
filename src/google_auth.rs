//! OAuth token cache handling for the Google connectors.
//!
//! Reads a previously persisted authorized-user credential file, refreshes
//! the access token through the refresh-token grant when stale, and rewrites
//! the file. The first-run interactive browser flow lives outside this
//! binary; without a usable token file the owning connector degrades to an
//! empty result.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Serialized authorized-user credential, as written by Google's standard
/// installed-app authorization tooling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredCredentials {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    pub client_id: String,
    pub client_secret: String,
    #[serde(default)]
    pub scopes: Vec<String>,
    #[serde(default)]
    pub expiry: Option<DateTime<Utc>>,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

#[derive(Deserialize)]
struct RefreshResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

/// The cached access token, when it can be used as-is.
fn fresh_token(creds: &StoredCredentials, now: DateTime<Utc>) -> Option<&str> {
    match (&creds.token, &creds.expiry) {
        (Some(token), Some(expiry))
            if !token.is_empty() && *expiry > now + Duration::seconds(60) =>
        {
            Some(token)
        }
        _ => None,
    }
}

/// Produce a usable access token from the cache file at `path`,
/// refreshing and rewriting the file if the cached token is stale.
pub async fn access_token(client: &reqwest::Client, path: &Path) -> Result<String> {
    if !path.exists() {
        bail!(
            "token file not found: {} (complete the authorization flow to create it)",
            path.display()
        );
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read token file: {}", path.display()))?;
    let mut creds: StoredCredentials =
        serde_json::from_str(&content).with_context(|| "Failed to parse token file")?;

    if let Some(token) = fresh_token(&creds, Utc::now()) {
        return Ok(token.to_string());
    }

    let refresh_token = match creds.refresh_token.as_deref() {
        Some(rt) if !rt.is_empty() => rt.to_string(),
        _ => bail!("cached credential has no refresh token; re-run the authorization flow"),
    };

    let params = [
        ("client_id", creds.client_id.as_str()),
        ("client_secret", creds.client_secret.as_str()),
        ("refresh_token", refresh_token.as_str()),
        ("grant_type", "refresh_token"),
    ];

    let response = client
        .post(&creds.token_uri)
        .form(&params)
        .send()
        .await
        .with_context(|| "Token refresh request failed")?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        bail!("Token refresh rejected ({}): {}", status, body);
    }

    let refreshed: RefreshResponse = response
        .json()
        .await
        .with_context(|| "Invalid token refresh response")?;

    creds.token = Some(refreshed.access_token.clone());
    creds.expiry = refreshed
        .expires_in
        .map(|secs| Utc::now() + Duration::seconds(secs));

    // Persist the refreshed credential for the next run.
    let serialized = serde_json::to_string_pretty(&creds)?;
    std::fs::write(path, serialized)
        .with_context(|| format!("Failed to rewrite token file: {}", path.display()))?;

    Ok(refreshed.access_token)
}
