use anyhow::Result;
use chrono::{Duration, Utc};
use serde::Deserialize;

use crate::config::Config;
use crate::google_auth;
use crate::models::TextItem;

const GMAIL_API: &str = "https://gmail.googleapis.com/gmail/v1";
const LOOKBACK_DAYS: i64 = 7;
const MAX_RESULTS: u32 = 50;

#[derive(Deserialize)]
struct MessageList {
    #[serde(default)]
    messages: Vec<MessageRef>,
}

#[derive(Deserialize)]
struct MessageRef {
    id: String,
}

#[derive(Deserialize)]
pub(crate) struct Message {
    #[serde(default)]
    snippet: String,
    #[serde(default)]
    payload: Payload,
}

#[derive(Deserialize, Default)]
pub(crate) struct Payload {
    #[serde(default)]
    headers: Vec<Header>,
}

#[derive(Deserialize)]
struct Header {
    name: String,
    value: String,
}

/// Load mail received in the trailing 7-day window, flattened one item
/// per message. Any failure degrades to an empty result; mail must never
/// block the other sources.
pub async fn load_gmail(config: &Config) -> Vec<TextItem> {
    match fetch_gmail(config).await {
        Ok(items) => items,
        Err(e) => {
            eprintln!("Warning: Gmail unavailable ({}); continuing without mail data", e);
            Vec::new()
        }
    }
}

async fn fetch_gmail(config: &Config) -> Result<Vec<TextItem>> {
    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()?;
    let token = google_auth::access_token(&client, &config.google.gmail_token_file).await?;

    let after = (Utc::now() - Duration::days(LOOKBACK_DAYS))
        .format("%Y/%m/%d")
        .to_string();

    let list: MessageList = client
        .get(format!("{}/users/me/messages", GMAIL_API))
        .bearer_auth(&token)
        .query(&[
            ("q", format!("after:{}", after)),
            ("maxResults", MAX_RESULTS.to_string()),
        ])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    println!("Loading {} emails from the last week...", list.messages.len());

    let mut emails = Vec::new();
    for msg_ref in &list.messages {
        // A single malformed message is skipped, not fatal to the batch.
        match fetch_message(&client, &token, &msg_ref.id).await {
            Ok(item) => emails.push(item),
            Err(e) => eprintln!("Warning: skipping message {}: {}", msg_ref.id, e),
        }
    }

    println!("Loaded {} emails from the last week", emails.len());
    Ok(emails)
}

async fn fetch_message(client: &reqwest::Client, token: &str, id: &str) -> Result<TextItem> {
    let message: Message = client
        .get(format!("{}/users/me/messages/{}", GMAIL_API, id))
        .bearer_auth(token)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    Ok(flatten_message(&message))
}

/// Collapse one message into its flattened text form:
/// `From: {sender}\nSubject: {subject}\nContent: {snippet}`.
pub(crate) fn flatten_message(message: &Message) -> TextItem {
    let sender = header_value(message, "From").unwrap_or("Unknown Sender");
    let subject = header_value(message, "Subject").unwrap_or("No Subject");

    TextItem::new(format!(
        "From: {}\nSubject: {}\nContent: {}",
        sender, subject, message.snippet
    ))
}

fn header_value<'a>(message: &'a Message, name: &str) -> Option<&'a str> {
    message
        .payload
        .headers
        .iter()
        .find(|h| h.name == name)
        .map(|h| h.value.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message_from_json(json: serde_json::Value) -> Message {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_flatten_full_message() {
        let message = message_from_json(serde_json::json!({
            "snippet": "hello there",
            "payload": {
                "headers": [
                    {"name": "From", "value": "a@x.com"},
                    {"name": "Subject", "value": "Hi"},
                    {"name": "Date", "value": "Mon, 1 Jan 2024"}
                ]
            }
        }));
        assert_eq!(
            flatten_message(&message).as_str(),
            "From: a@x.com\nSubject: Hi\nContent: hello there"
        );
    }

    #[test]
    fn test_flatten_missing_subject() {
        let message = message_from_json(serde_json::json!({
            "snippet": "body",
            "payload": {"headers": [{"name": "From", "value": "a@x.com"}]}
        }));
        assert_eq!(
            flatten_message(&message).as_str(),
            "From: a@x.com\nSubject: No Subject\nContent: body"
        );
    }

    #[test]
    fn test_flatten_missing_sender() {
        let message = message_from_json(serde_json::json!({
            "snippet": "body",
            "payload": {"headers": [{"name": "Subject", "value": "Hi"}]}
        }));
        assert_eq!(
            flatten_message(&message).as_str(),
            "From: Unknown Sender\nSubject: Hi\nContent: body"
        );
    }

    #[test]
    fn test_flatten_empty_message() {
        let message = message_from_json(serde_json::json!({}));
        assert_eq!(
            flatten_message(&message).as_str(),
            "From: Unknown Sender\nSubject: No Subject\nContent: "
        );
    }

    #[test]
    fn test_header_lookup_is_exact() {
        let message = message_from_json(serde_json::json!({
            "snippet": "s",
            "payload": {"headers": [{"name": "subject", "value": "lowercase"}]}
        }));
        // Header names are matched exactly, as the provider capitalizes them.
        assert_eq!(header_value(&message, "Subject"), None);
    }
}
