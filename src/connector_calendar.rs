use anyhow::Result;
use chrono::{SecondsFormat, Utc};
use serde::Deserialize;

use crate::config::Config;
use crate::google_auth;
use crate::models::TextItem;

const CALENDAR_API: &str = "https://www.googleapis.com/calendar/v3";
const MAX_RESULTS: u32 = 10;
const NO_TITLE: &str = "No title";

#[derive(Deserialize)]
struct EventList {
    #[serde(default)]
    items: Vec<Event>,
}

#[derive(Deserialize)]
pub(crate) struct Event {
    #[serde(default)]
    summary: Option<String>,
}

/// Load the next 10 upcoming events from the primary calendar, one item
/// per event title. Any failure degrades to an empty result.
pub async fn load_calendar(config: &Config) -> Vec<TextItem> {
    match fetch_calendar(config).await {
        Ok(items) => items,
        Err(e) => {
            eprintln!(
                "Warning: Calendar unavailable ({}); continuing without calendar data",
                e
            );
            Vec::new()
        }
    }
}

async fn fetch_calendar(config: &Config) -> Result<Vec<TextItem>> {
    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()?;
    let token = google_auth::access_token(&client, &config.google.calendar_token_file).await?;

    let now = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    let max_results = MAX_RESULTS.to_string();

    let list: EventList = client
        .get(format!("{}/calendars/primary/events", CALENDAR_API))
        .bearer_auth(&token)
        .query(&[
            ("timeMin", now.as_str()),
            ("maxResults", max_results.as_str()),
            ("singleEvents", "true"),
            ("orderBy", "startTime"),
        ])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let summaries: Vec<TextItem> = list.items.iter().map(event_title).collect();

    println!("Loaded {} calendar events", summaries.len());
    Ok(summaries)
}

/// An event contributes its summary text; an untitled event still counts,
/// with a literal placeholder.
pub(crate) fn event_title(event: &Event) -> TextItem {
    match event.summary.as_deref() {
        Some(summary) => TextItem::from(summary),
        None => TextItem::from(NO_TITLE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_with_summary() {
        let event: Event = serde_json::from_value(serde_json::json!({
            "summary": "Standup",
            "start": {"dateTime": "2026-01-05T09:00:00Z"}
        }))
        .unwrap();
        assert_eq!(event_title(&event).as_str(), "Standup");
    }

    #[test]
    fn test_event_without_summary_gets_placeholder() {
        let event: Event =
            serde_json::from_value(serde_json::json!({"start": {"date": "2026-01-05"}})).unwrap();
        assert_eq!(event_title(&event).as_str(), "No title");
    }

    #[test]
    fn test_event_list_defaults_to_empty() {
        let list: EventList = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(list.items.is_empty());
    }
}
