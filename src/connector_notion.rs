use anyhow::Result;
use serde::Deserialize;
use std::collections::BTreeMap;

use crate::config::Config;
use crate::models::TextItem;

const NOTION_API: &str = "https://api.notion.com/v1";
const NOTION_VERSION: &str = "2022-06-28";
const UNTITLED: &str = "Untitled";
const PARSE_ERROR: &str = "Error parsing page";

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    results: Vec<serde_json::Value>,
    #[serde(default)]
    has_more: bool,
    #[serde(default)]
    next_cursor: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct Page {
    #[serde(default)]
    properties: BTreeMap<String, Property>,
}

/// A page property, narrowed to the shapes the loader cares about. Every
/// non-title property type collapses into the fallback branch.
#[derive(Deserialize)]
#[serde(tag = "type")]
pub(crate) enum Property {
    #[serde(rename = "title")]
    Title {
        #[serde(default)]
        title: Vec<RichText>,
    },
    #[serde(other)]
    Other,
}

#[derive(Deserialize)]
pub(crate) struct RichText {
    #[serde(default)]
    plain_text: String,
}

/// Load page titles from the configured Notion database. Missing or
/// placeholder credentials, and any API failure, degrade to an empty
/// result.
pub async fn load_notion(config: &Config) -> Vec<TextItem> {
    if !config.notion.is_configured() {
        eprintln!("Warning: Notion credentials not configured; skipping notes data");
        return Vec::new();
    }

    match fetch_notion(config).await {
        Ok(items) => items,
        Err(e) => {
            eprintln!(
                "Warning: Notion unavailable ({}); continuing without notes data",
                e
            );
            Vec::new()
        }
    }
}

async fn fetch_notion(config: &Config) -> Result<Vec<TextItem>> {
    // is_configured() guarantees both values are present.
    let api_key = config.notion.api_key.as_deref().unwrap_or_default();
    let database_id = config.notion.database_id.as_deref().unwrap_or_default();

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()?;

    let mut pages = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        let mut body = serde_json::json!({});
        if let Some(ref c) = cursor {
            body["start_cursor"] = serde_json::json!(c);
        }

        let response: QueryResponse = client
            .post(format!("{}/databases/{}/query", NOTION_API, database_id))
            .bearer_auth(api_key)
            .header("Notion-Version", NOTION_VERSION)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        for value in response.results {
            pages.push(parse_page(value));
        }

        match (response.has_more, response.next_cursor) {
            (true, Some(next)) => cursor = Some(next),
            _ => break,
        }
    }

    println!("Loaded {} pages from Notion", pages.len());
    Ok(pages)
}

/// One malformed page yields a placeholder rather than dropping the page
/// or failing the batch.
pub(crate) fn parse_page(value: serde_json::Value) -> TextItem {
    match serde_json::from_value::<Page>(value) {
        Ok(page) => TextItem::new(page_title(&page)),
        Err(e) => {
            eprintln!("Warning: error parsing page data: {}", e);
            TextItem::from(PARSE_ERROR)
        }
    }
}

/// Resolve a page's display title.
///
/// The canonically named `Name` property wins when present, regardless of
/// its type; only when `Name` is absent entirely do we scan the remaining
/// properties for one that is title-typed.
pub(crate) fn page_title(page: &Page) -> String {
    match page.properties.get("Name") {
        Some(Property::Title { title }) if !title.is_empty() => title[0].plain_text.clone(),
        Some(_) => UNTITLED.to_string(),
        None => page
            .properties
            .values()
            .find_map(|prop| match prop {
                Property::Title { title } if !title.is_empty() => {
                    Some(title[0].plain_text.clone())
                }
                _ => None,
            })
            .unwrap_or_else(|| UNTITLED.to_string()),
    }
}
