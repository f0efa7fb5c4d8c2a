use crate::config::Config;

/// Print each connector's configuration status, plus the model endpoint.
pub fn list_sources(config: &Config) {
    println!("{:<12} STATUS", "CONNECTOR");

    let gmail_status = if config.google.gmail_token_file.exists() {
        "OK (token cached)".to_string()
    } else {
        format!(
            "NOT CONFIGURED (token file missing: {})",
            config.google.gmail_token_file.display()
        )
    };
    println!("{:<12} {}", "gmail", gmail_status);

    let notion_status = if config.notion.is_configured() {
        "OK".to_string()
    } else {
        "NOT CONFIGURED (set notion.api_key and notion.database_id)".to_string()
    };
    println!("{:<12} {}", "notion", notion_status);

    let calendar_status = if config.google.calendar_token_file.exists() {
        "OK (token cached)".to_string()
    } else {
        format!(
            "NOT CONFIGURED (token file missing: {})",
            config.google.calendar_token_file.display()
        )
    };
    println!("{:<12} {}", "calendar", calendar_status);

    println!("{:<12} {}", "ollama", config.model.base_url);
}
