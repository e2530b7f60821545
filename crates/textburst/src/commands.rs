// SPDX-FileCopyrightText: 2026 Textburst Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! CLI command implementations.
//!
//! The CLI plays the role of the platform's HTTP layer: it validates and
//! deduplicates input BEFORE calling into the dispatch core, which trusts
//! its callers.

use textburst_carrier::build_carrier;
use textburst_config::TextburstConfig;
use textburst_core::TextburstError;
use textburst_dispatch::Dispatcher;
use textburst_storage::Database;

/// One-segment SMS body limit, enforced here as the caller-side precondition.
const MAX_BODY_CHARS: usize = 160;

async fn open_database(config: &TextburstConfig) -> Result<Database, TextburstError> {
    Database::open_with_options(&config.storage.database_path, config.storage.wal_mode).await
}

fn make_dispatcher(config: &TextburstConfig, db: Database) -> Dispatcher {
    Dispatcher::new(build_carrier(config), db)
}

/// `textburst send --to ... --body ... [--user N]`
pub async fn send(
    config: &TextburstConfig,
    to: Vec<String>,
    body: String,
    user: Option<i64>,
) -> Result<(), TextburstError> {
    let destinations = validate_input(to, &body)?;

    let db = open_database(config).await?;
    let dispatcher = make_dispatcher(config, db);

    let summary = dispatcher.dispatch(&destinations, &body, user).await?;
    println!(
        "{}",
        serde_json::to_string_pretty(&summary)
            .map_err(|e| TextburstError::Internal(format!("failed to serialize summary: {e}")))?
    );
    Ok(())
}

/// `textburst resend <message-id> --user N`
pub async fn resend(
    config: &TextburstConfig,
    message_id: i64,
    user: i64,
) -> Result<(), TextburstError> {
    let db = open_database(config).await?;
    let dispatcher = make_dispatcher(config, db);

    let summary = dispatcher.resend(message_id, user).await?;
    println!(
        "{}",
        serde_json::to_string_pretty(&summary)
            .map_err(|e| TextburstError::Internal(format!("failed to serialize summary: {e}")))?
    );
    Ok(())
}

/// `textburst status`
pub async fn status(config: &TextburstConfig) -> Result<(), TextburstError> {
    let carrier = build_carrier(config);
    let health = carrier.health_check().await?;
    println!("provider: {}", carrier.name());
    println!("health:   {health:?}");
    Ok(())
}

/// `textburst config`
pub fn show_config(config: &TextburstConfig) -> Result<(), TextburstError> {
    let rendered = toml::to_string_pretty(config)
        .map_err(|e| TextburstError::Internal(format!("failed to render config: {e}")))?;
    print!("{rendered}");
    Ok(())
}

/// Caller-side preconditions for the dispatch core: non-empty destination
/// list, deduplicated in first-seen order, body within one SMS segment.
fn validate_input(to: Vec<String>, body: &str) -> Result<Vec<String>, TextburstError> {
    if body.chars().count() > MAX_BODY_CHARS {
        return Err(TextburstError::Config(format!(
            "body exceeds {MAX_BODY_CHARS} characters"
        )));
    }

    let mut seen = std::collections::HashSet::new();
    let destinations: Vec<String> = to
        .into_iter()
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
        .filter(|d| seen.insert(d.clone()))
        .collect();

    if destinations.is_empty() {
        return Err(TextburstError::Config(
            "at least one destination is required".into(),
        ));
    }
    Ok(destinations)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_input_dedupes_in_first_seen_order() {
        let input = vec![
            "+15550000001".to_string(),
            "+15550000002".to_string(),
            "+15550000001".to_string(),
        ];
        let result = validate_input(input, "hello").unwrap();
        assert_eq!(result, vec!["+15550000001", "+15550000002"]);
    }

    #[test]
    fn validate_input_rejects_oversize_body() {
        let body = "x".repeat(161);
        let err = validate_input(vec!["+15550000001".to_string()], &body).unwrap_err();
        assert!(matches!(err, TextburstError::Config(_)));
    }

    #[test]
    fn validate_input_accepts_exactly_160_chars() {
        let body = "x".repeat(160);
        assert!(validate_input(vec!["+15550000001".to_string()], &body).is_ok());
    }

    #[test]
    fn validate_input_rejects_empty_destinations() {
        let err = validate_input(vec![], "hello").unwrap_err();
        assert!(matches!(err, TextburstError::Config(_)));

        let err = validate_input(vec!["  ".to_string()], "hello").unwrap_err();
        assert!(matches!(err, TextburstError::Config(_)));
    }
}
