use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use quotebook_core::config::SyncConfig;
use quotebook_core::db::Database;
use quotebook_core::models::category_label;
use quotebook_core::services::QuoteBook;
use quotebook_core::sync::{CycleOutcome, HttpRemoteSource};
use quotebook_core::{ConflictRecord, Quote};
use serde::Serialize;

use crate::error::CliError;

const PREVIEW_CHARS: usize = 60;

#[derive(Debug, Serialize)]
pub struct QuoteListItem {
    pub position: usize,
    pub text: String,
    pub category: String,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
}

pub fn open_quote_book(db_path: &Path, config: &SyncConfig) -> Result<QuoteBook, CliError> {
    let db = Database::open(db_path)?;
    let source = HttpRemoteSource::new(config)?;
    Ok(QuoteBook::open(Arc::new(db), Arc::new(source)))
}

/// Open the book for commands that never reach the remote source
pub fn open_local_quote_book(db_path: &Path) -> Result<QuoteBook, CliError> {
    open_quote_book(db_path, &SyncConfig::default())
}

/// Convert a 1-based position from the command line into an index
pub fn position_to_index(position: usize) -> Result<usize, CliError> {
    position.checked_sub(1).ok_or(CliError::InvalidPosition)
}

pub fn quote_to_list_item(position: usize, quote: &Quote) -> QuoteListItem {
    QuoteListItem {
        position,
        text: quote.text.clone(),
        category: quote.category.clone(),
        author: quote.author_or_unknown().to_string(),
        id: quote.id,
    }
}

pub fn quote_preview(quote: &Quote, max_chars: usize) -> String {
    let collapsed = quote.text.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() <= max_chars {
        collapsed
    } else {
        let take_len = max_chars.saturating_sub(3);
        let mut truncated = collapsed.chars().take(take_len).collect::<String>();
        truncated.push_str("...");
        truncated
    }
}

/// One line per `(position, quote)` pair
pub fn format_quote_lines<'a>(quotes: impl IntoIterator<Item = (usize, &'a Quote)>) -> Vec<String> {
    quotes
        .into_iter()
        .map(|(position, quote)| {
            format!(
                "{position:>3}  {:<width$}  [{}] ~ {}",
                quote_preview(quote, PREVIEW_CHARS),
                category_label(&quote.category),
                quote.author_or_unknown(),
                width = PREVIEW_CHARS,
            )
        })
        .collect()
}

pub fn format_quote_card(quote: &Quote) -> String {
    format!(
        "{quote}\n  ~ {} ({})",
        quote.author_or_unknown(),
        category_label(&quote.category)
    )
}

pub fn format_conflict_lines(conflicts: &[ConflictRecord]) -> Vec<String> {
    conflicts
        .iter()
        .map(|conflict| {
            format!(
                "{}  local: {}  remote: {}",
                quote_preview(&conflict.local, PREVIEW_CHARS),
                conflict.local.category,
                conflict.remote.category
            )
        })
        .collect()
}

pub fn describe_outcome(outcome: &CycleOutcome) -> String {
    match outcome {
        CycleOutcome::FetchFailed(reason) => format!("Fetch failed: {reason}"),
        CycleOutcome::UpToDate => "Already up to date".to_string(),
        CycleOutcome::Merged(count) => format!("Synced {count} new quote(s) from remote"),
        CycleOutcome::ConflictsFound(count) => format!("Found {count} conflict(s)"),
        CycleOutcome::AwaitingResolution => "Conflicts are awaiting resolution".to_string(),
    }
}

pub fn format_sync_timestamp(timestamp_ms: i64) -> String {
    Utc.timestamp_millis_opt(timestamp_ms)
        .single()
        .map_or_else(|| timestamp_ms.to_string(), |dt| dt.to_rfc3339())
}

pub fn resolve_db_path(cli_db_path: Option<PathBuf>) -> PathBuf {
    cli_db_path
        .or_else(|| env::var_os("QUOTEBOOK_DB_PATH").map(PathBuf::from))
        .unwrap_or_else(default_db_path)
}

pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("quotebook")
        .join("quotebook.db")
}
