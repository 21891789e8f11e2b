use std::path::PathBuf;
use std::time::Duration;

use pretty_assertions::assert_eq;
use quotebook_core::config::SyncConfig;
use quotebook_core::models::{default_quotes, CategoryFilter, Resolution};
use quotebook_core::sync::CycleOutcome;
use quotebook_core::{Quote, ResolutionStrategy};

use crate::cli::{Commands, CompletionShell, StrategyArg};
use crate::commands::add::run_add;
use crate::commands::common::{
    describe_outcome, format_quote_lines, format_sync_timestamp, open_local_quote_book,
    position_to_index, quote_preview, quote_to_list_item, resolve_db_path,
};
use crate::commands::completions::render_completions;
use crate::commands::delete::run_delete;
use crate::commands::export::run_export;
use crate::commands::filter::run_filter;
use crate::commands::import::run_import;
use crate::commands::random::run_random;
use crate::commands::reset::run_reset;
use crate::commands::sync::{format_resolution, run_sync};
use crate::commands::watch::{parse_watch_command, watch_period, WatchCommand};
use crate::error::CliError;
use crate::run_command;

fn offline_config() -> SyncConfig {
    SyncConfig {
        remote_url: "http://127.0.0.1:9/posts".to_string(),
        http_timeout: Duration::from_secs(2),
        ..SyncConfig::default()
    }
}

fn temp_db() -> (tempfile::TempDir, PathBuf) {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("data").join("quotebook.db");
    (tmp, path)
}

#[test]
fn explicit_db_path_wins() {
    let explicit = PathBuf::from("/tmp/explicit.db");
    assert_eq!(resolve_db_path(Some(explicit.clone())), explicit);
}

#[test]
fn positions_are_one_based() {
    assert_eq!(position_to_index(1).unwrap(), 0);
    assert_eq!(position_to_index(7).unwrap(), 6);
    assert!(matches!(position_to_index(0), Err(CliError::InvalidPosition)));
}

#[test]
fn preview_collapses_whitespace_and_truncates() {
    let quote = Quote::new("Simplicity   is\nthe ultimate sophistication.", "wisdom");
    assert_eq!(
        quote_preview(&quote, 80),
        "Simplicity is the ultimate sophistication."
    );
    assert_eq!(quote_preview(&quote, 13), "Simplicity...");
}

#[test]
fn quote_lines_show_position_label_and_author() {
    let quotes = [
        Quote::new("Stay hungry", "drive").with_author("Jobs"),
        Quote::new("Anonymous words", "life"),
    ];
    let lines = format_quote_lines(quotes.iter().enumerate().map(|(i, q)| (i + 1, q)));

    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("  1  Stay hungry"));
    assert!(lines[0].ends_with("[Drive] ~ Jobs"));
    assert!(lines[1].ends_with("[Life] ~ Unknown"));
}

#[test]
fn list_item_fills_unknown_author() {
    let item = quote_to_list_item(3, &Quote::new("Text", "server").with_id(2));
    assert_eq!(item.position, 3);
    assert_eq!(item.author, "Unknown");
    assert_eq!(item.id, Some(2));
}

#[test]
fn outcomes_are_described_for_humans() {
    assert_eq!(
        describe_outcome(&CycleOutcome::Merged(2)),
        "Synced 2 new quote(s) from remote"
    );
    assert_eq!(
        describe_outcome(&CycleOutcome::ConflictsFound(1)),
        "Found 1 conflict(s)"
    );
    assert_eq!(describe_outcome(&CycleOutcome::UpToDate), "Already up to date");
}

#[test]
fn resolution_message_names_strategy() {
    let resolution = Resolution {
        strategy: ResolutionStrategy::Merge,
        conflicts: 2,
        resolved_at: 0,
    };
    assert_eq!(
        format_resolution(&resolution),
        "Conflicts resolved using strategy: merge (2 handled at 1970-01-01T00:00:00+00:00)"
    );
    assert_eq!(format_sync_timestamp(0), "1970-01-01T00:00:00+00:00");
}

#[test]
fn strategy_arg_maps_to_core_strategy() {
    assert_eq!(
        ResolutionStrategy::from(StrategyArg::Remote),
        ResolutionStrategy::Remote
    );
    assert_eq!(
        ResolutionStrategy::from(StrategyArg::Local),
        ResolutionStrategy::Local
    );
    assert_eq!(
        ResolutionStrategy::from(StrategyArg::Merge),
        ResolutionStrategy::Merge
    );
}

#[test]
fn watch_commands_parse() {
    assert_eq!(parse_watch_command(" sync "), Some(WatchCommand::SyncNow));
    assert_eq!(
        parse_watch_command("REMOTE"),
        Some(WatchCommand::Resolve(ResolutionStrategy::Remote))
    );
    assert_eq!(
        parse_watch_command("both"),
        Some(WatchCommand::Resolve(ResolutionStrategy::Merge))
    );
    assert_eq!(parse_watch_command("q"), Some(WatchCommand::Quit));
    assert_eq!(parse_watch_command("pause"), Some(WatchCommand::Pause));
    assert_eq!(parse_watch_command("dance"), None);
    assert_eq!(parse_watch_command(""), None);
}

#[test]
fn watch_interval_overrides_config_unless_zero() {
    let config = SyncConfig::default();
    assert_eq!(watch_period(Some(5), &config), Duration::from_secs(5));
    assert_eq!(watch_period(Some(0), &config), config.sync_interval);
    assert_eq!(watch_period(None, &config), config.sync_interval);
}

#[test]
fn completions_use_binary_name() {
    let script = String::from_utf8(render_completions(CompletionShell::Bash)).unwrap();
    assert!(script.contains("quotebook"));
    assert!(script.contains("publish"));
}

#[test]
fn add_delete_and_reset_persist_between_runs() {
    let (_tmp, db_path) = temp_db();

    run_add(
        &["Stay".to_string(), "hungry".to_string()],
        "drive",
        Some("Jobs"),
        &db_path,
    )
    .unwrap();

    let book = open_local_quote_book(&db_path).unwrap();
    assert_eq!(book.store().len(), 7);
    assert_eq!(
        book.store().quotes().last(),
        Some(&Quote::new("Stay hungry", "drive").with_author("Jobs"))
    );
    drop(book);

    run_delete(7, &db_path).unwrap();
    assert!(matches!(
        run_delete(42, &db_path),
        Err(CliError::Core(quotebook_core::Error::NotFound(_)))
    ));
    run_reset(&db_path).unwrap();

    let book = open_local_quote_book(&db_path).unwrap();
    assert_eq!(book.store().quotes(), default_quotes().as_slice());
}

#[test]
fn blank_quote_is_rejected() {
    let (_tmp, db_path) = temp_db();
    let result = run_add(&["   ".to_string()], "life", None, &db_path);
    assert!(matches!(
        result,
        Err(CliError::Core(quotebook_core::Error::Validation(_)))
    ));
}

#[test]
fn filter_and_random_share_saved_category() {
    let (_tmp, db_path) = temp_db();

    run_filter(Some("wisdom"), &db_path).unwrap();
    let book = open_local_quote_book(&db_path).unwrap();
    assert_eq!(book.current_filter(), CategoryFilter::parse("wisdom"));
    drop(book);

    run_random(Some("all"), false, &db_path).unwrap();
    let book = open_local_quote_book(&db_path).unwrap();
    assert_eq!(book.current_filter(), CategoryFilter::All);
}

#[test]
fn export_then_import_appends_copies() {
    let (tmp, db_path) = temp_db();
    let export_path = tmp.path().join("quotes.json");

    run_export(Some(&export_path), false, &db_path).unwrap();
    let exported: Vec<Quote> =
        serde_json::from_str(&std::fs::read_to_string(&export_path).unwrap()).unwrap();
    assert_eq!(exported, default_quotes());

    run_import(&export_path, &db_path).unwrap();
    let book = open_local_quote_book(&db_path).unwrap();
    assert_eq!(book.store().len(), 12);
}

#[test]
fn malformed_import_is_rejected() {
    let (tmp, db_path) = temp_db();
    let bad = tmp.path().join("bad.json");
    std::fs::write(&bad, "{ not json").unwrap();

    assert!(matches!(
        run_import(&bad, &db_path),
        Err(CliError::Core(quotebook_core::Error::ImportParse(_)))
    ));
    let book = open_local_quote_book(&db_path).unwrap();
    assert_eq!(book.store().len(), 6);
}

#[tokio::test]
async fn sync_against_unreachable_remote_fails_without_changes() {
    let (_tmp, db_path) = temp_db();
    let config = offline_config();

    let result = run_sync(Some(ResolutionStrategy::Merge), false, &db_path, &config).await;
    assert!(matches!(result, Err(CliError::SyncFailed(_))));

    let book = open_local_quote_book(&db_path).unwrap();
    assert_eq!(book.store().quotes(), default_quotes().as_slice());
}

fn broken_remote_config() -> quotebook_core::Result<SyncConfig> {
    Err(quotebook_core::Error::Config(
        "QUOTEBOOK_REMOTE_LIMIT must be a non-negative integer".to_string(),
    ))
}

#[tokio::test]
async fn local_commands_ignore_broken_remote_settings() {
    let (_tmp, db_path) = temp_db();

    let list = Commands::List {
        category: None,
        json: true,
    };
    run_command(Some(list), &db_path, broken_remote_config).await.unwrap();
    run_command(None, &db_path, broken_remote_config).await.unwrap();

    let publish = Commands::Publish { position: 1 };
    assert!(matches!(
        run_command(Some(publish), &db_path, broken_remote_config).await,
        Err(CliError::Core(quotebook_core::Error::Config(_)))
    ));
}
