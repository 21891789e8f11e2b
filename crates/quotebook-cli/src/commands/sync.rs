use std::path::Path;

use quotebook_core::config::SyncConfig;
use quotebook_core::models::Resolution;
use quotebook_core::sync::CycleOutcome;
use quotebook_core::{ConflictRecord, ResolutionStrategy};
use serde::Serialize;

use crate::commands::common::{
    describe_outcome, format_conflict_lines, format_sync_timestamp, open_quote_book,
};
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct SyncReport<'a> {
    outcome: &'a CycleOutcome,
    conflicts: &'a [ConflictRecord],
    #[serde(skip_serializing_if = "Option::is_none")]
    resolution: Option<&'a Resolution>,
}

/// Run one cycle. Conflicts are settled with `strategy` when given; otherwise
/// they are listed and left for the next run.
pub async fn run_sync(
    strategy: Option<ResolutionStrategy>,
    json: bool,
    db_path: &Path,
    config: &SyncConfig,
) -> Result<(), CliError> {
    let mut book = open_quote_book(db_path, config)?;
    let outcome = book.sync_once().await?;
    let conflicts = book.pending_conflicts().to_vec();

    let resolution = match (&outcome, strategy) {
        (CycleOutcome::ConflictsFound(_), Some(strategy)) => {
            Some(book.resolve_conflicts(strategy)?)
        }
        _ => None,
    };

    if json {
        let report = SyncReport {
            outcome: &outcome,
            conflicts: &conflicts,
            resolution: resolution.as_ref(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", describe_outcome(&outcome));
        for line in format_conflict_lines(&conflicts) {
            println!("  {line}");
        }
        if let Some(resolution) = &resolution {
            println!("{}", format_resolution(resolution));
        } else if !conflicts.is_empty() {
            println!("Re-run with --strategy remote|local|merge to resolve");
        }
    }

    if let CycleOutcome::FetchFailed(reason) = outcome {
        return Err(CliError::SyncFailed(reason));
    }
    Ok(())
}

pub fn format_resolution(resolution: &Resolution) -> String {
    format!(
        "Conflicts resolved using strategy: {} ({} handled at {})",
        resolution.strategy,
        resolution.conflicts,
        format_sync_timestamp(resolution.resolved_at)
    )
}
