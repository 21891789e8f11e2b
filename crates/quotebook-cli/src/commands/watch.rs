use std::path::Path;
use std::time::Duration;

use quotebook_core::config::SyncConfig;
use quotebook_core::services::SharedQuoteBook;
use quotebook_core::sync::{tick, CycleOutcome, Scheduler, TickReport};
use quotebook_core::ResolutionStrategy;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::commands::common::{describe_outcome, format_conflict_lines, open_quote_book};
use crate::commands::sync::format_resolution;
use crate::error::CliError;

const HELP: &str = "Commands: sync, remote, local, merge, pause, resume, status, quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchCommand {
    SyncNow,
    Resolve(ResolutionStrategy),
    Pause,
    Resume,
    Status,
    Quit,
}

pub fn parse_watch_command(line: &str) -> Option<WatchCommand> {
    match line.trim().to_ascii_lowercase().as_str() {
        "sync" | "s" => Some(WatchCommand::SyncNow),
        "pause" => Some(WatchCommand::Pause),
        "resume" => Some(WatchCommand::Resume),
        "status" => Some(WatchCommand::Status),
        "quit" | "exit" | "q" => Some(WatchCommand::Quit),
        other => other.parse().ok().map(WatchCommand::Resolve),
    }
}

/// Interval in effect: `--interval` wins over the configured one; zero is ignored.
pub fn watch_period(interval_secs: Option<u64>, config: &SyncConfig) -> Duration {
    interval_secs
        .filter(|secs| *secs > 0)
        .map_or(config.sync_interval, Duration::from_secs)
}

pub async fn run_watch(
    interval_secs: Option<u64>,
    auto_strategy: Option<ResolutionStrategy>,
    db_path: &Path,
    config: &SyncConfig,
) -> Result<(), CliError> {
    let period = watch_period(interval_secs, config);
    let book = open_quote_book(db_path, config)?.into_shared();

    let (reports_tx, mut reports) = mpsc::unbounded_channel();
    let mut scheduler = Scheduler::new(period).with_reports(reports_tx);
    scheduler.enable(book.clone());

    println!("Syncing every {}s. {HELP}", period.as_secs());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            Some(report) = reports.recv() => {
                handle_report(&book, &report, auto_strategy).await;
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                let Some(command) = parse_watch_command(&line) else {
                    if !line.trim().is_empty() {
                        println!("Unknown command '{}'. {HELP}", line.trim());
                    }
                    continue;
                };

                match command {
                    WatchCommand::Quit => break,
                    WatchCommand::SyncNow => {
                        let report = tick(&book).await;
                        handle_report(&book, &report, auto_strategy).await;
                    }
                    WatchCommand::Resolve(strategy) => resolve_now(&book, strategy).await,
                    WatchCommand::Pause => {
                        if scheduler.disable() {
                            println!("Scheduled sync paused");
                        }
                    }
                    WatchCommand::Resume => {
                        if scheduler.enable(book.clone()) {
                            println!("Scheduled sync resumed");
                        }
                    }
                    WatchCommand::Status => print_status(&book, &scheduler).await,
                }
            }
        }
    }

    scheduler.disable();
    Ok(())
}

async fn handle_report(
    book: &SharedQuoteBook,
    report: &TickReport,
    auto_strategy: Option<ResolutionStrategy>,
) {
    match report {
        TickReport::Completed(CycleOutcome::UpToDate) => {
            tracing::debug!("Remote has nothing new");
        }
        TickReport::Completed(outcome @ CycleOutcome::ConflictsFound(_)) => {
            println!("{}", describe_outcome(outcome));
            {
                let guard = book.lock().await;
                for line in format_conflict_lines(guard.pending_conflicts()) {
                    println!("  {line}");
                }
            }
            match auto_strategy {
                Some(strategy) => resolve_now(book, strategy).await,
                None => println!("Choose a strategy: remote, local or merge"),
            }
        }
        TickReport::Completed(outcome) => println!("{}", describe_outcome(outcome)),
        TickReport::Failed(reason) => tracing::warn!("Sync cycle failed: {reason}"),
        TickReport::SkippedBusy => tracing::debug!("Sync tick skipped while busy"),
    }
}

async fn resolve_now(book: &SharedQuoteBook, strategy: ResolutionStrategy) {
    let mut guard = book.lock().await;
    match guard.resolve_conflicts(strategy) {
        Ok(resolution) => println!("{}", format_resolution(&resolution)),
        Err(error) => println!("{error}"),
    }
}

async fn print_status(book: &SharedQuoteBook, scheduler: &Scheduler) {
    let guard = book.lock().await;
    println!(
        "state: {}  pending conflicts: {}  quotes: {}  scheduled: {} (every {}s)",
        guard.sync_state(),
        guard.pending_conflicts().len(),
        guard.store().len(),
        if scheduler.is_enabled() { "on" } else { "off" },
        scheduler.period().as_secs()
    );
}
