//! Periodic reconciliation.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use super::reconciler::CycleOutcome;
use crate::services::SharedQuoteBook;

/// Period between scheduled cycles unless configured otherwise
pub const DEFAULT_SYNC_INTERVAL: Duration = Duration::from_secs(30);

/// What happened on one scheduler tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickReport {
    /// A cycle ran (or declined to run because conflicts are pending)
    Completed(CycleOutcome),
    /// The cycle hit a persistence error
    Failed(String),
    /// Another holder of the quote book was still busy; nothing ran
    SkippedBusy,
}

/// Runs [`tick`] on a fixed period while enabled.
///
/// At most one timer task exists per scheduler. Ticks never queue: a tick
/// that finds the book busy or awaiting resolution does nothing.
pub struct Scheduler {
    period: Duration,
    reports: Option<UnboundedSender<TickReport>>,
    handle: Option<JoinHandle<()>>,
}

impl Scheduler {
    pub const fn new(period: Duration) -> Self {
        Self {
            period,
            reports: None,
            handle: None,
        }
    }

    /// Forward every tick report to `reports`
    #[must_use]
    pub fn with_reports(mut self, reports: UnboundedSender<TickReport>) -> Self {
        self.reports = Some(reports);
        self
    }

    pub const fn period(&self) -> Duration {
        self.period
    }

    pub fn is_enabled(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Start the timer. Returns `false` when it was already running.
    pub fn enable(&mut self, book: SharedQuoteBook) -> bool {
        if self.is_enabled() {
            return false;
        }

        let period = self.period;
        let reports = self.reports.clone();
        self.handle = Some(tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                let report = tick(&book).await;
                if let Some(reports) = &reports {
                    if reports.send(report).is_err() {
                        tracing::debug!("Tick report receiver dropped");
                    }
                }
            }
        }));
        tracing::info!("Periodic sync enabled every {:?}", period);
        true
    }

    /// Stop the timer. Returns `false` when it was not running.
    pub fn disable(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => {
                let was_running = !handle.is_finished();
                handle.abort();
                if was_running {
                    tracing::info!("Periodic sync disabled");
                }
                was_running
            }
            None => false,
        }
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

/// Run one scheduled cycle unless the book is in use.
pub async fn tick(book: &SharedQuoteBook) -> TickReport {
    let Ok(mut book) = book.try_lock() else {
        tracing::debug!("Skipping sync tick: quote book busy");
        return TickReport::SkippedBusy;
    };

    match book.sync_once().await {
        Ok(CycleOutcome::AwaitingResolution) => {
            tracing::debug!("Skipping sync tick: conflicts awaiting resolution");
            TickReport::Completed(CycleOutcome::AwaitingResolution)
        }
        Ok(outcome) => TickReport::Completed(outcome),
        Err(error) => {
            tracing::warn!("Scheduled sync failed: {error}");
            TickReport::Failed(error.to_string())
        }
    }
}
