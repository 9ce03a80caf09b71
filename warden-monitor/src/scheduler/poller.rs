//! Log poller
//!
//! Fetches the monitored log once per interval, records what happened in
//! the history and republishes the report. A failed cycle only produces
//! history events; the loop always continues to the next interval.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, error, info, warn};
use warden_client::{FetchedLog, LogFetcher};
use warden_core::domain::{HistoryEvent, ValidationResult};
use warden_core::validate;

use crate::config::Config;
use crate::service::{HistoryService, ReportStore, ReportStoreError};

/// Result of a single poll cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    Valid,
    Invalid,
    FetchFailed,
}

/// Poller that drives one monitoring cycle per interval
pub struct LogPoller {
    config: Config,
    fetcher: Arc<dyn LogFetcher>,
    history: Arc<dyn HistoryService>,
    store: Arc<ReportStore>,
}

impl LogPoller {
    /// Creates a new log poller
    pub fn new(
        config: Config,
        fetcher: Arc<dyn LogFetcher>,
        history: Arc<dyn HistoryService>,
        store: Arc<ReportStore>,
    ) -> Self {
        Self {
            config,
            fetcher,
            history,
            store,
        }
    }

    /// Starts the polling loop
    ///
    /// The first cycle runs immediately. Returns once `shutdown` changes or
    /// its sender is dropped.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        info!(
            "Starting log poller (source: {}, interval: {:?})",
            self.config.source_url, self.config.poll_interval
        );

        let mut interval = time::interval(self.config.poll_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => {}
                _ = shutdown.changed() => break,
            }

            let outcome = self.run_cycle(Utc::now()).await;
            debug!(?outcome, "Poll cycle finished");
        }

        info!("Log poller stopped");
    }

    /// Performs a single poll cycle as of `now`
    pub async fn run_cycle(&self, now: DateTime<Utc>) -> CycleOutcome {
        let outcome = match self.fetcher.fetch(&self.config.source_url).await {
            Ok(log) => self.check(now, log),
            Err(e) => {
                warn!(
                    error = %e,
                    timeout = e.is_timeout(),
                    status = ?e.status(),
                    "Failed to fetch log"
                );
                self.history.record(HistoryEvent::fetch_failed(now, &e));
                CycleOutcome::FetchFailed
            }
        };

        let pruned = self.history.prune(now);
        if pruned > 0 {
            debug!("Pruned {} expired history event(s)", pruned);
        }

        if let Err(e) = self.publish().await {
            error!("Failed to persist report: {:#}", e);
        }

        outcome
    }

    /// Validates a fetched log and records the result
    fn check(&self, now: DateTime<Utc>, log: FetchedLog) -> CycleOutcome {
        if log.is_fallback() {
            warn!("No <pre> element in response, validating raw body");
            self.history
                .record(HistoryEvent::extraction_fallback(now, log.raw.clone()));
        }

        let payload = log.payload().to_string();
        let result = validate(&payload);
        self.history.record(HistoryEvent::validation(now, &result));

        match result {
            ValidationResult::Valid => {
                if self.history.last_known_good().as_deref() == Some(payload.as_str()) {
                    info!("Log valid, unchanged since last cycle");
                } else {
                    info!("Log valid, last known good updated");
                }
                self.history.accept(payload);
                CycleOutcome::Valid
            }
            ValidationResult::Invalid(err) => {
                warn!(field = err.field(), "Log invalid: {}", err);
                self.history
                    .record(HistoryEvent::rejected_content(now, payload));
                CycleOutcome::Invalid
            }
        }
    }

    /// Renders the current snapshot and persists it
    async fn publish(&self) -> Result<(), ReportStoreError> {
        let report = self.history.snapshot().render();
        self.store.write(&report).await?;
        debug!("Report written to {}", self.store.path().display());
        Ok(())
    }
}
