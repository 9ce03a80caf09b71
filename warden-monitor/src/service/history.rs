//! History service
//!
//! Owns the event history and the last known good log. Both sit behind one
//! lock so a snapshot always pairs a history with the matching last good
//! value.

use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::Mutex;
use warden_core::HistoryBuffer;
use warden_core::domain::HistoryEvent;
use warden_core::report;

/// Service for recording and reading monitor history
pub trait HistoryService: Send + Sync {
    /// Appends an event to the history
    fn record(&self, event: HistoryEvent);

    /// Replaces the last known good log
    fn accept(&self, content: String);

    /// Drops events older than the retention window
    ///
    /// # Returns
    /// The number of events removed
    fn prune(&self, now: DateTime<Utc>) -> usize;

    /// Copies the current history and last known good log
    fn snapshot(&self) -> HistorySnapshot;

    /// Most recent log that passed validation
    fn last_known_good(&self) -> Option<String>;
}

/// Consistent copy of the monitor state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistorySnapshot {
    pub events: Vec<HistoryEvent>,
    pub last_known_good: Option<String>,
    pub retention: TimeDelta,
}

impl HistorySnapshot {
    /// Renders the plain-text report for this snapshot
    pub fn render(&self) -> String {
        report::render_with_window(
            &self.events,
            self.last_known_good.as_deref(),
            self.retention,
        )
    }
}

struct State {
    history: HistoryBuffer,
    last_known_good: Option<String>,
}

/// In-memory implementation of HistoryService
///
/// State is lost on restart.
pub struct InMemoryHistory {
    state: Mutex<State>,
}

impl InMemoryHistory {
    /// Creates an empty history with the given retention window
    pub fn new(retention: TimeDelta) -> Self {
        Self {
            state: Mutex::new(State {
                history: HistoryBuffer::with_retention(retention),
                last_known_good: None,
            }),
        }
    }
}

impl HistoryService for InMemoryHistory {
    fn record(&self, event: HistoryEvent) {
        self.state.lock().history.append(event);
    }

    fn accept(&self, content: String) {
        self.state.lock().last_known_good = Some(content);
    }

    fn prune(&self, now: DateTime<Utc>) -> usize {
        self.state.lock().history.prune(now)
    }

    fn snapshot(&self) -> HistorySnapshot {
        let state = self.state.lock();
        HistorySnapshot {
            events: state.history.snapshot(),
            last_known_good: state.last_known_good.clone(),
            retention: state.history.retention(),
        }
    }

    fn last_known_good(&self) -> Option<String> {
        self.state.lock().last_known_good.clone()
    }
}
