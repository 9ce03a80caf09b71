//! Time-windowed history buffer
//!
//! Events are kept oldest-first. Nothing is evicted on append; callers run
//! [`HistoryBuffer::prune`] before reading so the window invariant holds for
//! every rendered snapshot.

use chrono::{DateTime, TimeDelta, Utc};
use std::collections::VecDeque;

use crate::domain::event::HistoryEvent;

/// Default retention window
pub const DEFAULT_RETENTION: TimeDelta = TimeDelta::hours(24);

#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    events: VecDeque<HistoryEvent>,
    retention: TimeDelta,
}

impl HistoryBuffer {
    /// Creates an empty buffer with the default 24 hour window
    pub fn new() -> Self {
        Self::with_retention(DEFAULT_RETENTION)
    }

    pub fn with_retention(retention: TimeDelta) -> Self {
        Self {
            events: VecDeque::new(),
            retention,
        }
    }

    pub fn retention(&self) -> TimeDelta {
        self.retention
    }

    /// Adds an event at the back
    pub fn append(&mut self, event: HistoryEvent) {
        self.events.push_back(event);
    }

    /// Drops events older than the retention window relative to `now`
    ///
    /// An event exactly at the window edge is kept. Returns the number of
    /// events removed.
    pub fn prune(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.events.len();
        while self
            .events
            .front()
            .is_some_and(|oldest| now - oldest.timestamp > self.retention)
        {
            self.events.pop_front();
        }
        before - self.events.len()
    }

    /// Copy of the retained events, oldest first
    pub fn snapshot(&self) -> Vec<HistoryEvent> {
        self.events.iter().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event_at(timestamp: DateTime<Utc>, message: &str) -> HistoryEvent {
        HistoryEvent::fetch_failed(timestamp, message)
    }

    #[test]
    fn test_prune_keeps_events_inside_window() {
        let now = Utc::now();
        let mut buffer = HistoryBuffer::new();
        buffer.append(event_at(now - TimeDelta::hours(25), "old"));
        buffer.append(event_at(now - TimeDelta::hours(23), "recent"));
        buffer.append(event_at(now - TimeDelta::hours(1), "latest"));

        assert_eq!(buffer.prune(now), 1);

        let messages: Vec<_> = buffer.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            vec!["failed to fetch log: recent", "failed to fetch log: latest"]
        );
    }

    #[test]
    fn test_prune_can_empty_buffer() {
        let now = Utc::now();
        let mut buffer = HistoryBuffer::new();
        buffer.append(event_at(now - TimeDelta::hours(30), "stale"));

        buffer.prune(now);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_prune_is_idempotent() {
        let now = Utc::now();
        let mut buffer = HistoryBuffer::new();
        buffer.append(event_at(now - TimeDelta::hours(48), "a"));
        buffer.append(event_at(now - TimeDelta::hours(2), "b"));

        buffer.prune(now);
        let first = buffer.snapshot();
        assert_eq!(buffer.prune(now), 0);
        assert_eq!(buffer.snapshot(), first);
    }

    #[test]
    fn test_event_on_window_edge_is_kept() {
        let now = Utc::now();
        let mut buffer = HistoryBuffer::new();
        buffer.append(event_at(now - DEFAULT_RETENTION, "edge"));

        buffer.prune(now);
        assert_eq!(buffer.len(), 1);
    }

    #[test]
    fn test_custom_retention() {
        let now = Utc::now();
        let mut buffer = HistoryBuffer::with_retention(TimeDelta::hours(1));
        buffer.append(event_at(now - TimeDelta::minutes(90), "a"));
        buffer.append(event_at(now - TimeDelta::minutes(30), "b"));

        buffer.prune(now);
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.retention(), TimeDelta::hours(1));
    }

    #[test]
    fn test_snapshot_preserves_append_order() {
        let now = Utc::now();
        let mut buffer = HistoryBuffer::new();
        for i in 0..5 {
            buffer.append(event_at(now, &i.to_string()));
        }

        let snapshot = buffer.snapshot();
        assert_eq!(snapshot.len(), 5);
        assert_eq!(snapshot[0].message, "failed to fetch log: 0");
        assert_eq!(snapshot[4].message, "failed to fetch log: 4");
        assert_eq!(buffer.len(), 5);
    }
}
