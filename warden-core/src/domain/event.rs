//! History event domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::record::ValidationResult;

/// Message recorded when the fetched page had no `<pre>` container
pub const FALLBACK_MESSAGE: &str = "<pre> tag not found, using raw content";

/// Message recorded alongside a rejected payload
pub const REJECTED_MESSAGE: &str = "processed content rejected";

/// What a history event represents
///
/// Rendering dispatches on this instead of inspecting message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// The fetch failed before any payload was available
    FetchFailed,
    /// The payload was taken from the raw body
    ExtractionFallback,
    /// Summary of one validation run
    Validation { valid: bool },
    /// Full payload that failed validation
    RejectedContent,
}

/// A single time-stamped entry in the monitor history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEvent {
    pub timestamp: DateTime<Utc>,
    pub kind: EventKind,
    pub message: String,
    /// Raw capture or rejected payload; empty for status-only events
    pub content: String,
}

impl HistoryEvent {
    /// Records a transport failure
    pub fn fetch_failed(timestamp: DateTime<Utc>, error: impl std::fmt::Display) -> Self {
        Self {
            timestamp,
            kind: EventKind::FetchFailed,
            message: format!("failed to fetch log: {}", error),
            content: String::new(),
        }
    }

    /// Records that the raw body was used because no `<pre>` was found
    pub fn extraction_fallback(timestamp: DateTime<Utc>, raw: impl Into<String>) -> Self {
        Self {
            timestamp,
            kind: EventKind::ExtractionFallback,
            message: FALLBACK_MESSAGE.to_string(),
            content: raw.into(),
        }
    }

    /// Records the outcome of a validation run
    pub fn validation(timestamp: DateTime<Utc>, result: &ValidationResult) -> Self {
        Self {
            timestamp,
            kind: EventKind::Validation {
                valid: result.is_valid(),
            },
            message: result.message(),
            content: String::new(),
        }
    }

    /// Keeps the payload that failed validation for later display
    pub fn rejected_content(timestamp: DateTime<Utc>, payload: impl Into<String>) -> Self {
        Self {
            timestamp,
            kind: EventKind::RejectedContent,
            message: REJECTED_MESSAGE.to_string(),
            content: payload.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    #[test]
    fn test_status_events_carry_no_content() {
        let now = Utc::now();

        let failed = HistoryEvent::fetch_failed(now, "connection refused");
        assert_eq!(failed.kind, EventKind::FetchFailed);
        assert_eq!(failed.message, "failed to fetch log: connection refused");
        assert!(failed.content.is_empty());

        let summary = HistoryEvent::validation(now, &ValidationResult::Valid);
        assert_eq!(summary.kind, EventKind::Validation { valid: true });
        assert!(summary.content.is_empty());
    }

    #[test]
    fn test_capture_events_keep_payload() {
        let now = Utc::now();

        let fallback = HistoryEvent::extraction_fallback(now, "raw body");
        assert_eq!(fallback.content, "raw body");

        let rejected = HistoryEvent::rejected_content(now, "bad payload");
        assert_eq!(rejected.kind, EventKind::RejectedContent);
        assert_eq!(rejected.content, "bad payload");
    }

    #[test]
    fn test_invalid_summary_uses_reason() {
        let result = ValidationResult::Invalid(ValidationError::LineCount(2));
        let event = HistoryEvent::validation(Utc::now(), &result);

        assert_eq!(event.kind, EventKind::Validation { valid: false });
        assert_eq!(event.message, "incorrect line count: 2");
    }
}
