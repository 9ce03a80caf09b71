//! Parsed log record and validation outcome

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

/// Message recorded for a log that passed validation
pub const VALID_MESSAGE: &str = "log valid";

/// Timestamp as printed in the log header (`DD/MM/YYYY @ HH:MM:SS`)
///
/// Kept as raw fields: the grammar checks shape, not calendar validity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogTimestamp {
    pub day: u8,
    pub month: u8,
    pub year: u16,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl fmt::Display for LogTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}/{:02}/{:04} @ {:02}:{:02}:{:02}",
            self.day, self.month, self.year, self.hour, self.minute, self.second
        )
    }
}

/// Fields extracted from a well-formed execution log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub recorded_at: LogTimestamp,
    /// Saturates at `u64::MAX`, as does `max_memory_kb`
    pub cpu_percent: u64,
    pub max_memory_kb: u64,
    pub execution_secs: f64,
    pub exit_code: i32,
}

/// Outcome of validating one fetched payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid(ValidationError),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Diagnostic reason, `None` when valid
    pub fn reason(&self) -> Option<String> {
        match self {
            Self::Valid => None,
            Self::Invalid(err) => Some(err.to_string()),
        }
    }

    /// Status line recorded in history for this outcome
    pub fn message(&self) -> String {
        self.reason().unwrap_or_else(|| VALID_MESSAGE.to_string())
    }
}

impl<T> From<Result<T, ValidationError>> for ValidationResult {
    fn from(result: Result<T, ValidationError>) -> Self {
        match result {
            Ok(_) => Self::Valid,
            Err(err) => Self::Invalid(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_display_pads_fields() {
        let ts = LogTimestamp {
            day: 1,
            month: 2,
            year: 2024,
            hour: 3,
            minute: 4,
            second: 5,
        };
        assert_eq!(ts.to_string(), "01/02/2024 @ 03:04:05");
    }

    #[test]
    fn test_result_messages() {
        assert_eq!(ValidationResult::Valid.message(), VALID_MESSAGE);
        assert!(ValidationResult::Valid.reason().is_none());

        let invalid = ValidationResult::Invalid(ValidationError::LineCount(7));
        assert!(!invalid.is_valid());
        assert_eq!(invalid.message(), "incorrect line count: 7");
    }

    #[test]
    fn test_record_serializes_to_json() {
        let record = LogRecord {
            recorded_at: LogTimestamp {
                day: 1,
                month: 1,
                year: 2024,
                hour: 10,
                minute: 0,
                second: 0,
            },
            cpu_percent: 10,
            max_memory_kb: 1000,
            execution_secs: 0.5,
            exit_code: 0,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["cpu_percent"], 10);
        assert_eq!(json["recorded_at"]["year"], 2024);
    }
}
