//! Core domain types
//!
//! Shared between the monitor (which records and renders them) and the CLI
//! (which prints them).

pub mod event;
pub mod record;

pub use event::{EventKind, HistoryEvent};
pub use record::{LogRecord, LogTimestamp, ValidationResult};
