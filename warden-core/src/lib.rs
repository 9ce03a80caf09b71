//! Warden Core
//!
//! Core types and logic for the Warden log monitor.
//!
//! This crate contains:
//! - Domain types: parsed log records, validation outcomes, history events
//! - Validator: the fixed-format grammar for fetched execution logs
//! - History: the time-windowed event buffer
//! - Report: the plain-text rendering served by the monitor

pub mod domain;
pub mod error;
pub mod history;
pub mod report;
pub mod validator;

pub use error::ValidationError;
pub use history::HistoryBuffer;
pub use validator::{parse_log, validate};
