//! Service layer
//!
//! Services hold the monitor's process-wide state and its persisted output.
//! The poller is the only writer; the API only reads.

mod history;
mod report_store;

// Re-export traits
pub use history::HistoryService;

// Re-export implementations
pub use history::{HistorySnapshot, InMemoryHistory};
pub use report_store::{ReportStore, ReportStoreError};
