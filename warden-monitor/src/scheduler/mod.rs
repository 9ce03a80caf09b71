//! Scheduler layer for the monitor
//!
//! This layer runs the fetch, validate, record, render and persist cycle on
//! a fixed interval until shutdown.

pub mod poller;

pub use poller::{CycleOutcome, LogPoller};
