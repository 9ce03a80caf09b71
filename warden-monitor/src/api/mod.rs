//! API Module
//!
//! Read-only HTTP surface of the monitor.

pub mod error;
pub mod health;
pub mod report;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::service::ReportStore;

/// Create the router serving the persisted report
pub fn create_router(store: Arc<ReportStore>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Rendered report
        .route("/saida", get(report::get_report))
        // Add state and middleware
        .with_state(store)
        .layer(TraceLayer::new_for_http())
}
