//! Warden Monitor
//!
//! Polls a remote execution log, validates it and serves a rolling report.
//!
//! Architecture:
//! - Configuration: Load settings from environment or defaults
//! - Services: History state and report persistence
//! - Scheduler: The fetch/validate/record/publish cycle
//! - API: Read-only report endpoint
//!
//! The poller and the HTTP server share the runtime. Only the poller writes
//! history; the server only reads the persisted report.

mod api;
mod config;
mod scheduler;
mod service;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use warden_client::{HttpLogFetcher, LogFetcher};

use crate::config::Config;
use crate::scheduler::LogPoller;
use crate::service::{HistoryService, InMemoryHistory, ReportStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warden_monitor=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Warden Monitor");

    // Load configuration
    let config = Config::from_env();
    config.validate().context("Invalid configuration")?;
    info!(
        "Loaded configuration: source_url={}, report_path={}",
        config.source_url,
        config.report_path.display()
    );

    let store = Arc::new(ReportStore::new(config.report_path.clone()));
    store
        .prepare()
        .await
        .context("Failed to prepare report location")?;

    let fetcher: Arc<dyn LogFetcher> = Arc::new(
        HttpLogFetcher::with_timeout(config.fetch_timeout)
            .context("Failed to build HTTP client")?,
    );
    let history: Arc<dyn HistoryService> = Arc::new(InMemoryHistory::new(config.retention));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!(
        "Poll interval: {:?}, retention: {}h",
        config.poll_interval,
        config.retention.num_hours()
    );

    // Start polling loop
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let poller = LogPoller::new(config, fetcher, history, Arc::clone(&store));
    let poller_handle = tokio::spawn(async move { poller.run(shutdown_rx).await });

    let app = api::create_router(store);

    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_tx))
        .await
        .context("Server error")?;

    if let Err(e) = poller_handle.await {
        warn!("Poller task panicked: {}", e);
    }

    info!("Warden Monitor stopped");
    Ok(())
}

/// Waits for Ctrl-C, then tells the poller to stop
async fn shutdown_signal(shutdown_tx: watch::Sender<bool>) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }

    info!("Shutdown signal received");
    let _ = shutdown_tx.send(true);
}
