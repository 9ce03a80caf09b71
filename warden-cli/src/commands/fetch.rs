//! Fetch command handler
//!
//! Fetches the log once, the same way the monitor does, and validates it.

use anyhow::{Context, Result};
use colored::*;
use std::time::Duration;
use warden_client::{HttpLogFetcher, LogFetcher};

use crate::output;

/// Fetch a remote log and validate it
pub async fn handle_fetch(url: &str, timeout_secs: u64, json: bool) -> Result<()> {
    let fetcher = HttpLogFetcher::with_timeout(Duration::from_secs(timeout_secs))
        .context("Failed to build HTTP client")?;

    let log = fetcher
        .fetch(url)
        .await
        .with_context(|| format!("Failed to fetch {}", url))?;

    if log.is_fallback() && !json {
        println!(
            "{}",
            "No <pre> element found, validating the raw response body".yellow()
        );
    }

    output::report(log.payload(), json)
}
