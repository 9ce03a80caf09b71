//! Warden HTTP fetcher
//!
//! Fetches the monitored log over HTTP and pulls the log text out of its
//! HTML wrapper.
//!
//! # Example
//!
//! ```no_run
//! use warden_client::{HttpLogFetcher, LogFetcher};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let fetcher = HttpLogFetcher::new();
//!     let log = fetcher.fetch("http://localhost:8000/job.log").await?;
//!
//!     if log.is_fallback() {
//!         println!("no <pre> element, using the raw body");
//!     }
//!     println!("{}", log.payload());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod extract;

pub use error::{FetchError, Result};
pub use extract::extract_pre;

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// A fetched page and the log text extracted from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedLog {
    /// Response body as received
    pub raw: String,
    /// Text of the `<pre>` element, `None` when the page had none
    pub extracted: Option<String>,
}

impl FetchedLog {
    /// Runs extraction over a response body
    pub fn from_body(raw: String) -> Self {
        let extracted = extract_pre(&raw);
        Self { raw, extracted }
    }

    /// Text to validate: the extracted element, or the raw body on fallback
    pub fn payload(&self) -> &str {
        self.extracted.as_deref().unwrap_or(&self.raw)
    }

    /// True when no `<pre>` element was found
    pub fn is_fallback(&self) -> bool {
        self.extracted.is_none()
    }
}

/// Source of log pages
///
/// The monitor depends on this trait so poll cycles can run against fakes.
#[async_trait]
pub trait LogFetcher: Send + Sync {
    /// Fetches `url` and extracts its log text
    async fn fetch(&self, url: &str) -> Result<FetchedLog>;
}

/// reqwest-backed fetcher
#[derive(Debug, Clone)]
pub struct HttpLogFetcher {
    client: Client,
}

impl HttpLogFetcher {
    /// Creates a fetcher with reqwest defaults (no request timeout)
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Creates a fetcher whose requests give up after `timeout`
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FetchError::Request)?;
        Ok(Self { client })
    }
}

impl Default for HttpLogFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LogFetcher for HttpLogFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedLog> {
        debug!(url, "HTTP GET start");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(FetchError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(FetchError::Body)?;
        debug!(url, bytes = body.len(), "HTTP GET done");

        Ok(FetchedLog::from_body(body))
    }
}
