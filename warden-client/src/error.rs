//! Error types for the Warden fetcher

use thiserror::Error;

/// Result type alias for fetch operations
pub type Result<T> = std::result::Result<T, FetchError>;

/// Reasons a fetch produced no payload
///
/// The monitor records all of these the same way; the split exists for
/// logging and the CLI.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network failure, timeout, or malformed URL
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// Server answered with a non-success status
    #[error("server returned status {status}")]
    Status {
        /// HTTP status code
        status: u16,
    },

    /// Response body could not be read as text
    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),
}

impl FetchError {
    /// Check if the request timed out
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Request(e) | Self::Body(e) => e.is_timeout(),
            Self::Status { .. } => false,
        }
    }

    /// Status code, when the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error() {
        let err = FetchError::Status { status: 503 };
        assert_eq!(err.status(), Some(503));
        assert!(!err.is_timeout());
        assert_eq!(err.to_string(), "server returned status 503");
    }
}
