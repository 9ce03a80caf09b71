//! Monitor configuration
//!
//! Defines the polled source, the schedule, the history window and where the
//! report is persisted and served.

use chrono::TimeDelta;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_SOURCE_URL: &str = "http://localhost:8000/execution.log";
const DEFAULT_POLL_INTERVAL_SECS: u64 = 3600;
const DEFAULT_RETENTION_HOURS: i64 = 24;
const DEFAULT_REPORT_PATH: &str = "saida.txt";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Monitor configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the log to poll
    pub source_url: String,

    /// Time between poll cycles
    pub poll_interval: Duration,

    /// How long history events are kept
    pub retention: TimeDelta,

    /// File the rendered report is written to
    pub report_path: PathBuf,

    /// Port the report server listens on (all interfaces)
    pub port: u16,

    /// Timeout applied to each fetch
    pub fetch_timeout: Duration,
}

impl Config {
    /// Creates configuration from environment variables
    ///
    /// Every variable is optional:
    /// - WARDEN_SOURCE_URL
    /// - WARDEN_POLL_INTERVAL (seconds, default: 3600)
    /// - WARDEN_RETENTION_HOURS (default: 24)
    /// - WARDEN_REPORT_PATH (default: saida.txt)
    /// - WARDEN_PORT (default: 8080)
    /// - WARDEN_FETCH_TIMEOUT (seconds, default: 30)
    ///
    /// Values that fail to parse fall back to their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            source_url: lookup("WARDEN_SOURCE_URL").unwrap_or(defaults.source_url),
            poll_interval: parse_var(&lookup, "WARDEN_POLL_INTERVAL")
                .map(Duration::from_secs)
                .unwrap_or(defaults.poll_interval),
            retention: parse_var(&lookup, "WARDEN_RETENTION_HOURS")
                .and_then(TimeDelta::try_hours)
                .unwrap_or(defaults.retention),
            report_path: lookup("WARDEN_REPORT_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.report_path),
            port: parse_var(&lookup, "WARDEN_PORT").unwrap_or(defaults.port),
            fetch_timeout: parse_var(&lookup, "WARDEN_FETCH_TIMEOUT")
                .map(Duration::from_secs)
                .unwrap_or(defaults.fetch_timeout),
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.source_url.starts_with("http://") && !self.source_url.starts_with("https://") {
            anyhow::bail!("source_url must start with http:// or https://");
        }

        if self.poll_interval.is_zero() {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        if self.retention <= TimeDelta::zero() {
            anyhow::bail!("retention must be greater than 0");
        }

        if self.report_path.as_os_str().is_empty() {
            anyhow::bail!("report_path cannot be empty");
        }

        if self.fetch_timeout.is_zero() {
            anyhow::bail!("fetch_timeout must be greater than 0");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            retention: TimeDelta::hours(DEFAULT_RETENTION_HOURS),
            report_path: PathBuf::from(DEFAULT_REPORT_PATH),
            port: DEFAULT_PORT,
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
        }
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|value| value.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.poll_interval, Duration::from_secs(3600));
        assert_eq!(config.retention, TimeDelta::hours(24));
        assert_eq!(config.port, 8080);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("WARDEN_SOURCE_URL", "https://example.org/job.log"),
            ("WARDEN_POLL_INTERVAL", "60"),
            ("WARDEN_RETENTION_HOURS", " 6 "),
            ("WARDEN_REPORT_PATH", "/tmp/report.txt"),
            ("WARDEN_PORT", "9090"),
        ]));

        assert_eq!(config.source_url, "https://example.org/job.log");
        assert_eq!(config.poll_interval, Duration::from_secs(60));
        assert_eq!(config.retention, TimeDelta::hours(6));
        assert_eq!(config.report_path, PathBuf::from("/tmp/report.txt"));
        assert_eq!(config.port, 9090);
        assert_eq!(config.fetch_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_malformed_numbers_use_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("WARDEN_POLL_INTERVAL", "hourly"),
            ("WARDEN_PORT", "99999"),
        ]));

        assert_eq!(config.poll_interval, Duration::from_secs(3600));
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();

        config.source_url = "ftp://example.org/log".to_string();
        assert!(config.validate().is_err());
        config.source_url = "http://example.org/log".to_string();

        config.poll_interval = Duration::ZERO;
        assert!(config.validate().is_err());
        config.poll_interval = Duration::from_secs(1);

        config.retention = TimeDelta::zero();
        assert!(config.validate().is_err());
        config.retention = TimeDelta::hours(1);

        assert!(config.validate().is_ok());
    }
}
