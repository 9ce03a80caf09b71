//! Report persistence
//!
//! The report is replaced atomically: it is written to a sibling temp file
//! and renamed over the target, so a concurrent read sees either the old or
//! the new report, never a partial one.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

#[derive(Debug, Error)]
pub enum ReportStoreError {
    #[error("failed to create report directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write report {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read report {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ReportStoreError>;

/// File-backed store for the rendered report
#[derive(Debug, Clone)]
pub struct ReportStore {
    path: PathBuf,
}

impl ReportStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the report's parent directory
    ///
    /// Called once at startup; failure there is fatal.
    pub async fn prepare(&self) -> Result<()> {
        let Some(dir) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) else {
            return Ok(());
        };

        fs::create_dir_all(dir)
            .await
            .map_err(|source| ReportStoreError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })
    }

    /// Replaces the stored report with `report`
    pub async fn write(&self, report: &str) -> Result<()> {
        let tmp = self.temp_path();
        let write_err = |source| ReportStoreError::Write {
            path: self.path.clone(),
            source,
        };

        fs::write(&tmp, report.as_bytes()).await.map_err(write_err)?;

        if let Err(source) = fs::rename(&tmp, &self.path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(write_err(source));
        }

        Ok(())
    }

    /// Reads the stored report, `None` if nothing has been written yet
    pub async fn read(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path).await {
            Ok(report) => Ok(Some(report)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(ReportStoreError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
