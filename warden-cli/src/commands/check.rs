//! Check command handler
//!
//! Validates a log read from disk or stdin.

use anyhow::{Context, Result};
use std::io;
use std::path::Path;

use crate::output;

/// Validate a local log file
pub fn handle_check(path: &Path, json: bool) -> Result<()> {
    let content = read_input(path)?;
    output::report(&content, json)
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        return io::read_to_string(io::stdin()).context("Failed to read log from stdin");
    }

    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read log file {}", path.display()))
}
