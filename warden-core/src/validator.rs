//! Execution log validator
//!
//! Checks a fetched payload against the fixed 8-line grammar produced by the
//! remote job runner:
//!
//! ```text
//! -----------------------------
//! | 01/01/2024 @ 10:00:00 |
//! -----------------------------
//! | CPU Usage: 10% |
//! | Max Memory: 1000 KB |
//! | Execution time: 0.5 s |
//! | Exit code: 0 (success) |
//! -----------------------------
//! ```
//!
//! Each line has its own parser. The first line that fails decides the
//! reported error.

use std::fmt::Display;
use std::str::FromStr;

use crate::domain::record::{LogRecord, LogTimestamp, ValidationResult};
use crate::error::ValidationError;

/// Minimum number of dashes in a border line
pub const BORDER_MIN_LEN: usize = 29;

/// Number of lines in a well-formed log
pub const EXPECTED_LINES: usize = 8;

/// Validates a payload, reducing the parse to pass/fail plus reason
pub fn validate(content: &str) -> ValidationResult {
    parse_log(content).into()
}

/// Parses a payload into its typed fields
///
/// Anything before the first border-length dash run is discarded, so HTML
/// leftovers or banners ahead of the log do not count as lines.
pub fn parse_log(content: &str) -> Result<LogRecord, ValidationError> {
    let body = strip_preamble(content.trim()).trim();
    let lines: Vec<&str> = body.split('\n').map(str::trim).collect();

    let [top, stamp, separator, cpu, memory, time, exit, bottom]: [&str; EXPECTED_LINES] = lines
        .as_slice()
        .try_into()
        .map_err(|_| ValidationError::LineCount(lines.len()))?;

    if !is_border(top) {
        return Err(ValidationError::TopBorder(top.to_string()));
    }
    let recorded_at = parse_timestamp(stamp)?;
    if !is_border(separator) {
        return Err(ValidationError::Separator(separator.to_string()));
    }
    let cpu_percent = parse_cpu(cpu)?;
    let max_memory_kb = parse_memory(memory)?;
    let execution_secs = parse_execution_time(time)?;
    let exit_code = parse_exit_code(exit)?;
    if !is_border(bottom) {
        return Err(ValidationError::BottomBorder(bottom.to_string()));
    }

    Ok(LogRecord {
        recorded_at,
        cpu_percent,
        max_memory_kb,
        execution_secs,
        exit_code,
    })
}

/// Drops everything ahead of the first run of [`BORDER_MIN_LEN`] dashes
///
/// Returns the input unchanged when there is no such run.
pub fn strip_preamble(content: &str) -> &str {
    let marker = "-".repeat(BORDER_MIN_LEN);
    match content.find(&marker) {
        Some(start) => &content[start..],
        None => content,
    }
}

fn is_border(line: &str) -> bool {
    line.len() >= BORDER_MIN_LEN && line.chars().all(|c| c == '-')
}

// =============================================================================
// Line parsers
// =============================================================================

/// `| DD/MM/YYYY @ HH:MM:SS |`
fn parse_timestamp(line: &str) -> Result<LogTimestamp, ValidationError> {
    let fields = Cursor::boxed(line).and_then(|mut c| {
        let day = c.fixed_digits(2)?;
        c.tag("/")?;
        let month = c.fixed_digits(2)?;
        c.tag("/")?;
        let year = c.fixed_digits(4)?;
        c.ws();
        c.tag("@")?;
        c.ws();
        let hour = c.fixed_digits(2)?;
        c.tag(":")?;
        let minute = c.fixed_digits(2)?;
        c.tag(":")?;
        let second = c.fixed_digits(2)?;
        c.finish()?;
        Some([day, month, year, hour, minute, second])
    });

    let [day, month, year, hour, minute, second] =
        fields.ok_or_else(|| ValidationError::Timestamp(line.to_string()))?;

    Ok(LogTimestamp {
        day: number(day)?,
        month: number(month)?,
        year: number(year)?,
        hour: number(hour)?,
        minute: number(minute)?,
        second: number(second)?,
    })
}

/// `| CPU Usage: <int>% |`
fn parse_cpu(line: &str) -> Result<u64, ValidationError> {
    let digits = Cursor::boxed(line).and_then(|mut c| {
        c.tag("CPU Usage:")?;
        c.ws();
        let value = c.digits()?;
        c.tag("%")?;
        c.finish()?;
        Some(value)
    });

    digits
        .map(saturating_count)
        .ok_or_else(|| ValidationError::CpuUsage(line.to_string()))
}

/// `| Max Memory: <int> KB |`
fn parse_memory(line: &str) -> Result<u64, ValidationError> {
    let digits = Cursor::boxed(line).and_then(|mut c| {
        c.tag("Max Memory:")?;
        c.ws();
        let value = c.digits()?;
        c.ws();
        c.tag("KB")?;
        c.finish()?;
        Some(value)
    });

    digits
        .map(saturating_count)
        .ok_or_else(|| ValidationError::MaxMemory(line.to_string()))
}

/// `| Execution time: <int>.<int> s |`
fn parse_execution_time(line: &str) -> Result<f64, ValidationError> {
    let value = Cursor::boxed(line).and_then(|mut c| {
        c.tag("Execution time:")?;
        c.ws();
        let value = c.capture(|c| {
            c.digits()?;
            c.tag(".")?;
            c.digits()?;
            Some(())
        })?;
        c.ws();
        c.tag("s")?;
        c.finish()?;
        Some(value)
    });

    number(value.ok_or_else(|| ValidationError::ExecutionTime(line.to_string()))?)
}

/// `| Exit code: 0 (success) |`
fn parse_exit_code(line: &str) -> Result<i32, ValidationError> {
    let success = Cursor::boxed(line).and_then(|mut c| {
        c.tag("Exit code:")?;
        c.ws();
        c.tag("0")?;
        c.ws();
        c.tag("(success)")?;
        c.finish()
    });

    success
        .map(|()| 0)
        .ok_or_else(|| ValidationError::ExitCode(line.to_string()))
}

/// Counts longer than `u64` can hold are still well-formed; clamp them
fn saturating_count(digits: &str) -> u64 {
    digits.parse().unwrap_or(u64::MAX)
}

fn number<T>(digits: &str) -> Result<T, ValidationError>
where
    T: FromStr,
    T::Err: Display,
{
    digits
        .parse()
        .map_err(|e| ValidationError::Internal(format!("cannot convert '{}': {}", digits, e)))
}

/// Forward-only scanner over the inside of a `|...|` line
struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    /// Opens a cursor between the outer pipes, skipping leading whitespace
    fn boxed(line: &'a str) -> Option<Self> {
        let inner = line.strip_prefix('|')?.strip_suffix('|')?;
        Some(Self {
            rest: inner.trim_start(),
        })
    }

    fn ws(&mut self) {
        self.rest = self.rest.trim_start();
    }

    fn tag(&mut self, literal: &str) -> Option<()> {
        self.rest = self.rest.strip_prefix(literal)?;
        Some(())
    }

    /// One or more ASCII digits
    fn digits(&mut self) -> Option<&'a str> {
        let len = self
            .rest
            .bytes()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if len == 0 {
            return None;
        }
        let (digits, rest) = self.rest.split_at(len);
        self.rest = rest;
        Some(digits)
    }

    /// Exactly `n` ASCII digits
    fn fixed_digits(&mut self, n: usize) -> Option<&'a str> {
        let head = self.rest.get(..n)?;
        if !head.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        self.rest = &self.rest[n..];
        Some(head)
    }

    /// Runs `scan` and returns the text it consumed
    fn capture(&mut self, scan: impl FnOnce(&mut Self) -> Option<()>) -> Option<&'a str> {
        let start = self.rest;
        scan(self)?;
        Some(&start[..start.len() - self.rest.len()])
    }

    /// Only whitespace may remain before the closing pipe
    fn finish(mut self) -> Option<()> {
        self.ws();
        self.rest.is_empty().then_some(())
    }
}
