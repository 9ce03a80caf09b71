//! Validation error types

use thiserror::Error;

/// Reason a fetched log failed the grammar check
///
/// Each variant carries the literal offending line, except the line count
/// and internal fault variants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("incorrect line count: {0}")]
    LineCount(usize),

    #[error("invalid top border: '{0}'")]
    TopBorder(String),

    #[error("invalid timestamp format: '{0}'")]
    Timestamp(String),

    #[error("invalid separator after timestamp: '{0}'")]
    Separator(String),

    #[error("invalid CPU Usage format: '{0}'")]
    CpuUsage(String),

    #[error("invalid Max Memory format: '{0}'")]
    MaxMemory(String),

    #[error("invalid Execution time format: '{0}'")]
    ExecutionTime(String),

    #[error("invalid Exit code or not success: '{0}'")]
    ExitCode(String),

    #[error("invalid bottom border: '{0}'")]
    BottomBorder(String),

    /// A line matched its shape but could not be converted to its typed value
    #[error("validation error: {0}")]
    Internal(String),
}

impl ValidationError {
    /// Name of the field that failed, for structured logging
    pub fn field(&self) -> &'static str {
        match self {
            Self::LineCount(_) => "line_count",
            Self::TopBorder(_) => "top_border",
            Self::Timestamp(_) => "timestamp",
            Self::Separator(_) => "separator",
            Self::CpuUsage(_) => "cpu_usage",
            Self::MaxMemory(_) => "max_memory",
            Self::ExecutionTime(_) => "execution_time",
            Self::ExitCode(_) => "exit_code",
            Self::BottomBorder(_) => "bottom_border",
            Self::Internal(_) => "internal",
        }
    }
}
