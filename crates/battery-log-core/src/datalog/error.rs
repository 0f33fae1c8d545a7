//! Data log errors

use std::path::PathBuf;

use thiserror::Error;

use super::LoggerState;

/// Result alias used throughout the datalog module
pub type LogResult<T> = Result<T, LogError>;

/// Errors that can occur while writing or reading a data log
#[derive(Error, Debug)]
pub enum LogError {
    /// Opening, writing, flushing or reading a file failed
    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        /// File the operation was on
        path: PathBuf,
        /// Underlying storage error
        #[source]
        source: std::io::Error,
    },

    /// Operation attempted on a logger that is not open
    #[error("Cannot {operation}: logger is {state}")]
    InvalidState {
        /// Rejected operation
        operation: &'static str,
        /// State the logger was in
        state: LoggerState,
    },

    /// Malformed row in a log being read back
    #[error("Parse error at line {line}: {message}")]
    Parse {
        /// 1-based line number
        line: usize,
        /// What was wrong with the row
        message: String,
    },

    /// Options file could not be read or written as JSON
    #[error("Invalid log options: {0}")]
    Config(String),
}

impl LogError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LogError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<serde_json::Error> for LogError {
    fn from(err: serde_json::Error) -> Self {
        LogError::Config(err.to_string())
    }
}
