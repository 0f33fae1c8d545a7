//! Data Logging
//!
//! Records per-terminal battery state to CSV and reads finished logs back.

mod error;
mod format;
mod options;
mod playback;
mod recorder;

pub use error::{LogError, LogResult};
pub use format::{format_row, parse_row, BatteryPrecision, HEADER};
pub use options::{LogOptions, OpenMode};
pub use playback::LogReader;
pub use recorder::CsvLogger;

use std::fmt;

/// A single logged observation of one terminal in one iteration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogRecord {
    /// Iteration index (increasing by convention)
    pub iteration: i64,
    /// Terminal identifier
    pub terminal_id: i64,
    /// Battery level, unvalidated
    pub battery: f64,
    /// Coverage flag, conventionally 0 or 1
    pub covered: i64,
}

impl LogRecord {
    /// Create a new log record
    pub fn new(iteration: i64, terminal_id: i64, battery: f64, covered: i64) -> Self {
        Self {
            iteration,
            terminal_id,
            battery,
            covered,
        }
    }

    /// Whether the coverage flag is set (any non-zero value)
    pub fn is_covered(&self) -> bool {
        self.covered != 0
    }
}

/// Lifecycle state of a [`CsvLogger`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggerState {
    /// Destination bound and accepting rows
    Open,
    /// Destination released; terminal state
    Closed,
}

impl fmt::Display for LoggerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoggerState::Open => write!(f, "open"),
            LoggerState::Closed => write!(f, "closed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_covered_flag() {
        assert!(LogRecord::new(0, 1, 50.0, 1).is_covered());
        assert!(LogRecord::new(0, 1, 50.0, 7).is_covered());
        assert!(!LogRecord::new(0, 1, 50.0, 0).is_covered());
    }

    #[test]
    fn test_state_display() {
        assert_eq!(LoggerState::Open.to_string(), "open");
        assert_eq!(LoggerState::Closed.to_string(), "closed");
    }
}
