//! # Battery Log Core Library
//!
//! Core functionality for recording battery-evolution runs.

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//!
//! This library provides:
//! - A sequential CSV logger with one row per terminal observation
//! - Configurable header, open mode and battery precision
//! - Reading finished logs back for per-terminal and per-iteration analysis
//!
//! ## Row format
//!
//! ```text
//! <iteration>,<terminal_id>,<battery>,<covered>
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use battery_log_core::datalog::CsvLogger;
//!
//! let mut logger = CsvLogger::open("run1.csv")?;
//! logger.write(0, 3, 87.5, 1)?;
//! logger.write(1, 3, 86.9, 0)?;
//! logger.close()?;
//! # Ok::<(), battery_log_core::datalog::LogError>(())
//! ```

pub mod datalog;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::datalog::{
        BatteryPrecision, CsvLogger, LogError, LogOptions, LogReader, LogRecord, LogResult,
        LoggerState, OpenMode,
    };
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
