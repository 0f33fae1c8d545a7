//! Log options
//!
//! Open-time configuration for a [`CsvLogger`](super::CsvLogger), stored as JSON.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::{BatteryPrecision, LogError, LogResult};

/// How an existing destination file is treated at open time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpenMode {
    /// Start a fresh log, discarding previous contents
    #[default]
    Truncate,
    /// Keep previous contents and add rows after them
    Append,
}

/// Options applied when a logger is opened
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LogOptions {
    /// Write the column header as the first line
    pub header: bool,

    /// Truncate or append
    pub mode: OpenMode,

    /// Battery column rendering
    pub precision: BatteryPrecision,

    /// Flush after every row instead of relying on buffering
    pub flush_each_row: bool,
}

impl LogOptions {
    /// Enable or disable the header line
    pub fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    /// Set the open mode
    pub fn with_mode(mut self, mode: OpenMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the battery precision
    pub fn with_precision(mut self, precision: BatteryPrecision) -> Self {
        self.precision = precision;
        self
    }

    /// Flush after each row
    pub fn with_flush_each_row(mut self, flush: bool) -> Self {
        self.flush_each_row = flush;
        self
    }

    /// Load options from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> LogResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| LogError::io(path, e))?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save options to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> LogResult<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| LogError::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = LogOptions::default();
        assert!(!options.header);
        assert_eq!(options.mode, OpenMode::Truncate);
        assert_eq!(options.precision, BatteryPrecision::Shortest);
        assert!(!options.flush_each_row);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let options: LogOptions = serde_json::from_str(r#"{"header": true}"#).unwrap();
        assert!(options.header);
        assert_eq!(options.mode, OpenMode::Truncate);

        let options: LogOptions =
            serde_json::from_str(r#"{"mode": "append", "precision": {"fixed": 6}}"#).unwrap();
        assert_eq!(options.mode, OpenMode::Append);
        assert_eq!(options.precision, BatteryPrecision::Fixed(6));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log_options.json");

        let options = LogOptions::default()
            .with_header(true)
            .with_mode(OpenMode::Append)
            .with_precision(BatteryPrecision::Fixed(3))
            .with_flush_each_row(true);
        options.save(&path).unwrap();

        assert_eq!(LogOptions::load(&path).unwrap(), options);
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ header: yes").unwrap();

        assert!(matches!(LogOptions::load(&path), Err(LogError::Config(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = LogOptions::load(dir.path().join("missing.json"));
        assert!(matches!(result, Err(LogError::Io { .. })));
    }
}
