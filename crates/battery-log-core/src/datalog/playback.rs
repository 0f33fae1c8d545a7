//! Log playback
//!
//! Reads finished log files back for analysis.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::format::{parse_row, HEADER};
use super::{LogError, LogRecord, LogResult};

/// In-memory view of a finished log
#[derive(Debug, Clone)]
pub struct LogReader {
    /// Records in file order
    records: Vec<LogRecord>,
    /// Whether the first line was a header
    has_header: bool,
}

impl LogReader {
    /// Create a reader over already parsed records
    pub fn new(records: Vec<LogRecord>) -> Self {
        Self {
            records,
            has_header: false,
        }
    }

    /// Read and parse a log file
    pub fn from_file<P: AsRef<Path>>(path: P) -> LogResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| LogError::io(path, e))?;
        Self::from_reader(BufReader::new(file)).map_err(|err| match err {
            LogError::Io { source, .. } => LogError::io(path, source),
            other => other,
        })
    }

    /// Parse a log from any buffered source
    ///
    /// Blank lines are ignored. A header is accepted only on the first non-empty line.
    pub fn from_reader<R: BufRead>(reader: R) -> LogResult<Self> {
        let mut records = Vec::new();
        let mut has_header = false;
        let mut seen_content = false;

        for (idx, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| LogError::io("<reader>", e))?;
            let line_no = idx + 1;
            let trimmed = line.trim();

            if trimmed.is_empty() {
                continue;
            }
            if !seen_content && trimmed == HEADER {
                seen_content = true;
                has_header = true;
                continue;
            }
            seen_content = true;

            records.push(parse_row(trimmed, line_no)?);
        }

        Ok(Self {
            records,
            has_header,
        })
    }

    /// Get all records in file order
    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    /// Get the number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether the log started with a header line
    pub fn has_header(&self) -> bool {
        self.has_header
    }

    /// Get every record of one terminal
    pub fn terminal_history(&self, terminal_id: i64) -> impl Iterator<Item = &LogRecord> {
        self.records
            .iter()
            .filter(move |r| r.terminal_id == terminal_id)
    }

    /// Get every record of one iteration
    pub fn iteration(&self, iteration: i64) -> impl Iterator<Item = &LogRecord> {
        self.records
            .iter()
            .filter(move |r| r.iteration == iteration)
    }

    /// Get the distinct iteration indices, sorted
    pub fn iterations(&self) -> Vec<i64> {
        let set: BTreeSet<i64> = self.records.iter().map(|r| r.iteration).collect();
        set.into_iter().collect()
    }

    /// Get the distinct terminal ids, sorted
    pub fn terminal_ids(&self) -> Vec<i64> {
        let set: BTreeSet<i64> = self.records.iter().map(|r| r.terminal_id).collect();
        set.into_iter().collect()
    }

    /// Fraction of an iteration's rows that are covered
    pub fn coverage_ratio(&self, iteration: i64) -> Option<f64> {
        let (covered, total) = self
            .iteration(iteration)
            .fold((0usize, 0usize), |(c, t), r| {
                (c + r.is_covered() as usize, t + 1)
            });
        (total > 0).then(|| covered as f64 / total as f64)
    }

    /// Mean battery level of an iteration
    pub fn mean_battery(&self, iteration: i64) -> Option<f64> {
        let (sum, total) = self
            .iteration(iteration)
            .fold((0.0, 0usize), |(s, t), r| (s + r.battery, t + 1));
        (total > 0).then(|| sum / total as f64)
    }
}
