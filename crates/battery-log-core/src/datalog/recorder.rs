//! CSV logger / recorder
//!
//! Appends one row per observation to a single owned file.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use super::format::{format_row, HEADER};
use super::{LogError, LogOptions, LogRecord, LogResult, LoggerState, OpenMode};

/// Sequential CSV writer bound to exactly one file
///
/// The file is opened when the logger is created and released by
/// [`close`](CsvLogger::close) or, failing that, when the logger is dropped.
/// Every mutating call takes `&mut self`; callers that share a logger
/// between threads must wrap it themselves.
pub struct CsvLogger {
    /// Destination path, kept for error reporting
    path: PathBuf,
    /// Buffered destination; `None` once closed
    writer: Option<BufWriter<File>>,
    /// Options the logger was opened with
    options: LogOptions,
    /// Data rows written so far (header excluded)
    rows_written: u64,
}

impl CsvLogger {
    /// Open a logger with default options (truncate, no header)
    pub fn open<P: AsRef<Path>>(path: P) -> LogResult<Self> {
        Self::open_with(path, LogOptions::default())
    }

    /// Open a logger with explicit options
    pub fn open_with<P: AsRef<Path>>(path: P, options: LogOptions) -> LogResult<Self> {
        let path = path.as_ref().to_path_buf();

        let mut file = match options.mode {
            OpenMode::Truncate => OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&path),
            OpenMode::Append => OpenOptions::new()
                .create(true)
                .read(true)
                .append(true)
                .open(&path),
        }
        .map_err(|e| LogError::io(&path, e))?;

        let (needs_header, needs_newline) = match options.mode {
            OpenMode::Truncate => (options.header, false),
            OpenMode::Append => {
                let len = file.metadata().map_err(|e| LogError::io(&path, e))?.len();
                // An existing log already carries its header; a torn last row
                // is terminated so new rows never merge into it
                let torn = len > 0
                    && !ends_with_newline(&mut file, len).map_err(|e| LogError::io(&path, e))?;
                (options.header && len == 0, torn)
            }
        };

        let mut writer = BufWriter::new(file);
        if needs_newline {
            tracing::warn!(
                "CSV log {} does not end with a newline; terminating last row",
                path.display()
            );
            writeln!(writer).map_err(|e| LogError::io(&path, e))?;
        }
        if needs_header {
            writeln!(writer, "{}", HEADER).map_err(|e| LogError::io(&path, e))?;
        }

        tracing::debug!(
            "Opened CSV log {} ({:?}, header: {})",
            path.display(),
            options.mode,
            needs_header
        );

        Ok(Self {
            path,
            writer: Some(writer),
            options,
            rows_written: 0,
        })
    }

    /// Append one row
    pub fn write(
        &mut self,
        iteration: i64,
        terminal_id: i64,
        battery: f64,
        covered: i64,
    ) -> LogResult<()> {
        self.write_record(&LogRecord::new(iteration, terminal_id, battery, covered))
    }

    /// Append one row built from a record
    pub fn write_record(&mut self, record: &LogRecord) -> LogResult<()> {
        let writer = self.writer.as_mut().ok_or(LogError::InvalidState {
            operation: "write",
            state: LoggerState::Closed,
        })?;

        let row = format_row(record, self.options.precision);
        writer
            .write_all(row.as_bytes())
            .map_err(|e| LogError::io(&self.path, e))?;
        if self.options.flush_each_row {
            writer.flush().map_err(|e| LogError::io(&self.path, e))?;
        }

        self.rows_written += 1;
        Ok(())
    }

    /// Push buffered rows to the file
    pub fn flush(&mut self) -> LogResult<()> {
        let writer = self.writer.as_mut().ok_or(LogError::InvalidState {
            operation: "flush",
            state: LoggerState::Closed,
        })?;
        writer.flush().map_err(|e| LogError::io(&self.path, e))
    }

    /// Flush and release the destination
    ///
    /// The destination is released even when the final flush fails. Closing
    /// an already closed logger is an [`LogError::InvalidState`] error.
    pub fn close(&mut self) -> LogResult<()> {
        let mut writer = self.writer.take().ok_or(LogError::InvalidState {
            operation: "close",
            state: LoggerState::Closed,
        })?;
        writer.flush().map_err(|e| LogError::io(&self.path, e))?;

        tracing::debug!(
            "Closed CSV log {} after {} rows",
            self.path.display(),
            self.rows_written
        );
        Ok(())
    }

    /// Get the current lifecycle state
    pub fn state(&self) -> LoggerState {
        if self.writer.is_some() {
            LoggerState::Open
        } else {
            LoggerState::Closed
        }
    }

    /// Check if the logger still accepts rows
    pub fn is_open(&self) -> bool {
        self.writer.is_some()
    }

    /// Get the destination path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the number of data rows written
    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }

    /// Get the options the logger was opened with
    pub fn options(&self) -> &LogOptions {
        &self.options
    }
}

/// Check whether a non-empty file's last byte is a line terminator
fn ends_with_newline(file: &mut File, len: u64) -> std::io::Result<bool> {
    let mut last = [0u8; 1];
    file.seek(SeekFrom::Start(len - 1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

impl Drop for CsvLogger {
    fn drop(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            if let Err(e) = writer.flush() {
                tracing::warn!("Failed to flush CSV log {} on drop: {}", self.path.display(), e);
            }
        }
    }
}

impl std::fmt::Debug for CsvLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsvLogger")
            .field("path", &self.path)
            .field("state", &self.state())
            .field("options", &self.options)
            .field("rows_written", &self.rows_written)
            .finish()
    }
}
