//! Row format
//!
//! Serializes [`LogRecord`]s to comma-separated rows and parses them back.

use serde::{Deserialize, Serialize};

use super::{LogError, LogRecord, LogResult};

/// Column header, written only when enabled in [`LogOptions`](super::LogOptions)
pub const HEADER: &str = "iteration,terminal_id,battery,covered";

/// Number of fields in every row
const FIELD_COUNT: usize = 4;

/// How the battery column is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatteryPrecision {
    /// Shortest text that parses back to the identical value (`87.5`)
    #[default]
    Shortest,
    /// Fixed number of fraction digits (`Fixed(6)` gives `87.500000`)
    Fixed(u8),
}

/// Format one record as a newline-terminated row
pub fn format_row(record: &LogRecord, precision: BatteryPrecision) -> String {
    match precision {
        BatteryPrecision::Shortest => format!(
            "{},{},{},{}\n",
            record.iteration, record.terminal_id, record.battery, record.covered
        ),
        BatteryPrecision::Fixed(digits) => format!(
            "{},{},{:.*},{}\n",
            record.iteration,
            record.terminal_id,
            digits as usize,
            record.battery,
            record.covered
        ),
    }
}

/// Parse a single row (without its line terminator)
///
/// `line` is the 1-based line number used in error messages.
pub fn parse_row(text: &str, line: usize) -> LogResult<LogRecord> {
    let fields: Vec<&str> = text.trim_end_matches(['\r', '\n']).split(',').collect();
    if fields.len() != FIELD_COUNT {
        return Err(LogError::Parse {
            line,
            message: format!("expected {} fields, found {}", FIELD_COUNT, fields.len()),
        });
    }

    let int_field = |idx: usize, name: &str| -> LogResult<i64> {
        fields[idx].trim().parse::<i64>().map_err(|e| LogError::Parse {
            line,
            message: format!("invalid {} '{}': {}", name, fields[idx], e),
        })
    };

    let battery = fields[2]
        .trim()
        .parse::<f64>()
        .map_err(|e| LogError::Parse {
            line,
            message: format!("invalid battery '{}': {}", fields[2], e),
        })?;

    Ok(LogRecord {
        iteration: int_field(0, "iteration")?,
        terminal_id: int_field(1, "terminal_id")?,
        battery,
        covered: int_field(3, "covered")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_shortest_formatting() {
        let record = LogRecord::new(0, 3, 87.5, 1);
        assert_eq!(format_row(&record, BatteryPrecision::Shortest), "0,3,87.5,1\n");

        let record = LogRecord::new(12, 0, 100.0, 0);
        assert_eq!(format_row(&record, BatteryPrecision::Shortest), "12,0,100,0\n");
    }

    #[test]
    fn test_fixed_formatting() {
        let record = LogRecord::new(1, 3, 86.9, 0);
        assert_eq!(
            format_row(&record, BatteryPrecision::Fixed(6)),
            "1,3,86.900000,0\n"
        );
        assert_eq!(format_row(&record, BatteryPrecision::Fixed(0)), "1,3,87,0\n");
    }

    #[test]
    fn test_negative_values() {
        let record = LogRecord::new(-1, -42, -0.25, -1);
        let row = format_row(&record, BatteryPrecision::Shortest);
        assert_eq!(row, "-1,-42,-0.25,-1\n");
        assert_eq!(parse_row(&row, 1).unwrap(), record);
    }

    #[test]
    fn test_non_finite_battery() {
        let row = format_row(&LogRecord::new(0, 0, f64::INFINITY, 0), BatteryPrecision::Shortest);
        assert_eq!(row, "0,0,inf,0\n");
        assert_eq!(parse_row(&row, 1).unwrap().battery, f64::INFINITY);

        let row = format_row(&LogRecord::new(0, 0, f64::NAN, 0), BatteryPrecision::Shortest);
        assert!(parse_row(&row, 1).unwrap().battery.is_nan());
    }

    #[test]
    fn test_parse_rejects_wrong_field_count() {
        match parse_row("1,2,3", 7) {
            Err(LogError::Parse { line, message }) => {
                assert_eq!(line, 7);
                assert!(message.contains("expected 4 fields"));
            }
            other => panic!("Expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_bad_numbers() {
        assert!(matches!(
            parse_row("x,2,3.0,1", 1),
            Err(LogError::Parse { .. })
        ));
        assert!(matches!(
            parse_row("1,2,abc,1", 1),
            Err(LogError::Parse { .. })
        ));
        assert!(matches!(parse_row(HEADER, 1), Err(LogError::Parse { .. })));
    }

    #[test]
    fn test_parse_tolerates_crlf() {
        let record = parse_row("4,2,55.5,1\r\n", 1).unwrap();
        assert_eq!(record, LogRecord::new(4, 2, 55.5, 1));
    }
}
