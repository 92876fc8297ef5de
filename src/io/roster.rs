//! Roster CSV ingest and normalization.
//!
//! Class lists come from spreadsheets in the wild: `;` or `,` separated,
//! with or without a header row, points with decimal commas, names wrapped
//! in quotes. This module turns that into a clean `StudentRecord` list.
//!
//! Design goals:
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Deterministic behavior** (the separator is sniffed once per file,
//!   not per line, so a stray comma in a name cannot flip the format
//!   mid-file)
//! - **Separation of concerns**: no grading logic here

use std::fs;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::domain::StudentRecord;
use crate::error::AppError;

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: validated students + row errors + counts.
#[derive(Debug, Clone)]
pub struct IngestedRoster {
    pub students: Vec<StudentRecord>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
}

/// Load and validate a roster CSV.
///
/// `max_points` is the inclusive upper bound for the points column; rows
/// outside `[0, max_points]` are reported and skipped. An empty roster after
/// validation is fatal.
pub fn load_roster(path: &Path, max_points: f64) -> Result<IngestedRoster, AppError> {
    let text = fs::read_to_string(path).map_err(|e| {
        AppError::new(2, format!("Failed to read roster '{}': {e}", path.display()))
    })?;

    let roster = parse_roster(&text, max_points)?;
    if roster.students.is_empty() {
        return Err(AppError::new(
            3,
            format!(
                "No valid students in '{}' ({} row error(s)).",
                path.display(),
                roster.row_errors.len()
            ),
        ));
    }

    Ok(roster)
}

/// Parse roster CSV text. Split out from `load_roster` so tests and the
/// import preview can run on in-memory strings.
pub fn parse_roster(text: &str, max_points: f64) -> Result<IngestedRoster, AppError> {
    let delimiter = sniff_delimiter(text);

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let mut students = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;
    let mut saw_header = false;

    for (idx, result) in reader.records().enumerate() {
        let line = idx + 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                rows_read += 1;
                continue;
            }
        };

        if record_is_empty(&record) {
            continue;
        }

        // The header row is optional; recognize it by its column names.
        if idx == 0 && record_is_header(&record) {
            saw_header = true;
            continue;
        }

        rows_read += 1;

        match parse_row(&record, max_points) {
            Ok((name, points)) => students.push(StudentRecord {
                id: students.len() + 1,
                name,
                points,
            }),
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    if rows_read == 0 && !saw_header {
        return Err(AppError::new(2, "Roster is empty."));
    }

    let rows_used = students.len();
    Ok(IngestedRoster {
        students,
        row_errors,
        rows_read,
        rows_used,
    })
}

/// Pick the field separator from the first non-empty line: `;` wins when
/// present (the common spreadsheet export in decimal-comma locales),
/// otherwise `,`.
fn sniff_delimiter(text: &str) -> u8 {
    let first = text.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
    if first.contains(';') { b';' } else { b',' }
}

fn record_is_empty(record: &StringRecord) -> bool {
    record.iter().all(|f| f.trim().is_empty())
}

fn record_is_header(record: &StringRecord) -> bool {
    record.iter().any(|f| {
        let f = f.to_ascii_lowercase();
        f.contains("name") || f.contains("punkte")
    })
}

fn parse_row(record: &StringRecord, max_points: f64) -> Result<(String, f64), String> {
    if record.len() < 2 {
        return Err("Expected at least two columns (name, points).".to_string());
    }

    let name = strip_quotes(record.get(0).unwrap_or("")).to_string();
    if name.is_empty() {
        return Err("Missing name.".to_string());
    }

    let raw_points = strip_quotes(record.get(1).unwrap_or(""));
    let points = parse_points(raw_points)
        .ok_or_else(|| format!("'{raw_points}' is not a valid number."))?;

    if points < 0.0 || points > max_points {
        return Err(format!("Points ({points}) outside 0-{max_points}."));
    }

    Ok((name, points))
}

/// Parse a points value, normalizing a decimal comma to a decimal point.
fn parse_points(s: &str) -> Option<f64> {
    let normalized = s.replace(',', ".");
    let v = normalized.trim().parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

/// The csv crate unwraps double quotes; spreadsheet exports occasionally
/// wrap fields in single quotes as well.
fn strip_quotes(s: &str) -> &str {
    s.trim().trim_matches('\'').trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_semicolon_roster_with_header() {
        let text = "Name;Punkte\nMuster Max;85\nBeispiel Anna;72,5\n";
        let roster = parse_roster(text, 100.0).unwrap();
        assert_eq!(roster.students.len(), 2);
        assert_eq!(roster.students[0].name, "Muster Max");
        assert!((roster.students[0].points - 85.0).abs() < 1e-12);
        // Decimal comma normalized.
        assert!((roster.students[1].points - 72.5).abs() < 1e-12);
        assert_eq!(roster.students[1].id, 2);
        assert!(roster.row_errors.is_empty());
    }

    #[test]
    fn parses_comma_roster_without_header() {
        let text = "Muster Max,85\nBeispiel Anna,72\n";
        let roster = parse_roster(text, 100.0).unwrap();
        assert_eq!(roster.students.len(), 2);
        assert_eq!(roster.rows_read, 2);
        assert_eq!(roster.rows_used, 2);
    }

    #[test]
    fn strips_single_quotes() {
        let text = "'Muster Max';'85'\n";
        let roster = parse_roster(text, 100.0).unwrap();
        assert_eq!(roster.students[0].name, "Muster Max");
        assert!((roster.students[0].points - 85.0).abs() < 1e-12);
    }

    #[test]
    fn reports_bad_rows_with_line_numbers() {
        let text = "Name;Punkte\n;85\nMuster Max;abc\nBeispiel Anna;120\nOk Olga;55\n";
        let roster = parse_roster(text, 100.0).unwrap();
        assert_eq!(roster.students.len(), 1);
        assert_eq!(roster.students[0].name, "Ok Olga");
        assert_eq!(roster.row_errors.len(), 3);
        assert_eq!(roster.row_errors[0].line, 2);
        assert!(roster.row_errors[1].message.contains("abc"));
        assert!(roster.row_errors[2].message.contains("120"));
    }

    #[test]
    fn rejects_empty_input() {
        assert!(parse_roster("", 100.0).is_err());
        assert!(parse_roster("\n\n", 100.0).is_err());
    }

    #[test]
    fn header_only_is_not_an_error_at_parse_level() {
        // `load_roster` turns the empty result into a fatal error; the parse
        // layer just reports zero students.
        let roster = parse_roster("Name;Punkte\n", 100.0).unwrap();
        assert!(roster.students.is_empty());
    }
}
