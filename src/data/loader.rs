//! CSV loader for the Six Nations results table
//!
//! Validates the header once, then coerces every row into a typed
//! [`MatchRecord`]. Any bad cell aborts the load with the offending row and
//! column; nothing is silently coerced.

use crate::{Fixture, MatchRecord};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use csv::StringRecord;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

use super::MatchTable;

/// Columns the source table must provide
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "Date",
    "Year",
    "HomeTeam",
    "AwayTeam",
    "HomeScore",
    "AwayScore",
    "HomeBonus",
    "AwayBonus",
];

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d-%m-%Y"];
const DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%d-%m-%Y %H:%M:%S",
];

/// Errors raised while loading the source table
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column '{column}'")]
    MissingColumn { column: &'static str },

    #[error("row {row}: column '{column}' is empty")]
    EmptyField { row: usize, column: &'static str },

    #[error("row {row}: column '{column}' has value '{value}', expected {expected}")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("row {row}: Year {year} does not match Date {date}")]
    YearMismatch { row: usize, year: u16, date: NaiveDate },
}

/// Positions of the required columns within a header row
#[derive(Debug, Clone, Copy)]
struct ColumnIndex([usize; REQUIRED_COLUMNS.len()]);

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self, LoadError> {
        let mut positions = [0; REQUIRED_COLUMNS.len()];
        for (slot, column) in positions.iter_mut().zip(REQUIRED_COLUMNS) {
            *slot = headers
                .iter()
                .position(|h| h.trim() == column)
                .ok_or(LoadError::MissingColumn { column })?;
        }
        Ok(ColumnIndex(positions))
    }
}

/// A single data row being converted, with its 1-based row number
struct Row<'a> {
    number: usize,
    record: &'a StringRecord,
    columns: ColumnIndex,
}

impl Row<'_> {
    fn text(&self, field: usize) -> Result<&str, LoadError> {
        let column = REQUIRED_COLUMNS[field];
        let value = self
            .record
            .get(self.columns.0[field])
            .map(str::trim)
            .unwrap_or("");
        if value.is_empty() {
            return Err(LoadError::EmptyField {
                row: self.number,
                column,
            });
        }
        Ok(value)
    }

    fn count(&self, field: usize) -> Result<u16, LoadError> {
        let value = self.text(field)?;
        parse_count(value).ok_or_else(|| LoadError::InvalidValue {
            row: self.number,
            column: REQUIRED_COLUMNS[field],
            value: value.to_string(),
            expected: "a non-negative integer",
        })
    }

    fn date(&self, field: usize) -> Result<NaiveDate, LoadError> {
        let value = self.text(field)?;
        parse_date(value).ok_or_else(|| LoadError::InvalidValue {
            row: self.number,
            column: REQUIRED_COLUMNS[field],
            value: value.to_string(),
            expected: "a calendar date",
        })
    }

    fn to_record(&self) -> Result<MatchRecord, LoadError> {
        let date = self.date(0)?;
        let year = self.count(1)?;
        if date.year() != year as i32 {
            return Err(LoadError::YearMismatch {
                row: self.number,
                year,
                date,
            });
        }

        Ok(MatchRecord::new(Fixture {
            date,
            year,
            home_team: self.text(2)?.to_string(),
            away_team: self.text(3)?.to_string(),
            home_score: self.count(4)?,
            away_score: self.count(5)?,
            home_bonus: self.count(6)?,
            away_bonus: self.count(7)?,
        }))
    }
}

/// Parse a non-negative integer cell.
///
/// Accepts integral floats such as `"24.0"`, which spreadsheet exports tend to
/// produce, but rejects anything with a fractional part.
fn parse_count(value: &str) -> Option<u16> {
    if let Ok(n) = value.parse::<u16>() {
        return Some(n);
    }
    let f = value.parse::<f64>().ok()?;
    if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u16::MAX as f64 {
        Some(f as u16)
    } else {
        None
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Load the results table from any CSV reader
pub fn load_from_reader<R: Read>(rdr: R) -> Result<MatchTable, LoadError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(rdr);
    let columns = ColumnIndex::from_headers(reader.headers()?)?;

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        let row = Row {
            number: idx + 1,
            record: &record,
            columns,
        };
        records.push(row.to_record()?);
    }

    let table = MatchTable::new(records);
    match table.year_bounds() {
        Some((min, max)) => log::info!("Loaded {} matches ({}-{})", table.len(), min, max),
        None => log::warn!("Loaded an empty results table"),
    }
    Ok(table)
}

/// Load the results table from a CSV file on disk
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<MatchTable, LoadError> {
    let path = path.as_ref();
    log::debug!("Reading match data from {}", path.display());
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_from_reader(std::io::BufReader::new(file))
}
