//! CSV ingest and normalization.
//!
//! This module turns a production-history CSV into clean per-well
//! `(days, rates)` series that are safe to fit.
//!
//! Expected schema (header names are case-insensitive):
//! - `date` (YYYY-MM-DD) **or** `day` (numeric day offset) — required
//! - `rate` — required, non-negative (zeros allowed; the fitter drops them)
//! - `well` — optional; absent means a single anonymous well
//!
//! Design goals, in the same spirit as the rest of the tool:
//! - strict schema for required columns (clear errors, exit code 3)
//! - row-level validation (skip bad rows, but report what happened)
//! - no fitting logic here

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;

use crate::domain::RateSeries;
use crate::error::AppError;

/// Default name for series from files without a `well` column.
const DEFAULT_WELL: &str = "well";

/// A row-level problem encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: normalized per-well series plus row-level diagnostics.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub series: Vec<RateSeries>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
}

/// Load per-well rate series from a CSV file.
pub fn load_rate_series(path: &Path) -> Result<IngestedData, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open CSV '{}': {e}", path.display())))?;
    read_rate_series(file)
}

/// Read per-well rate series from any reader (testable without files).
pub fn read_rate_series<R: Read>(reader: R) -> Result<IngestedData, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AppError::input(format!("Failed to read CSV headers: {e}")))?
        .clone();
    let columns = resolve_columns(&headers)?;

    // Collect raw samples per well, then normalize each series.
    let mut order: Vec<String> = Vec::new();
    let mut samples: HashMap<String, Vec<Sample>> = HashMap::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;
    let mut rows_used = 0usize;

    for (idx, record) in reader.records().enumerate() {
        // Header is line 1; first record is line 2.
        let line = idx + 2;
        rows_read += 1;

        let record = match record {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("Unreadable row: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, &columns) {
            Ok((well, sample)) => {
                let well = well.unwrap_or_else(|| DEFAULT_WELL.to_string());
                if !samples.contains_key(&well) {
                    order.push(well.clone());
                }
                samples.entry(well).or_default().push(sample);
                rows_used += 1;
            }
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    let series = order
        .into_iter()
        .map(|well| {
            let rows = samples.remove(&well).unwrap_or_default();
            normalize_series(well, rows)
        })
        .collect();

    Ok(IngestedData {
        series,
        row_errors,
        rows_read,
        rows_used,
    })
}

/// Column indices resolved from the header row.
struct Columns {
    date: Option<usize>,
    day: Option<usize>,
    rate: usize,
    well: Option<usize>,
}

/// One validated sample before series assembly.
enum Sample {
    Dated { date: NaiveDate, rate: f64 },
    Offset { day: f64, rate: f64 },
}

fn resolve_columns(headers: &StringRecord) -> Result<Columns, AppError> {
    let find = |name: &str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
    };

    let date = find("date");
    let day = find("day");
    let rate = find("rate").ok_or_else(|| {
        AppError::input("CSV is missing the required 'rate' column.")
    })?;
    if date.is_none() && day.is_none() {
        return Err(AppError::input(
            "CSV needs a 'date' (YYYY-MM-DD) or 'day' (numeric) column.",
        ));
    }

    Ok(Columns {
        date,
        day,
        rate,
        well: find("well"),
    })
}

fn parse_row(record: &StringRecord, columns: &Columns) -> Result<(Option<String>, Sample), String> {
    let rate_raw = record
        .get(columns.rate)
        .ok_or_else(|| "Missing rate field.".to_string())?;
    let rate: f64 = rate_raw
        .parse()
        .map_err(|_| format!("Invalid rate '{rate_raw}'."))?;
    if !rate.is_finite() || rate < 0.0 {
        return Err(format!("Rate {rate} must be finite and non-negative."));
    }

    let well = columns
        .well
        .and_then(|i| record.get(i))
        .filter(|w| !w.is_empty())
        .map(str::to_string);

    // Prefer the calendar column when both are present.
    if let Some(i) = columns.date {
        if let Some(raw) = record.get(i).filter(|s| !s.is_empty()) {
            let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|_| format!("Invalid date '{raw}' (expected YYYY-MM-DD)."))?;
            return Ok((well, Sample::Dated { date, rate }));
        }
    }
    if let Some(i) = columns.day {
        if let Some(raw) = record.get(i).filter(|s| !s.is_empty()) {
            let day: f64 = raw.parse().map_err(|_| format!("Invalid day '{raw}'."))?;
            if !day.is_finite() {
                return Err(format!("Day {day} must be finite."));
            }
            return Ok((well, Sample::Offset { day, rate }));
        }
    }

    Err("Row has neither a date nor a day value.".to_string())
}

/// Sort samples in time and convert dates to day offsets from the first date.
fn normalize_series(well: String, rows: Vec<Sample>) -> RateSeries {
    let mut dated: Vec<(NaiveDate, f64)> = Vec::new();
    let mut offset: Vec<(f64, f64)> = Vec::new();
    for s in rows {
        match s {
            Sample::Dated { date, rate } => dated.push((date, rate)),
            Sample::Offset { day, rate } => offset.push((day, rate)),
        }
    }

    // A file normally uses one convention; when a well has both, the calendar
    // rows win (they carry the date anchor) and the offset rows are dropped.
    if !dated.is_empty() {
        dated.sort_by_key(|(d, _)| *d);
        let date0 = dated[0].0;
        let (days, rates) = dated
            .into_iter()
            .map(|(d, q)| ((d - date0).num_days() as f64, q))
            .unzip();
        RateSeries {
            well,
            date0: Some(date0),
            days,
            rates,
        }
    } else {
        offset.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        let (days, rates) = offset.into_iter().unzip();
        RateSeries {
            well,
            date0: None,
            days,
            rates,
        }
    }
}
