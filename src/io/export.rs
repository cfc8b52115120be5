//! Export forecast series to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream
//! scripts: one row per forecast sample, wells stacked vertically.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::CurveGrid;
use crate::error::AppError;

/// Write forecast grids (one per well) to a CSV file.
pub fn write_forecast_csv(path: &Path, forecasts: &[(String, CurveGrid)]) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::input(format!(
            "Failed to create forecast CSV '{}': {e}",
            path.display()
        ))
    })?;
    write_forecast(file, forecasts)
}

fn write_forecast<W: Write>(mut out: W, forecasts: &[(String, CurveGrid)]) -> Result<(), AppError> {
    writeln!(out, "well,day,date,rate,cumulative")
        .map_err(|e| AppError::input(format!("Failed to write forecast CSV header: {e}")))?;

    for (well, grid) in forecasts {
        for (i, &day) in grid.days.iter().enumerate() {
            let date = grid
                .dates
                .as_ref()
                .and_then(|d| d.get(i))
                .map(|d| d.to_string())
                .unwrap_or_default();
            writeln!(
                out,
                "{well},{day:.1},{date},{:.6},{:.6}",
                grid.rates[i], grid.cumulative[i]
            )
            .map_err(|e| AppError::input(format!("Failed to write forecast CSV row: {e}")))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn writes_expected_rows() {
        let date0 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let grid = CurveGrid {
            days: vec![0.0, 10.0],
            dates: Some(vec![date0, date0 + chrono::Days::new(10)]),
            rates: vec![100.0, 60.653066],
            cumulative: vec![0.0, 786.938681],
        };

        let mut buf = Vec::new();
        write_forecast(&mut buf, &[("w1".to_string(), grid)]).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "well,day,date,rate,cumulative");
        assert!(lines[1].starts_with("w1,0.0,2024-01-01,100.000000"));
        assert!(lines[2].starts_with("w1,10.0,2024-01-11,60.653066"));
    }

    #[test]
    fn dateless_grid_leaves_date_column_empty() {
        let grid = CurveGrid {
            days: vec![0.0],
            dates: None,
            rates: vec![50.0],
            cumulative: vec![0.0],
        };
        let mut buf = Vec::new();
        write_forecast(&mut buf, &[("w".to_string(), grid)]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.lines().nth(1).unwrap().starts_with("w,0.0,,50.000000"));
    }
}
