//! Formatted terminal output for fit runs and forecasts.

use crate::app::pipeline::{FitRun, WellFit};
use crate::domain::{CurveGrid, FitConfig};

/// Format the full run summary (dataset stats + per-well fits).
pub fn format_run_summary(run: &FitRun, config: &FitConfig) -> String {
    let mut out = String::new();

    out.push_str("=== dca - Arps Decline Curve Analysis ===\n");
    out.push_str(&format!("Input: {}\n", config.csv_path.display()));
    out.push_str(&format!(
        "Rows: read={} used={} skipped={}\n",
        run.data.rows_read,
        run.data.rows_used,
        run.data.row_errors.len()
    ));
    for err in run.data.row_errors.iter().take(5) {
        out.push_str(&format!("  (line {}) {}\n", err.line, err.message));
    }
    if run.data.row_errors.len() > 5 {
        out.push_str(&format!(
            "  ... and {} more row errors\n",
            run.data.row_errors.len() - 5
        ));
    }

    match (config.start, config.end) {
        (None, None) => {}
        (start, end) => out.push_str(&format!(
            "Fit window: {} .. {}\n",
            start.map(|d| d.to_string()).unwrap_or_else(|| "start".into()),
            end.map(|d| d.to_string()).unwrap_or_else(|| "end".into()),
        )),
    }

    for well in &run.wells {
        out.push('\n');
        out.push_str(&format_well(well));
    }

    out
}

fn format_well(well: &WellFit) -> String {
    let mut out = String::new();
    let model = &well.result.model;

    out.push_str(&format!(
        "Well {}: n={} (fit on {})\n",
        well.series.well,
        well.series.days.len(),
        well.fit_count
    ));
    out.push_str(&format!(
        "  mode: {} (exponent {})\n",
        model.mode().display_name(),
        model.exponent()
    ));

    if !model.is_fit() {
        out.push_str("  unfit: not enough usable observations in the window\n");
        return out;
    }

    out.push_str(&format!("  rate0    = {:.6} /day\n", model.rate0()));
    out.push_str(&format!("  decline0 = {:.6} /day\n", model.decline0()));
    if let Some(d0) = model.date0() {
        out.push_str(&format!("  date0    = {d0}\n"));
    }

    if let Some(reg) = &well.result.quality.regression {
        out.push_str(&format!(
            "  linear fit: slope={:.6e} intercept={:.6e} r={:.4} p={:.3e} stderr={:.3e}\n",
            reg.slope, reg.intercept, reg.r_value, reg.p_value, reg.stderr
        ));
    }
    if let Some(r2) = well.result.quality.r_squared {
        out.push_str(&format!("  nonlinear R^2 = {r2:.6}\n"));
    }

    out
}

/// Format a forecast grid as an aligned table.
pub fn format_forecast(well: &str, grid: &CurveGrid) -> String {
    let mut out = String::new();
    out.push_str(&format!("Forecast for {well}:\n"));

    let has_dates = grid.dates.is_some();
    if has_dates {
        out.push_str(&format!(
            "{:>10}  {:>10}  {:>14}  {:>14}\n",
            "day", "date", "rate", "cumulative"
        ));
    } else {
        out.push_str(&format!(
            "{:>10}  {:>14}  {:>14}\n",
            "day", "rate", "cumulative"
        ));
    }

    for (i, &day) in grid.days.iter().enumerate() {
        match grid.dates.as_ref().and_then(|d| d.get(i)) {
            Some(date) => out.push_str(&format!(
                "{day:>10.1}  {date:>10}  {:>14.4}  {:>14.2}\n",
                grid.rates[i], grid.cumulative[i]
            )),
            None => out.push_str(&format!(
                "{day:>10.1}  {:>14.4}  {:>14.2}\n",
                grid.rates[i], grid.cumulative[i]
            )),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DeclineMode, DeclineModel};
    use crate::models;

    #[test]
    fn forecast_table_lists_every_grid_row() {
        let model = DeclineModel::new(DeclineMode::Harmonic, 100.0, None, 50.0, 0.1).unwrap();
        let grid = models::grid(&model, 0.0, 30.0, 10.0);
        let text = format_forecast("w1", &grid);

        // Header + column line + 4 samples.
        assert_eq!(text.lines().count(), 6);
        assert!(text.contains("Forecast for w1"));
        assert!(text.contains("50.0000"));
    }
}
