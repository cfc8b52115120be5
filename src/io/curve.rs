//! Read/write saved-model JSON files.
//!
//! Curve JSON is the portable representation of a fitted decline model:
//! - mode, exponent, reference date, `rate0`, `decline0`
//! - fit diagnostics (regression quintuple + nonlinear R²)
//! - a precomputed `(day, rate, cumulative)` grid for quick plotting
//!
//! The schema is defined by `domain::CurveFile`. A saved model can be
//! reloaded and forecast without refitting (`dca forecast`).

use std::fs::File;
use std::path::Path;

use crate::domain::{CurveFile, FitResult};
use crate::error::AppError;
use crate::models;

/// Write a fitted model (plus a sampled grid) as JSON.
pub fn write_curve_json(
    path: &Path,
    well: &str,
    fit: &FitResult,
    grid_end_day: f64,
    grid_step: f64,
) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::input(format!(
            "Failed to create curve JSON '{}': {e}",
            path.display()
        ))
    })?;

    let curve = CurveFile {
        tool: "dca".to_string(),
        well: well.to_string(),
        model: fit.model.clone(),
        quality: fit.quality.clone(),
        grid: models::grid(&fit.model, 0.0, grid_end_day, grid_step),
    };

    serde_json::to_writer_pretty(file, &curve)
        .map_err(|e| AppError::input(format!("Failed to write curve JSON: {e}")))?;

    Ok(())
}

/// Read a saved curve JSON file.
pub fn read_curve_json(path: &Path) -> Result<CurveFile, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::input(format!(
            "Failed to open curve JSON '{}': {e}",
            path.display()
        ))
    })?;
    let curve: CurveFile = serde_json::from_reader(file)
        .map_err(|e| AppError::input(format!("Invalid curve JSON: {e}")))?;
    Ok(curve)
}
