//! The fit pipeline: ingest, window, fit, forecast.
//!
//! Each well is an independent fit (no shared state), so the per-well work
//! runs in parallel via rayon.

use rayon::prelude::*;

use crate::domain::{CurveGrid, FitConfig, FitResult, RateSeries};
use crate::error::AppError;
use crate::fit::Fitter;
use crate::io::ingest::{self, IngestedData};
use crate::models;

/// Fit + forecast output for one well.
#[derive(Debug, Clone)]
pub struct WellFit {
    pub series: RateSeries,
    /// Number of observations inside the fit window (before zero filtering).
    pub fit_count: usize,
    pub result: FitResult,
    pub forecast: CurveGrid,
}

/// Output of a full fit run.
#[derive(Debug)]
pub struct FitRun {
    pub data: IngestedData,
    pub wells: Vec<WellFit>,
}

/// Run the full fit pipeline over a CSV of production history.
pub fn run_fit(config: &FitConfig) -> Result<FitRun, AppError> {
    // Mode/exponent validation happens before any I/O.
    let fitter = Fitter::new(config.mode, config.exponent)?;

    let data = ingest::load_rate_series(&config.csv_path)?;

    let wells: Vec<WellFit> = data
        .series
        .par_iter()
        .map(|series| fit_well(&fitter, series, config))
        .collect();

    Ok(FitRun { data, wells })
}

fn fit_well(fitter: &Fitter, series: &RateSeries, config: &FitConfig) -> WellFit {
    let (days, rates) = window_slice(series, config);
    let result = fitter.fit(&days, &rates, series.date0);

    // The forecast grid covers the observed span plus the requested horizon,
    // so plots show the fitted curve and its extension in one series.
    let last_day = series.days.last().copied().unwrap_or(0.0);
    let forecast = models::grid(
        &result.model,
        0.0,
        last_day + config.forecast_days,
        config.forecast_step,
    );

    WellFit {
        series: series.clone(),
        fit_count: days.len(),
        result,
        forecast,
    }
}

/// Restrict a series to the configured date window.
///
/// Windows are calendar dates; a series without a date anchor ignores them.
fn window_slice(series: &RateSeries, config: &FitConfig) -> (Vec<f64>, Vec<f64>) {
    let Some(date0) = series.date0 else {
        return (series.days.clone(), series.rates.clone());
    };

    let lo = config.start.map(|d| (d - date0).num_days() as f64);
    let hi = config.end.map(|d| (d - date0).num_days() as f64);

    series
        .days
        .iter()
        .zip(series.rates.iter())
        .filter(|&(&t, _)| lo.is_none_or(|lo| t >= lo) && hi.is_none_or(|hi| t <= hi))
        .map(|(&t, &q)| (t, q))
        .unzip()
}
