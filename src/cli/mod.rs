//! Command-line parsing for the decline-curve analysis tool.
//!
//! Argument parsing and command dispatch stay separate from the modeling and
//! math code.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::domain::DeclineMode;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "dca", version, about = "Arps decline-curve fitting and forecasting")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit decline curves to a production-history CSV and print diagnostics.
    Fit(FitArgs),
    /// Forecast from a previously exported model JSON (no refit).
    Forecast(ForecastArgs),
    /// Generate a synthetic production CSV for demos and testing.
    Sample(SampleArgs),
}

/// Options for fitting.
#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    /// Production history CSV (columns: date or day, rate, optional well).
    pub csv: PathBuf,

    /// Decline mode (exponential, hyperbolic, harmonic).
    #[arg(short = 'm', long, value_enum)]
    pub mode: Option<DeclineMode>,

    /// Decline exponent code in [0, 100] (0=exponential, 100=harmonic).
    #[arg(short = 'e', long)]
    pub exponent: Option<f64>,

    /// Start of the fit window (YYYY-MM-DD; dated series only).
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// End of the fit window (YYYY-MM-DD; dated series only).
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Forecast horizon in days past the last observation.
    #[arg(long, default_value_t = 365.0)]
    pub forecast_days: f64,

    /// Forecast sampling period in days.
    #[arg(long, default_value_t = 30.0)]
    pub step: f64,

    /// Export the forecast series to CSV.
    #[arg(long, value_name = "CSV")]
    pub export_forecast: Option<PathBuf>,

    /// Export the fitted model (single-well input) to JSON.
    #[arg(long, value_name = "JSON")]
    pub export_model: Option<PathBuf>,
}

/// Options for forecasting from a saved model.
#[derive(Debug, Parser)]
pub struct ForecastArgs {
    /// Model JSON produced by `dca fit --export-model`.
    pub model: PathBuf,

    /// First day offset of the forecast window.
    #[arg(long, default_value_t = 0.0)]
    pub from_day: f64,

    /// Length of the forecast window in days.
    #[arg(long, default_value_t = 365.0)]
    pub days: f64,

    /// Forecast sampling period in days.
    #[arg(long, default_value_t = 30.0)]
    pub step: f64,

    /// Export the forecast series to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,
}

/// Options for synthetic sample generation.
#[derive(Debug, Parser)]
pub struct SampleArgs {
    /// Decline mode (defaults to exponential when no exponent is given).
    #[arg(short = 'm', long, value_enum)]
    pub mode: Option<DeclineMode>,

    /// Decline exponent code in [0, 100].
    #[arg(short = 'e', long)]
    pub exponent: Option<f64>,

    /// Initial rate at the reference date.
    #[arg(long, default_value_t = 100.0)]
    pub rate0: f64,

    /// Initial decline per day.
    #[arg(long, default_value_t = 0.01)]
    pub decline0: f64,

    /// Reference date for the first observation.
    #[arg(long, default_value = "2024-01-01")]
    pub date0: NaiveDate,

    /// Number of observations.
    #[arg(short = 'n', long, default_value_t = 60)]
    pub count: usize,

    /// Days between observations.
    #[arg(long, default_value_t = 7.0)]
    pub step: f64,

    /// Relative measurement noise (stdev of the multiplicative factor).
    #[arg(long, default_value_t = 0.05)]
    pub noise: f64,

    /// Probability of a shut-in (zero-rate) observation.
    #[arg(long, default_value_t = 0.0)]
    pub shut_in_prob: f64,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Well name in the generated CSV.
    #[arg(long, default_value = "synthetic")]
    pub well: String,

    /// Output path (stdout when omitted).
    #[arg(short = 'o', long)]
    pub out: Option<PathBuf>,
}
