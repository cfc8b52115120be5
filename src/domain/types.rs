//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during fitting and forecasting
//! - exported to JSON/CSV
//! - reloaded later for forecasting without refitting

use std::path::PathBuf;
use std::str::FromStr;

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Exponent code for a pure exponential decline.
pub const EXPONENT_EXPONENTIAL: f64 = 0.0;

/// Exponent code for a pure harmonic decline.
pub const EXPONENT_HARMONIC: f64 = 100.0;

/// Arps decline mode.
///
/// The mode is tied to the exponent code `e ∈ [0, 100]`:
///
/// - `e = 0` — exponential
/// - `0 < e < 100` — hyperbolic with shape factor `b = e/100`
/// - `e = 100` — harmonic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DeclineMode {
    Exponential,
    Hyperbolic,
    Harmonic,
}

impl DeclineMode {
    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            DeclineMode::Exponential => "Exponential",
            DeclineMode::Hyperbolic => "Hyperbolic",
            DeclineMode::Harmonic => "Harmonic",
        }
    }

    /// Map an exponent code to its mode.
    pub fn from_exponent(exponent: f64) -> Result<Self, AppError> {
        if exponent == EXPONENT_EXPONENTIAL {
            Ok(DeclineMode::Exponential)
        } else if exponent == EXPONENT_HARMONIC {
            Ok(DeclineMode::Harmonic)
        } else if exponent > EXPONENT_EXPONENTIAL && exponent < EXPONENT_HARMONIC {
            Ok(DeclineMode::Hyperbolic)
        } else {
            Err(AppError::invalid_option(format!(
                "Exponent {exponent} is outside the valid range [0, 100]."
            )))
        }
    }

    /// The exponent code implied by the mode alone.
    ///
    /// Hyperbolic has no canonical exponent; the caller must supply one.
    pub fn canonical_exponent(self) -> Option<f64> {
        match self {
            DeclineMode::Exponential => Some(EXPONENT_EXPONENTIAL),
            DeclineMode::Harmonic => Some(EXPONENT_HARMONIC),
            DeclineMode::Hyperbolic => None,
        }
    }
}

impl FromStr for DeclineMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "exponential" => Ok(DeclineMode::Exponential),
            "hyperbolic" => Ok(DeclineMode::Hyperbolic),
            "harmonic" => Ok(DeclineMode::Harmonic),
            other => Err(AppError::invalid_option(format!(
                "Unknown decline mode '{other}' (expected exponential, hyperbolic, or harmonic)."
            ))),
        }
    }
}

/// Resolve a (mode, exponent) selection into a validated pair.
///
/// Exactly one of the two must be supplied, or both must be supplied and
/// mutually consistent. Hyperbolic selected by name requires an explicit
/// exponent in `(0, 100)` since there is no canonical default.
pub fn resolve_option(
    mode: Option<DeclineMode>,
    exponent: Option<f64>,
) -> Result<(DeclineMode, f64), AppError> {
    match (mode, exponent) {
        (None, None) => Err(AppError::invalid_option(
            "Either a decline mode or an exponent must be supplied.",
        )),
        (None, Some(e)) => Ok((DeclineMode::from_exponent(e)?, e)),
        (Some(m), None) => match m.canonical_exponent() {
            Some(e) => Ok((m, e)),
            None => Err(AppError::invalid_option(
                "Hyperbolic mode requires an explicit exponent in (0, 100).",
            )),
        },
        (Some(m), Some(e)) => {
            let implied = DeclineMode::from_exponent(e)?;
            if implied == m {
                Ok((m, e))
            } else {
                Err(AppError::invalid_option(format!(
                    "Mode {} is inconsistent with exponent {e} (which implies {}).",
                    m.display_name(),
                    implied.display_name()
                )))
            }
        }
    }
}

/// A fitted (or user-supplied) Arps decline model.
///
/// Parameters are immutable after construction; fit diagnostics live in the
/// separately-owned [`FitQuality`] record so that models built directly from
/// user input and models produced by the fitter share one type.
///
/// `rate0 == 0` is the "unfit" sentinel: the fitter returns it when the
/// regression is degenerate, and forward evaluation of such a model yields an
/// identically-zero curve rather than an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeclineModel {
    mode: DeclineMode,
    exponent: f64,
    date0: Option<NaiveDate>,
    rate0: f64,
    decline0: f64,
}

impl DeclineModel {
    /// Construct a model from explicit parameters.
    ///
    /// Fails if the mode/exponent pair is inconsistent (see [`resolve_option`]).
    pub fn new(
        mode: DeclineMode,
        exponent: f64,
        date0: Option<NaiveDate>,
        rate0: f64,
        decline0: f64,
    ) -> Result<Self, AppError> {
        let (mode, exponent) = resolve_option(Some(mode), Some(exponent))?;
        Ok(Self {
            mode,
            exponent,
            date0,
            rate0,
            decline0,
        })
    }

    /// Construct from an already-validated (mode, exponent) pair (fit path).
    pub(crate) fn fitted(
        mode: DeclineMode,
        exponent: f64,
        date0: Option<NaiveDate>,
        rate0: f64,
        decline0: f64,
    ) -> Self {
        Self {
            mode,
            exponent,
            date0,
            rate0,
            decline0,
        }
    }

    /// The unfit sentinel for an already-validated (mode, exponent) pair.
    pub(crate) fn unfit(mode: DeclineMode, exponent: f64, date0: Option<NaiveDate>) -> Self {
        Self {
            mode,
            exponent,
            date0,
            rate0: 0.0,
            decline0: 0.0,
        }
    }

    pub fn mode(&self) -> DeclineMode {
        self.mode
    }

    /// Exponent code in `[0, 100]`.
    pub fn exponent(&self) -> f64 {
        self.exponent
    }

    /// Arps shape factor `b = exponent / 100`.
    pub fn shape_factor(&self) -> f64 {
        self.exponent / 100.0
    }

    /// Reference date at which `rate0` applies, if time is calendar-anchored.
    pub fn date0(&self) -> Option<NaiveDate> {
        self.date0
    }

    /// Initial rate at the reference date.
    pub fn rate0(&self) -> f64 {
        self.rate0
    }

    /// Initial decline per day (positive means declining).
    pub fn decline0(&self) -> f64 {
        self.decline0
    }

    /// Whether the model carries a usable fit (`rate0` finite and nonzero).
    pub fn is_fit(&self) -> bool {
        self.rate0.is_finite() && self.rate0 != 0.0
    }
}

/// The OLS quintuple from the linear-space regression, kept verbatim as a
/// diagnostic.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RegressionSummary {
    pub slope: f64,
    pub intercept: f64,
    /// Pearson correlation coefficient of the transformed fit.
    pub r_value: f64,
    /// Two-sided p-value for a slope-is-zero null hypothesis.
    pub p_value: f64,
    /// Standard error of the slope estimate.
    pub stderr: f64,
}

/// Fit diagnostics, populated only by the fit path.
///
/// `regression` describes the fit in *transformed* (linearized) space;
/// `r_squared` is the coefficient of determination in the original rate
/// domain. Both are absent on the unfit sentinel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FitQuality {
    pub regression: Option<RegressionSummary>,
    pub r_squared: Option<f64>,
}

/// Fit output for a single series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitResult {
    pub model: DeclineModel,
    pub quality: FitQuality,
}

/// An observed production series for one well.
///
/// `days` are offsets (in days) from `date0` when calendar-anchored, or raw
/// day values otherwise; they are non-decreasing. `rates` are non-negative
/// and may contain zeros (the fitter filters those).
#[derive(Debug, Clone)]
pub struct RateSeries {
    pub well: String,
    pub date0: Option<NaiveDate>,
    pub days: Vec<f64>,
    pub rates: Vec<f64>,
}

/// An evaluated curve over a time grid (forecast or fitted-curve samples).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveGrid {
    pub days: Vec<f64>,
    /// Calendar dates for each grid day, when the model is date-anchored.
    pub dates: Option<Vec<NaiveDate>>,
    pub rates: Vec<f64>,
    pub cumulative: Vec<f64>,
}

/// A saved curve file (JSON): the portable representation of a fitted model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveFile {
    pub tool: String,
    pub well: String,
    pub model: DeclineModel,
    pub quality: FitQuality,
    pub grid: CurveGrid,
}

/// A full fit run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct FitConfig {
    pub csv_path: PathBuf,
    pub mode: Option<DeclineMode>,
    pub exponent: Option<f64>,

    /// Optional fit window: observations before `start` / after `end` are
    /// excluded from the regression (but still shown in dataset stats).
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,

    /// Forecast horizon in days past the last observation.
    pub forecast_days: f64,
    /// Forecast sampling period in days.
    pub forecast_step: f64,

    pub export_forecast: Option<PathBuf>,
    pub export_model: Option<PathBuf>,
}
