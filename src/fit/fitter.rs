//! Inverse solution of Arps decline parameters from observed data.
//!
//! Every mode is linear in its natural transform:
//!
//! | Mode        | Transform y          | rate0               | decline0              |
//! |-------------|----------------------|---------------------|-----------------------|
//! | Exponential | `ln(rate)`           | `exp(intercept)`    | `-slope`              |
//! | Hyperbolic  | `(1/rate)^b`         | `intercept^(-1/b)`  | `slope/intercept/b`   |
//! | Harmonic    | `1/rate`             | `intercept^(-1)`    | `slope/intercept`     |
//!
//! so a single OLS regression of the transformed rate against days replaces an
//! iterative nonlinear solver. This is deterministic (no initial guess, no
//! divergence) at the cost of minimizing error in transformed space; the
//! nonlinear R² attached to the result reports fit quality in the original
//! rate domain.
//!
//! Failure policy: degenerate data (fewer than two nonzero rates, non-finite
//! transforms, a zero intercept) yields the *unfit sentinel* — a model with
//! `rate0 = 0`, `decline0 = 0`, and empty diagnostics — never an error.
//! Decline fitting runs interactively on sparse partial series; it must not
//! take down the session.

use chrono::NaiveDate;

use crate::domain::{
    DeclineMode, DeclineModel, FitQuality, FitResult, RegressionSummary, resolve_option,
};
use crate::error::AppError;
use crate::fit::score;
use crate::math::linear_regression;

/// A fitting engine for one validated (mode, exponent) selection.
#[derive(Debug, Clone, Copy)]
pub struct Fitter {
    mode: DeclineMode,
    exponent: f64,
}

impl Fitter {
    /// Build a fitter from a mode and/or exponent selection.
    ///
    /// Fails with a usage error when the pair is absent, contradictory, or out
    /// of range; this is the only error path in the engine.
    pub fn new(mode: Option<DeclineMode>, exponent: Option<f64>) -> Result<Self, AppError> {
        let (mode, exponent) = resolve_option(mode, exponent)?;
        Ok(Self { mode, exponent })
    }

    pub fn mode(&self) -> DeclineMode {
        self.mode
    }

    pub fn exponent(&self) -> f64 {
        self.exponent
    }

    /// Fit a decline model to an observed `(days, rates)` series.
    ///
    /// Zero-rate samples are dropped before regression (every linearization
    /// divides by or takes a logarithm of the rate). Degenerate data yields
    /// the unfit sentinel, never an error.
    pub fn fit(&self, days: &[f64], rates: &[f64], date0: Option<NaiveDate>) -> FitResult {
        let (xs, qs) = filter_nonzero(days, rates);

        let Some((regression, rate0, decline0)) = self.solve(&xs, &qs) else {
            return FitResult {
                model: DeclineModel::unfit(self.mode, self.exponent, date0),
                quality: FitQuality::default(),
            };
        };

        let model = DeclineModel::fitted(self.mode, self.exponent, date0, rate0, decline0);
        let r_squared = score::r_squared(&model, &xs, &qs);

        FitResult {
            model,
            quality: FitQuality {
                regression: Some(regression),
                r_squared: Some(r_squared),
            },
        }
    }

    /// Linearize, regress, and back-transform. `None` means "unfit".
    fn solve(&self, days: &[f64], rates: &[f64]) -> Option<(RegressionSummary, f64, f64)> {
        if days.len() < 2 {
            return None;
        }

        let b = self.exponent / 100.0;
        let transformed: Vec<f64> = match self.mode {
            DeclineMode::Exponential => rates.iter().map(|q| q.ln()).collect(),
            DeclineMode::Hyperbolic => rates.iter().map(|q| (1.0 / q).powf(b)).collect(),
            DeclineMode::Harmonic => rates.iter().map(|q| 1.0 / q).collect(),
        };

        // Non-finite transforms (negative rates and the like) make the
        // regression itself bail out.
        let regression = linear_regression(days, &transformed)?;

        let (rate0, decline0) = match self.mode {
            DeclineMode::Exponential => (regression.intercept.exp(), -regression.slope),
            DeclineMode::Hyperbolic => (
                regression.intercept.powf(-1.0 / b),
                regression.slope / regression.intercept / b,
            ),
            DeclineMode::Harmonic => (
                regression.intercept.recip(),
                regression.slope / regression.intercept,
            ),
        };

        // A zero intercept makes the back-transform blow up; treat as unfit.
        if !rate0.is_finite() || rate0 == 0.0 || !decline0.is_finite() {
            return None;
        }

        Some((regression, rate0, decline0))
    }
}

/// Drop samples whose rate is exactly zero.
fn filter_nonzero(days: &[f64], rates: &[f64]) -> (Vec<f64>, Vec<f64>) {
    days.iter()
        .zip(rates.iter())
        .filter(|&(_, &q)| q != 0.0)
        .map(|(&t, &q)| (t, q))
        .unzip()
}
