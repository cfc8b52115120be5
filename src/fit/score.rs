//! Nonlinear goodness-of-fit scoring.
//!
//! The regression in `fitter` minimizes error in *transformed* space. This
//! module reports the coefficient of determination in the original rate
//! domain, so the two diagnostics together show both where the fit was solved
//! and how well it explains the actual data.

use crate::domain::DeclineModel;
use crate::models;

/// Coefficient of determination `R² = 1 - SSres/SStot` of the model against
/// observed rates.
///
/// NaN-aware: any pair with a non-finite observation or prediction is skipped
/// (not zeroed). A constant observed series has `SStot = 0`, which makes R²
/// undefined; NaN is returned rather than dividing by zero.
pub fn r_squared(model: &DeclineModel, days: &[f64], rates: &[f64]) -> f64 {
    let finite: Vec<f64> = rates.iter().copied().filter(|q| q.is_finite()).collect();
    if finite.is_empty() {
        return f64::NAN;
    }
    let mean = finite.iter().sum::<f64>() / finite.len() as f64;

    let mut ss_res = 0.0;
    let mut ss_tot = 0.0;
    for (&t, &q) in days.iter().zip(rates.iter()) {
        if !q.is_finite() {
            continue;
        }
        ss_tot += (q - mean) * (q - mean);

        let predicted = models::rate(model, t);
        if predicted.is_finite() {
            ss_res += (q - predicted) * (q - predicted);
        }
    }

    if ss_tot == 0.0 {
        return f64::NAN;
    }
    1.0 - ss_res / ss_tot
}
