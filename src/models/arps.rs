//! Rate and cumulative-volume evaluation for the Arps family.
//!
//! With `q0 = rate0`, `D0 = decline0`, `b = exponent/100`:
//!
//! | Mode             | Rate q(t)               | Cumulative Np(t)                            |
//! |------------------|-------------------------|---------------------------------------------|
//! | Exponential, b=0 | `q0·exp(-D0·t)`         | `q0/D0·(1 - exp(-D0·t))`                    |
//! | Hyperbolic, 0<b<1| `q0·(1+b·D0·t)^(-1/b)`  | `q0/((1-b)·D0)·(1 - (1+b·D0·t)^(1-1/b))`    |
//! | Harmonic, b=1    | `q0/(1+D0·t)`           | `q0/D0·ln(1+D0·t)`                          |
//!
//! Numerical policy:
//! - `D0 = 0` degenerates every mode to constant rate `q0` and linear
//!   cumulative `q0·t`; special-cased to avoid division by zero.
//! - `t < 0` is evaluated as-is (backward extrapolation is the caller's call).
//! - Undefined expressions (e.g. a negative base under a fractional power)
//!   yield NaN, which propagates instead of panicking. Interactive callers
//!   rely on this.

use chrono::Duration;

use crate::domain::{CurveGrid, DeclineMode, DeclineModel};

/// Evaluate the model rate at `t` days past the reference date.
pub fn rate(model: &DeclineModel, t: f64) -> f64 {
    let q0 = model.rate0();
    let d0 = model.decline0();

    if d0 == 0.0 {
        return q0;
    }

    match model.mode() {
        DeclineMode::Exponential => q0 * (-d0 * t).exp(),
        DeclineMode::Hyperbolic => {
            let b = model.shape_factor();
            q0 * (1.0 + b * d0 * t).powf(-1.0 / b)
        }
        DeclineMode::Harmonic => q0 / (1.0 + d0 * t),
    }
}

/// Evaluate the model rate over a grid of day offsets.
pub fn rates(model: &DeclineModel, days: &[f64]) -> Vec<f64> {
    days.iter().map(|&t| rate(model, t)).collect()
}

/// Evaluate the cumulative produced volume at `t` days past the reference date.
pub fn cumulative(model: &DeclineModel, t: f64) -> f64 {
    let q0 = model.rate0();
    let d0 = model.decline0();

    if d0 == 0.0 {
        return q0 * t;
    }

    match model.mode() {
        DeclineMode::Exponential => q0 / d0 * (1.0 - (-d0 * t).exp()),
        DeclineMode::Hyperbolic => {
            let b = model.shape_factor();
            q0 / ((1.0 - b) * d0) * (1.0 - (1.0 + b * d0 * t).powf(1.0 - 1.0 / b))
        }
        DeclineMode::Harmonic => q0 / d0 * (1.0 + d0 * t).ln(),
    }
}

/// Evaluate the cumulative volume over a grid of day offsets.
pub fn cumulatives(model: &DeclineModel, days: &[f64]) -> Vec<f64> {
    days.iter().map(|&t| cumulative(model, t)).collect()
}

/// Sample the model over `[start_day, end_day]` with the given period.
///
/// The end point is always included so forecasts cover the full requested
/// window. Calendar dates are attached when the model is date-anchored;
/// fractional day offsets are rounded to the nearest whole day for the
/// calendar column only.
pub fn grid(model: &DeclineModel, start_day: f64, end_day: f64, step: f64) -> CurveGrid {
    let step = if step.is_finite() && step > 0.0 { step } else { 1.0 };
    let mut days = Vec::new();
    let mut t = start_day;
    while t < end_day {
        days.push(t);
        t += step;
    }
    days.push(end_day);

    let dates = model.date0().map(|d0| {
        days.iter()
            .map(|&t| d0 + Duration::days(t.round() as i64))
            .collect()
    });

    CurveGrid {
        rates: rates(model, &days),
        cumulative: cumulatives(model, &days),
        days,
        dates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DeclineMode;

    fn model(mode: DeclineMode, exponent: f64, rate0: f64, decline0: f64) -> DeclineModel {
        DeclineModel::new(mode, exponent, None, rate0, decline0).unwrap()
    }

    #[test]
    fn exponential_rate_matches_closed_form() {
        let m = model(DeclineMode::Exponential, 0.0, 100.0, 0.05);
        let expected = [100.0, 60.653065971, 36.787944117, 22.313016014, 13.533528324];
        for (t, want) in [0.0, 10.0, 20.0, 30.0, 40.0].into_iter().zip(expected) {
            assert!((rate(&m, t) - want).abs() < 1e-8, "t={t}");
        }
    }

    #[test]
    fn harmonic_rate_matches_closed_form() {
        let m = model(DeclineMode::Harmonic, 100.0, 50.0, 0.1);
        assert!((rate(&m, 0.0) - 50.0).abs() < 1e-12);
        assert!((rate(&m, 10.0) - 25.0).abs() < 1e-12);
        assert!((rate(&m, 20.0) - 50.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn hyperbolic_rate_matches_closed_form() {
        // b = 0.5: q(t) = q0 (1 + 0.5 D0 t)^-2
        let m = model(DeclineMode::Hyperbolic, 50.0, 80.0, 0.02);
        let t: f64 = 100.0;
        let want = 80.0 * (1.0 + 0.5 * 0.02 * t).powi(-2);
        assert!((rate(&m, t) - want).abs() < 1e-10);
    }

    #[test]
    fn zero_decline_degenerates_to_constant_rate() {
        for (mode, e) in [
            (DeclineMode::Exponential, 0.0),
            (DeclineMode::Hyperbolic, 40.0),
            (DeclineMode::Harmonic, 100.0),
        ] {
            let m = model(mode, e, 75.0, 0.0);
            for t in [0.0, 1.0, 365.0, 10_000.0] {
                assert_eq!(rate(&m, t), 75.0, "{mode:?} t={t}");
                assert!((cumulative(&m, t) - 75.0 * t).abs() < 1e-9, "{mode:?} t={t}");
            }
        }
    }

    #[test]
    fn positive_decline_is_non_increasing() {
        for (mode, e) in [
            (DeclineMode::Exponential, 0.0),
            (DeclineMode::Hyperbolic, 30.0),
            (DeclineMode::Hyperbolic, 70.0),
            (DeclineMode::Harmonic, 100.0),
        ] {
            let m = model(mode, e, 120.0, 0.03);
            let mut prev = rate(&m, 0.0);
            for i in 1..=200 {
                let t = i as f64 * 5.0;
                let q = rate(&m, t);
                assert!(q <= prev + 1e-12, "{mode:?} increased at t={t}");
                prev = q;
            }
        }
    }

    #[test]
    fn cumulative_is_zero_at_origin_and_grows() {
        for (mode, e) in [
            (DeclineMode::Exponential, 0.0),
            (DeclineMode::Hyperbolic, 50.0),
            (DeclineMode::Harmonic, 100.0),
        ] {
            let m = model(mode, e, 100.0, 0.01);
            assert!(cumulative(&m, 0.0).abs() < 1e-12);
            assert!(cumulative(&m, 100.0) > cumulative(&m, 10.0));
        }
    }

    #[test]
    fn exponential_cumulative_approaches_reserves_limit() {
        // Np(∞) = q0 / D0 for exponential decline.
        let m = model(DeclineMode::Exponential, 0.0, 100.0, 0.05);
        let np = cumulative(&m, 1e6);
        assert!((np - 100.0 / 0.05).abs() < 1e-6);
    }

    #[test]
    fn undefined_expressions_yield_nan_not_panic() {
        // A negative decline pushes the hyperbolic base negative for large t;
        // the fractional power is then undefined and must come back NaN.
        let m = model(DeclineMode::Hyperbolic, 40.0, 100.0, -0.01);
        let q = rate(&m, 1000.0);
        assert!(q.is_nan());
    }

    #[test]
    fn slice_forms_match_scalar_forms() {
        let m = model(DeclineMode::Harmonic, 100.0, 40.0, 0.02);
        let days = [0.0, 5.0, 50.0];
        let qs = rates(&m, &days);
        let nps = cumulatives(&m, &days);
        for (i, &t) in days.iter().enumerate() {
            assert_eq!(qs[i], rate(&m, t));
            assert_eq!(nps[i], cumulative(&m, t));
        }
    }

    #[test]
    fn grid_includes_endpoint_and_calendar_dates() {
        let date0 = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let m = DeclineModel::new(DeclineMode::Exponential, 0.0, Some(date0), 100.0, 0.05).unwrap();

        let g = grid(&m, 0.0, 25.0, 10.0);
        assert_eq!(g.days, vec![0.0, 10.0, 20.0, 25.0]);
        assert_eq!(g.rates.len(), 4);
        assert_eq!(g.cumulative.len(), 4);

        let dates = g.dates.unwrap();
        assert_eq!(dates[0], date0);
        assert_eq!(dates[1], chrono::NaiveDate::from_ymd_opt(2024, 1, 11).unwrap());
        assert_eq!(dates[3], chrono::NaiveDate::from_ymd_opt(2024, 1, 26).unwrap());
    }

    #[test]
    fn unfit_model_evaluates_to_zero_curve() {
        let m = DeclineModel::new(DeclineMode::Exponential, 0.0, None, 0.0, 0.0).unwrap();
        assert_eq!(rate(&m, 10.0), 0.0);
        assert_eq!(cumulative(&m, 10.0), 0.0);
    }
}
