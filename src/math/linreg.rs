//! Simple linear regression `y = intercept + slope·x`.
//!
//! The fitter linearizes each decline mode into exactly this problem, so one
//! two-column OLS solve covers every mode. Alongside the coefficients we
//! report the standard diagnostic quintuple (slope, intercept, correlation,
//! two-sided p-value, slope standard error).
//!
//! Implementation choices:
//! - Coefficients come from an SVD least-squares solve of the `[1, x]` design
//!   matrix. SVD handles the tall, possibly near-collinear system robustly
//!   (days can be tightly clustered for short fit windows).
//! - The p-value is the two-sided slope-is-zero t-test with `n - 2` degrees
//!   of freedom (Student's t from `statrs`).

use nalgebra::{DMatrix, DVector};
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::domain::RegressionSummary;

/// Fit `y = intercept + slope·x` by ordinary least squares.
///
/// Returns `None` when the problem is degenerate: fewer than two points,
/// mismatched lengths, any non-finite input, or zero variance in `x`.
pub fn linear_regression(x: &[f64], y: &[f64]) -> Option<RegressionSummary> {
    let n = x.len();
    if n < 2 || y.len() != n {
        return None;
    }
    if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
        return None;
    }

    let x_mean = x.iter().sum::<f64>() / n as f64;
    let y_mean = y.iter().sum::<f64>() / n as f64;

    let mut ssxm = 0.0;
    let mut ssym = 0.0;
    let mut ssxym = 0.0;
    for (&xi, &yi) in x.iter().zip(y.iter()) {
        let dx = xi - x_mean;
        let dy = yi - y_mean;
        ssxm += dx * dx;
        ssym += dy * dy;
        ssxym += dx * dy;
    }
    if ssxm == 0.0 {
        // All x identical: the slope is unidentifiable.
        return None;
    }

    let (slope, intercept) = solve_two_column(x, y)?;

    // Pearson correlation; 0 by convention when y has no variance.
    let r_value = if ssym == 0.0 {
        0.0
    } else {
        (ssxym / (ssxm * ssym).sqrt()).clamp(-1.0, 1.0)
    };

    let df = n as f64 - 2.0;
    let (p_value, stderr) = if df > 0.0 {
        let one_minus_r2 = ((1.0 - r_value) * (1.0 + r_value)).max(0.0);
        let t_stat = if one_minus_r2 == 0.0 {
            f64::INFINITY * r_value.signum()
        } else {
            r_value * (df / one_minus_r2).sqrt()
        };
        let p = if t_stat.is_infinite() {
            0.0
        } else {
            // StudentsT::new only fails for non-positive df, excluded above.
            match StudentsT::new(0.0, 1.0, df) {
                Ok(dist) => 2.0 * (1.0 - dist.cdf(t_stat.abs())),
                Err(_) => f64::NAN,
            }
        };
        let se = (one_minus_r2 * ssym / ssxm / df).sqrt();
        (p, se)
    } else {
        // Two points: exact interpolation, no residual degrees of freedom.
        (f64::NAN, f64::NAN)
    };

    Some(RegressionSummary {
        slope,
        intercept,
        r_value,
        p_value,
        stderr,
    })
}

/// Solve the `[1, x] β = y` least-squares problem via SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
fn solve_two_column(x: &[f64], y: &[f64]) -> Option<(f64, f64)> {
    let n = x.len();
    let mut design = DMatrix::<f64>::zeros(n, 2);
    for (i, &xi) in x.iter().enumerate() {
        design[(i, 0)] = 1.0;
        design[(i, 1)] = xi;
    }
    let rhs = DVector::from_column_slice(y);

    let svd = design.svd(true, true);

    // Try progressively looser tolerances if the strict solve fails.
    for &tol in &[1e-12, 1e-10, 1e-8] {
        if let Ok(beta) = svd.solve(&rhs, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some((beta[1], beta[0]));
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_exact_line() {
        // y = 2 + 3x on x = [0,1,2,3]
        let x = [0.0, 1.0, 2.0, 3.0];
        let y = [2.0, 5.0, 8.0, 11.0];
        let reg = linear_regression(&x, &y).unwrap();
        assert!((reg.slope - 3.0).abs() < 1e-10);
        assert!((reg.intercept - 2.0).abs() < 1e-10);
        assert!((reg.r_value - 1.0).abs() < 1e-12);
        assert!(reg.p_value.abs() < 1e-12);
    }

    #[test]
    fn noisy_line_yields_partial_correlation() {
        let x = [0.0, 1.0, 2.0, 3.0, 4.0];
        let y = [1.0, 2.9, 5.2, 6.8, 9.1];
        let reg = linear_regression(&x, &y).unwrap();
        assert!(reg.slope > 1.8 && reg.slope < 2.2);
        assert!(reg.r_value > 0.99);
        assert!(reg.p_value > 0.0 && reg.p_value < 0.01);
        assert!(reg.stderr > 0.0);
    }

    #[test]
    fn constant_y_gives_zero_slope_and_correlation() {
        let x = [0.0, 1.0, 2.0, 3.0];
        let y = [4.0; 4];
        let reg = linear_regression(&x, &y).unwrap();
        assert!(reg.slope.abs() < 1e-12);
        assert!((reg.intercept - 4.0).abs() < 1e-12);
        assert_eq!(reg.r_value, 0.0);
    }

    #[test]
    fn degenerate_inputs_return_none() {
        assert!(linear_regression(&[1.0], &[2.0]).is_none());
        assert!(linear_regression(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]).is_none());
        assert!(linear_regression(&[0.0, 1.0], &[f64::NAN, 2.0]).is_none());
        assert!(linear_regression(&[0.0, 1.0, 2.0], &[1.0, 2.0]).is_none());
    }

    #[test]
    fn two_points_interpolate_without_residual_stats() {
        let reg = linear_regression(&[0.0, 10.0], &[5.0, 15.0]).unwrap();
        assert!((reg.slope - 1.0).abs() < 1e-12);
        assert!((reg.intercept - 5.0).abs() < 1e-12);
        assert!(reg.p_value.is_nan());
        assert!(reg.stderr.is_nan());
    }
}
