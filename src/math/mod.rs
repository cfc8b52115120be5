//! Numeric building blocks (ordinary least squares).

mod linreg;

pub use linreg::linear_regression;
