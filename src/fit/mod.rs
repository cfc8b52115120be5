//! Decline-curve fitting: linearization, regression, and fit scoring.

pub mod fitter;
pub mod score;

pub use fitter::Fitter;
pub use score::r_squared;
