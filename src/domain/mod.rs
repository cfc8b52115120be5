//! Shared domain types for decline-curve analysis.
//!
//! Everything here is plain data: the fitting and forecasting code consumes
//! these types but the types themselves carry no algorithmic logic beyond
//! mode/exponent bookkeeping.

mod types;

pub use types::*;
