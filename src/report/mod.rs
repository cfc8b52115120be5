//! Terminal report formatting.
//!
//! Formatting lives in one place so the fitting code stays clean and output
//! changes are localized.

mod format;

pub use format::{format_forecast, format_run_summary};
