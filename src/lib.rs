//! `dca-curves` library crate.
//!
//! The binary (`dca`) is a thin wrapper around this library so that:
//!
//! - core logic (decline models, fitting, forecasting) is testable without
//!   spawning processes
//! - modules are reusable (e.g., future dashboard, notebooks, etc.)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod models;
pub mod report;
