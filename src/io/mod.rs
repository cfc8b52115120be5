//! File input/output: CSV ingest, forecast export, saved-model JSON.

pub mod curve;
pub mod export;
pub mod ingest;
