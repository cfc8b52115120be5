//! Synthetic data generation for demos and offline testing.

pub mod sample;
