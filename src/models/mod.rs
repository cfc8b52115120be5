//! Forward evaluation of Arps decline models.

mod arps;

pub use arps::{cumulative, cumulatives, grid, rate, rates};
