//! Numeric helpers: running-window statistics.

pub mod rolling;

pub use rolling::*;
