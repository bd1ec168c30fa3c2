//! Embedded sample dataset and the writer that puts it on disk.

pub mod sample;

pub use sample::*;
