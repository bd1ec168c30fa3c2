//! `sales-forecast` library crate.
//!
//! The binary (`sales`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the pipeline steps can be reused on their own

pub mod analysis;
pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod math;
pub mod plot;
pub mod report;
pub mod tui;
