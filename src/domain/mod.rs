//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - raw and cleaned sales rows (`RawSalesRow`, `SalesRecord`, `FeaturedRecord`)
//! - the monthly grouping key and series (`MonthKey`, `MonthlySeries`)
//! - forecast outputs (`ForecastSeries`, `Extrema`, `SummaryFile`)
//! - run configuration (`RunConfig`, `PlotMode`)

pub mod types;

pub use types::*;
