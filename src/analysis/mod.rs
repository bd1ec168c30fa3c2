//! Sales analysis steps.
//!
//! Each step is a small pure function over the previous step's output:
//!
//! - drop incomplete rows (`clean`)
//! - derive month name and year (`features`)
//! - sum sales per calendar month (`aggregate`)
//! - find best and worst months (`extrema`)
//! - trailing moving-average forecast (`forecast`)

pub mod aggregate;
pub mod clean;
pub mod extrema;
pub mod features;
pub mod forecast;

pub use aggregate::*;
pub use clean::*;
pub use extrema::*;
pub use features::*;
pub use forecast::*;
