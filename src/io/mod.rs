//! Input/output helpers.
//!
//! - CSV ingest (`ingest`)
//! - forecast CSV export (`export`)
//! - summary JSON read/write (`summary`)

pub mod export;
pub mod ingest;
pub mod summary;

pub use export::*;
pub use ingest::*;
pub use summary::*;
