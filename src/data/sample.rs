//! Synthetic sales sample.
//!
//! The dataset is fixed text: six months of 2023 sales across four regions and
//! three products. Writing it always truncates the target so repeated runs leave
//! identical content behind.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::AppError;

/// File name used when no `--data-file` is given.
pub const DEFAULT_DATA_FILE: &str = "sales_data.csv";

/// Header plus 12 data rows, newline-terminated.
pub const SAMPLE_CSV: &str = "\
Date,Product,Region,Sales
2023-01-05,Mobile,North,1200
2023-01-15,Laptop,South,1800
2023-02-10,Mobile,East,1500
2023-02-25,TV,West,2200
2023-03-12,TV,West,3000
2023-03-25,Mobile,North,2800
2023-04-05,Laptop,South,2500
2023-04-18,Mobile,East,2700
2023-05-01,TV,North,3200
2023-05-20,Laptop,South,3500
2023-06-10,Mobile,West,3600
2023-06-25,TV,East,4000
";

/// Number of data rows (excluding the header) in `SAMPLE_CSV`.
pub fn sample_row_count() -> usize {
    SAMPLE_CSV.lines().skip(1).filter(|l| !l.trim().is_empty()).count()
}

/// Write the sample dataset to `path`, replacing any existing content.
pub fn write_sample_dataset(path: &Path) -> Result<(), AppError> {
    fs::write(path, SAMPLE_CSV).map_err(|e| {
        AppError::input(format!("Failed to write dataset '{}': {e}", path.display()))
    })?;

    info!(path = %path.display(), rows = sample_row_count(), "wrote sample dataset");
    Ok(())
}
