//! Export monthly totals and the forecast to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::domain::{ForecastSeries, MonthlySeries};
use crate::error::AppError;

/// Write `month,sales,forecast` rows; the forecast cell is empty while the window fills.
pub fn write_forecast_csv(path: &Path, monthly: &MonthlySeries, forecast: &ForecastSeries) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::input(format!("Failed to create export CSV '{}': {e}", path.display())))?;

    writeln!(file, "month,sales,forecast")
        .map_err(|e| AppError::input(format!("Failed to write export CSV header: {e}")))?;

    for p in monthly.points() {
        writeln!(
            file,
            "{},{},{}",
            p.month,
            p.sales,
            forecast.get(p.month).map(|v| format!("{v:.4}")).unwrap_or_default(),
        )
        .map_err(|e| AppError::input(format!("Failed to write export CSV row: {e}")))?;
    }

    info!(path = %path.display(), months = monthly.len(), "wrote forecast CSV");
    Ok(())
}
