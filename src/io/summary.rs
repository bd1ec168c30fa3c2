//! Read/write summary JSON files.
//!
//! The summary is the portable representation of a run: monthly totals, best
//! and worst month, and the forecast. `sales plot` re-renders charts from it.
//! The schema is defined by `domain::SummaryFile`.

use std::fs::File;
use std::path::Path;

use tracing::info;

use crate::domain::{Extrema, ForecastSeries, MonthlySeries, SummaryFile};
use crate::error::AppError;

/// Assemble the summary document for a run.
pub fn build_summary(source: &Path, monthly: &MonthlySeries, extrema: &Extrema, forecast: &ForecastSeries) -> SummaryFile {
    SummaryFile {
        tool: "sales".to_string(),
        source: source.display().to_string(),
        window: forecast.window,
        monthly: monthly.points().to_vec(),
        best: extrema.best,
        worst: extrema.worst,
        forecast: forecast.points.clone(),
    }
}

/// Write a summary JSON file.
pub fn write_summary_json(path: &Path, summary: &SummaryFile) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::input(format!("Failed to create summary JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, summary)
        .map_err(|e| AppError::input(format!("Failed to write summary JSON: {e}")))?;

    info!(path = %path.display(), "wrote summary JSON");
    Ok(())
}

/// Read a summary JSON file.
pub fn read_summary_json(path: &Path) -> Result<SummaryFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open summary JSON '{}': {e}", path.display())))?;
    let summary: SummaryFile =
        serde_json::from_reader(file).map_err(|e| AppError::input(format!("Invalid summary JSON: {e}")))?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MonthKey, MonthlyTotal};
    use crate::analysis::forecast_moving_average;

    #[test]
    fn summary_survives_disk() {
        let m = |mo| MonthKey::new(2023, mo).unwrap();
        let monthly = MonthlySeries::from_totals(vec![
            MonthlyTotal { month: m(1), sales: 3000.0 },
            MonthlyTotal { month: m(2), sales: 3700.0 },
            MonthlyTotal { month: m(3), sales: 5800.0 },
        ]);
        let extrema = Extrema {
            best: monthly.points()[2],
            worst: monthly.points()[0],
        };
        let forecast = forecast_moving_average(&monthly);
        let summary = build_summary(Path::new("sales_data.csv"), &monthly, &extrema, &forecast);
        assert_eq!(summary.tool, "sales");

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        write_summary_json(&path, &summary).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"month\": \"2023-03\""));
        assert!(text.contains("\"forecast\": null"));

        let back = read_summary_json(&path).unwrap();
        assert_eq!(back, summary);
    }

    #[test]
    fn malformed_month_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(
            &path,
            r#"{"tool":"sales","source":"x","window":3,"monthly":[{"month":"2023-13","sales":1.0}],
               "best":{"month":"2023-01","sales":1.0},"worst":{"month":"2023-01","sales":1.0},"forecast":[]}"#,
        )
        .unwrap();

        let err = read_summary_json(&path).unwrap_err();
        assert!(err.message().starts_with("Invalid summary JSON"));
    }
}
