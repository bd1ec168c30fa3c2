//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the analysis code stays clean and testable
//! - output changes are localized (and pinned by the tests below)

use std::path::Path;

use crate::app::pipeline::AggregatedRun;
use crate::domain::{Extrema, ForecastSeries, MonthlySeries};

/// One-line confirmation printed after the dataset is written.
pub fn format_dataset_written(path: &Path) -> String {
    format!("{} file created successfully!\n", path.display())
}

/// Row counts for the run; only printed when something was dropped.
pub fn format_load_summary(run: &AggregatedRun, path: &Path) -> Option<String> {
    if run.rows_dropped == 0 {
        return None;
    }
    Some(format!(
        "Loaded {} rows from {} ({} incomplete rows dropped)\n",
        run.rows_read,
        path.display(),
        run.rows_dropped,
    ))
}

/// Month-by-month totals table.
pub fn format_monthly_sales(series: &MonthlySeries) -> String {
    let mut out = String::new();
    out.push_str("----- Monthly Sales -----\n");
    out.push_str(&format!("{:<8} {:>12}\n", "Month", "Sales"));
    for p in series.points() {
        out.push_str(&format!("{:<8} {:>12}\n", p.month, fmt_amount(p.sales)));
    }
    out
}

/// Best/worst month lines.
pub fn format_extrema(extrema: &Extrema) -> String {
    format!(
        "Best Month : {} => Sales = {}\nWorst Month: {} => Sales = {}\n",
        extrema.best.month,
        fmt_amount(extrema.best.sales),
        extrema.worst.month,
        fmt_amount(extrema.worst.sales),
    )
}

/// Forecast table; months without a full window print `NaN`.
pub fn format_forecast(forecast: &ForecastSeries) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "----- Forecasted Sales ({}-Month Moving Average) -----\n",
        forecast.window
    ));
    out.push_str(&format!("{:<8} {:>12}\n", "Month", "Forecast"));
    for p in &forecast.points {
        let value = p.forecast.map(|v| format!("{v:.2}")).unwrap_or_else(|| "NaN".to_string());
        out.push_str(&format!("{:<8} {:>12}\n", p.month, value));
    }
    out
}

/// Whole amounts print without decimals; fractional ones with two.
pub fn fmt_amount(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}
