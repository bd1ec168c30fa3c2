//! Shared pipeline logic used by the `run` and `report` commands.
//!
//! Write -> load -> clean -> features -> aggregate -> extrema -> forecast.
//!
//! The steps are split in two (`aggregate_dataset`, `finish_run`) so the caller
//! can print the monthly totals before ranking, which fails on an empty series.
//! Presentation (printing, charts, exports) happens in the caller.

use std::path::Path;

use tracing::{info, instrument};

use crate::analysis::{aggregate_monthly, derive_features, drop_incomplete, find_extrema, forecast_moving_average};
use crate::domain::{Extrema, FeaturedRecord, ForecastSeries, MonthlySeries, RunConfig};
use crate::error::AppError;

/// Everything up to and including the monthly totals.
#[derive(Debug, Clone)]
pub struct AggregatedRun {
    pub records: Vec<FeaturedRecord>,
    pub rows_read: usize,
    pub rows_dropped: usize,
    pub monthly: MonthlySeries,
}

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub records: Vec<FeaturedRecord>,
    pub rows_read: usize,
    pub rows_dropped: usize,
    pub monthly: MonthlySeries,
    pub extrema: Extrema,
    pub forecast: ForecastSeries,
}

/// Execute the full pipeline and return the computed outputs.
#[instrument(skip_all, fields(path = %config.data_file.display()))]
pub fn run_pipeline(config: &RunConfig) -> Result<RunOutput, AppError> {
    // 1) Write the embedded dataset.
    if config.write_dataset {
        crate::data::write_sample_dataset(&config.data_file)?;
    }

    finish_run(aggregate_dataset(&config.data_file)?)
}

/// Load, clean, derive features and total by month.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn aggregate_dataset(path: &Path) -> Result<AggregatedRun, AppError> {
    // 2) Load and 3) drop incomplete rows.
    let loaded = crate::io::load_sales_rows(path)?;
    let cleaned = drop_incomplete(loaded.rows);

    // 4) Month name + year.
    let records = derive_features(cleaned.records);

    // 5) Monthly totals.
    let monthly = aggregate_monthly(records.iter().map(|f| &f.record));

    Ok(AggregatedRun {
        records,
        rows_read: loaded.rows_read,
        rows_dropped: cleaned.dropped,
        monthly,
    })
}

/// Rank the months and forecast. Fails with exit code 3 on an empty series.
pub fn finish_run(run: AggregatedRun) -> Result<RunOutput, AppError> {
    // 6) Best/worst month.
    let extrema = find_extrema(&run.monthly)?;

    // 8) Moving-average forecast.
    let forecast = forecast_moving_average(&run.monthly);

    info!(
        rows = run.rows_read,
        dropped = run.rows_dropped,
        months = run.monthly.len(),
        "pipeline complete"
    );

    Ok(RunOutput {
        records: run.records,
        rows_read: run.rows_read,
        rows_dropped: run.rows_dropped,
        monthly: run.monthly,
        extrema,
        forecast,
    })
}
