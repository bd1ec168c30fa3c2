//! Chart descriptions and renderers.
//!
//! A `LineChart` is a render-only description: title, axis labels, x categories
//! and one or more labeled series. Series values may be missing, which renders
//! as a gap. The same description feeds both the ASCII renderer (`ascii`) and
//! the interactive TUI (`crate::tui`).

use std::io::IsTerminal;

use crate::domain::{ForecastSeries, MonthlySeries, PlotMode, SummaryFile};
use crate::error::AppError;

pub mod ascii;

pub use ascii::*;

/// One labeled line on a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub label: String,
    /// One value per x category; `None` is a gap.
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub categories: Vec<String>,
    pub series: Vec<ChartSeries>,
}

impl LineChart {
    /// Min/max over all defined values, widened when every value is equal.
    pub fn y_range(&self) -> Option<(f64, f64)> {
        let mut min_y = f64::INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for s in &self.series {
            for v in s.values.iter().flatten() {
                min_y = min_y.min(*v);
                max_y = max_y.max(*v);
            }
        }

        if !(min_y.is_finite() && max_y.is_finite()) {
            return None;
        }
        if max_y > min_y {
            Some((min_y, max_y))
        } else {
            Some((min_y - 1.0, max_y + 1.0))
        }
    }
}

/// "Monthly Sales Trend" chart.
pub fn sales_trend_chart(monthly: &MonthlySeries) -> LineChart {
    LineChart {
        title: "Monthly Sales Trend".to_string(),
        x_label: "Month".to_string(),
        y_label: "Total Sales".to_string(),
        categories: monthly.months().map(|m| m.to_string()).collect(),
        series: vec![ChartSeries {
            label: "Monthly Sales".to_string(),
            values: monthly.values().map(Some).collect(),
        }],
    }
}

/// "Sales Forecasting" chart: actual totals with the moving average overlaid.
pub fn forecast_chart(monthly: &MonthlySeries, forecast: &ForecastSeries) -> LineChart {
    LineChart {
        title: "Sales Forecasting".to_string(),
        x_label: "Month".to_string(),
        y_label: "Sales".to_string(),
        categories: monthly.months().map(|m| m.to_string()).collect(),
        series: vec![
            ChartSeries {
                label: "Actual Sales".to_string(),
                values: monthly.values().map(Some).collect(),
            },
            ChartSeries {
                label: "Forecast (Moving Avg)".to_string(),
                values: monthly.months().map(|m| forecast.get(m)).collect(),
            },
        ],
    }
}

/// Rebuild both charts from a saved summary.
pub fn charts_from_summary(summary: &SummaryFile) -> (LineChart, LineChart) {
    let monthly = MonthlySeries::from_totals(summary.monthly.clone());
    let forecast = ForecastSeries {
        window: summary.window,
        points: summary.forecast.clone(),
    };
    (sales_trend_chart(&monthly), forecast_chart(&monthly, &forecast))
}

/// Concrete rendering target after resolving `PlotMode::Auto`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotTarget {
    Tui,
    Ascii,
    Off,
}

pub fn resolve_plot_target(mode: PlotMode) -> PlotTarget {
    match mode {
        PlotMode::Tui => PlotTarget::Tui,
        PlotMode::Ascii => PlotTarget::Ascii,
        PlotMode::None => PlotTarget::Off,
        PlotMode::Auto => {
            if std::io::stdout().is_terminal() {
                PlotTarget::Tui
            } else {
                PlotTarget::Ascii
            }
        }
    }
}

/// Render a chart to the resolved target.
///
/// The TUI target blocks until the user dismisses the chart.
pub fn show_chart(chart: &LineChart, target: PlotTarget, width: usize, height: usize) -> Result<(), AppError> {
    match target {
        PlotTarget::Tui => crate::tui::show_chart(chart),
        PlotTarget::Ascii => {
            println!("{}", render_ascii_chart(chart, width, height));
            Ok(())
        }
        PlotTarget::Off => Ok(()),
    }
}
