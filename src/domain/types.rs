//! Shared domain types.
//!
//! These types are intentionally kept lightweight so they can be:
//!
//! - used in-memory while the pipeline runs
//! - exported to JSON/CSV
//! - reloaded later for plotting

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Fixed width of the trailing moving-average window.
pub const MOVING_AVERAGE_WINDOW: usize = 3;

/// One line of the sales CSV as read from disk.
///
/// Every field is optional: an empty cell is a *missing* value, which the
/// cleaning step uses to drop incomplete rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSalesRow {
    pub date: Option<NaiveDate>,
    pub product: Option<String>,
    pub region: Option<String>,
    pub sales: Option<f64>,
}

/// A complete sales observation.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesRecord {
    pub date: NaiveDate,
    pub product: String,
    pub region: String,
    pub sales: f64,
}

impl SalesRecord {
    pub fn month(&self) -> MonthKey {
        MonthKey::from_date(self.date)
    }
}

/// A sales record plus the calendar fields derived from its date.
#[derive(Debug, Clone, PartialEq)]
pub struct FeaturedRecord {
    pub record: SalesRecord,
    /// English month name, e.g. `"January"`.
    pub month_name: String,
    pub year: i32,
}

/// Calendar month used as the grouping key.
///
/// Ordering is chronological (year first, then month), which the derived
/// `Ord` gives us for free because of the field order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Build a key; `month` is 1-based. Returns `None` when out of range.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `pad` so table columns honor width and alignment flags.
        f.pad(&format!("{:04}-{:02}", self.year, self.month))
    }
}

impl FromStr for MonthKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| format!("Invalid month '{s}'. Expected YYYY-MM."))?;
        let year: i32 = year
            .parse()
            .map_err(|_| format!("Invalid year in month '{s}'."))?;
        let month: u32 = month
            .parse()
            .map_err(|_| format!("Invalid month number in '{s}'."))?;
        MonthKey::new(year, month).ok_or_else(|| format!("Month out of range in '{s}'."))
    }
}

impl TryFrom<String> for MonthKey {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthKey> for String {
    fn from(value: MonthKey) -> Self {
        value.to_string()
    }
}

/// Summed sales for one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    pub month: MonthKey,
    pub sales: f64,
}

/// Per-month sales totals in ascending month order, one entry per month present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthlySeries {
    points: Vec<MonthlyTotal>,
}

impl MonthlySeries {
    /// Build a series from totals, sorting by month.
    ///
    /// Callers are expected to pass unique months (the aggregator does); when
    /// duplicates slip through their totals are merged so keys stay unique.
    pub fn from_totals(mut totals: Vec<MonthlyTotal>) -> Self {
        totals.sort_by_key(|t| t.month);
        let mut points: Vec<MonthlyTotal> = Vec::with_capacity(totals.len());
        for t in totals {
            match points.last_mut() {
                Some(last) if last.month == t.month => last.sales += t.sales,
                _ => points.push(t),
            }
        }
        Self { points }
    }

    pub fn points(&self) -> &[MonthlyTotal] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn months(&self) -> impl Iterator<Item = MonthKey> + '_ {
        self.points.iter().map(|p| p.month)
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.sales)
    }

    pub fn get(&self, month: MonthKey) -> Option<f64> {
        self.points
            .binary_search_by_key(&month, |p| p.month)
            .ok()
            .map(|idx| self.points[idx].sales)
    }
}

/// Moving-average value for one month; `None` while the window is not yet full.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub month: MonthKey,
    pub forecast: Option<f64>,
}

/// Forecast aligned with the monthly series it was computed from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForecastSeries {
    pub window: usize,
    pub points: Vec<ForecastPoint>,
}

impl ForecastSeries {
    pub fn get(&self, month: MonthKey) -> Option<f64> {
        self.points
            .iter()
            .find(|p| p.month == month)
            .and_then(|p| p.forecast)
    }
}

/// Best and worst months of a monthly series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extrema {
    pub best: MonthlyTotal,
    pub worst: MonthlyTotal,
}

/// Where charts are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PlotMode {
    /// Interactive chart when stdout is a terminal, ASCII otherwise.
    Auto,
    /// Full-screen interactive chart; blocks until dismissed.
    Tui,
    /// Plain-text chart printed to stdout.
    Ascii,
    /// No charts.
    None,
}

/// Resolved settings for one pipeline run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub data_file: PathBuf,
    /// Write the embedded dataset before loading it.
    pub write_dataset: bool,
    pub plot_mode: PlotMode,
    pub plot_width: usize,
    pub plot_height: usize,
    pub export_forecast: Option<PathBuf>,
    pub export_summary: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(crate::data::DEFAULT_DATA_FILE),
            write_dataset: true,
            plot_mode: PlotMode::Auto,
            plot_width: 72,
            plot_height: 18,
            export_forecast: None,
            export_summary: None,
        }
    }
}

/// Portable JSON summary of a run, readable back by `sales plot`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryFile {
    pub tool: String,
    pub source: String,
    pub window: usize,
    pub monthly: Vec<MonthlyTotal>,
    pub best: MonthlyTotal,
    pub worst: MonthlyTotal,
    pub forecast: Vec<ForecastPoint>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_key_orders_chronologically() {
        let dec = MonthKey::new(2022, 12).unwrap();
        let jan = MonthKey::new(2023, 1).unwrap();
        let feb = MonthKey::new(2023, 2).unwrap();
        let mut keys = vec![feb, dec, jan];
        keys.sort();
        assert_eq!(keys, vec![dec, jan, feb]);
    }

    #[test]
    fn month_key_display_and_parse() {
        let key = MonthKey::new(2023, 3).unwrap();
        assert_eq!(key.to_string(), "2023-03");
        assert_eq!("2023-03".parse::<MonthKey>().unwrap(), key);
        assert!("2023-13".parse::<MonthKey>().is_err());
        assert!("March".parse::<MonthKey>().is_err());
    }

    #[test]
    fn month_key_display_honors_width() {
        let key = MonthKey::new(2023, 3).unwrap();
        assert_eq!(format!("{key:<8}|"), "2023-03 |");
        assert_eq!(format!("{key:>9}"), "  2023-03");
    }

    #[test]
    fn month_key_serializes_as_string() {
        let total = MonthlyTotal {
            month: MonthKey::new(2023, 6).unwrap(),
            sales: 7600.0,
        };
        let json = serde_json::to_string(&total).unwrap();
        assert_eq!(json, r#"{"month":"2023-06","sales":7600.0}"#);
        let back: MonthlyTotal = serde_json::from_str(&json).unwrap();
        assert_eq!(back, total);
    }

    #[test]
    fn monthly_series_sorts_and_merges() {
        let m = |mo| MonthKey::new(2023, mo).unwrap();
        let series = MonthlySeries::from_totals(vec![
            MonthlyTotal { month: m(2), sales: 5.0 },
            MonthlyTotal { month: m(1), sales: 1.0 },
            MonthlyTotal { month: m(2), sales: 2.0 },
        ]);
        let months: Vec<_> = series.months().collect();
        assert_eq!(months, vec![m(1), m(2)]);
        assert_eq!(series.get(m(2)), Some(7.0));
        assert_eq!(series.get(m(3)), None);
    }
}
