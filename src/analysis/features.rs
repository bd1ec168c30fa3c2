//! Calendar features derived from each record's date.

use chrono::Datelike;

use crate::domain::{FeaturedRecord, SalesRecord};

/// Attach month name and year to every record.
pub fn derive_features(records: Vec<SalesRecord>) -> Vec<FeaturedRecord> {
    records
        .into_iter()
        .map(|record| FeaturedRecord {
            month_name: record.date.format("%B").to_string(),
            year: record.date.year(),
            record,
        })
        .collect()
}
