//! Row completeness filter.

use tracing::warn;

use crate::domain::{RawSalesRow, SalesRecord};

/// Rows that survived cleaning plus a count of those that did not.
#[derive(Debug, Clone)]
pub struct CleanedData {
    pub records: Vec<SalesRecord>,
    pub dropped: usize,
}

/// Drop every row with at least one missing field. Order is preserved.
pub fn drop_incomplete(rows: Vec<RawSalesRow>) -> CleanedData {
    let total = rows.len();
    let records: Vec<SalesRecord> = rows.into_iter().filter_map(complete_record).collect();
    let dropped = total - records.len();

    if dropped > 0 {
        warn!(dropped, kept = records.len(), "dropped incomplete rows");
    }

    CleanedData { records, dropped }
}

fn complete_record(row: RawSalesRow) -> Option<SalesRecord> {
    Some(SalesRecord {
        date: row.date?,
        product: row.product?,
        region: row.region?,
        sales: row.sales?,
    })
}
