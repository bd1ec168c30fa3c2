//! Monthly aggregation.

use std::collections::BTreeMap;

use tracing::debug;

use crate::domain::{MonthKey, MonthlySeries, MonthlyTotal, SalesRecord};

/// Sum sales per calendar month.
///
/// The result is ascending by month and only contains months that have at
/// least one record (no zero-fill for gaps).
pub fn aggregate_monthly<'a>(records: impl IntoIterator<Item = &'a SalesRecord>) -> MonthlySeries {
    let mut totals: BTreeMap<MonthKey, f64> = BTreeMap::new();
    for r in records {
        *totals.entry(r.month()).or_insert(0.0) += r.sales;
    }

    debug!(months = totals.len(), "aggregated monthly sales");

    MonthlySeries::from_totals(
        totals
            .into_iter()
            .map(|(month, sales)| MonthlyTotal { month, sales })
            .collect(),
    )
}
