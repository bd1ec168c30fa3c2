//! Best and worst month lookup.

use crate::domain::{Extrema, MonthlySeries};
use crate::error::{AppError, EXIT_NO_DATA};

/// Find the months with the highest and lowest totals.
///
/// Ties go to the earliest month. An empty series is an error.
pub fn find_extrema(series: &MonthlySeries) -> Result<Extrema, AppError> {
    let mut points = series.points().iter();
    let first = *points
        .next()
        .ok_or_else(|| AppError::new(EXIT_NO_DATA, "No monthly sales to rank: the series is empty."))?;

    let mut best = first;
    let mut worst = first;
    for &p in points {
        if p.sales > best.sales {
            best = p;
        }
        if p.sales < worst.sales {
            worst = p;
        }
    }

    Ok(Extrema { best, worst })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MonthKey, MonthlyTotal};

    fn series(values: &[f64]) -> MonthlySeries {
        MonthlySeries::from_totals(
            values
                .iter()
                .enumerate()
                .map(|(i, &sales)| MonthlyTotal {
                    month: MonthKey::new(2023, i as u32 + 1).unwrap(),
                    sales,
                })
                .collect(),
        )
    }

    #[test]
    fn sample_best_and_worst() {
        let s = series(&[3000.0, 3700.0, 5800.0, 5200.0, 6700.0, 7600.0]);
        let e = find_extrema(&s).unwrap();
        assert_eq!(e.best.month.to_string(), "2023-06");
        assert_eq!(e.best.sales, 7600.0);
        assert_eq!(e.worst.month.to_string(), "2023-01");
        assert_eq!(e.worst.sales, 3000.0);
    }

    #[test]
    fn ties_resolve_to_earliest_month() {
        let s = series(&[5.0, 9.0, 1.0, 9.0, 1.0]);
        let e = find_extrema(&s).unwrap();
        assert_eq!(e.best.month, MonthKey::new(2023, 2).unwrap());
        assert_eq!(e.worst.month, MonthKey::new(2023, 3).unwrap());
    }

    #[test]
    fn single_month_is_both() {
        let e = find_extrema(&series(&[42.0])).unwrap();
        assert_eq!(e.best, e.worst);
    }

    #[test]
    fn empty_series_is_an_error() {
        let err = find_extrema(&MonthlySeries::default()).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_NO_DATA);
    }
}
