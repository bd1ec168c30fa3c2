//! Moving-average forecast over the monthly series.

use crate::domain::{ForecastPoint, ForecastSeries, MOVING_AVERAGE_WINDOW, MonthlySeries};
use crate::math::trailing_mean;

/// Trailing 3-month mean for every month; the first two months have no value.
pub fn forecast_moving_average(series: &MonthlySeries) -> ForecastSeries {
    let values: Vec<f64> = series.values().collect();
    let means = trailing_mean(&values, MOVING_AVERAGE_WINDOW);

    let points = series
        .months()
        .zip(means)
        .map(|(month, forecast)| ForecastPoint { month, forecast })
        .collect();

    ForecastSeries {
        window: MOVING_AVERAGE_WINDOW,
        points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MonthKey, MonthlyTotal};

    fn sample_series() -> MonthlySeries {
        let values = [3000.0, 3700.0, 5800.0, 5200.0, 6700.0, 7600.0];
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
    fn first_two_months_are_missing() {
        let f = forecast_moving_average(&sample_series());
        assert_eq!(f.window, 3);
        assert_eq!(f.points.len(), 6);
        assert_eq!(f.points[0].forecast, None);
        assert_eq!(f.points[1].forecast, None);
    }

    #[test]
    fn trailing_means_use_actual_monthly_sums() {
        let f = forecast_moving_average(&sample_series());
        let m = |mo| MonthKey::new(2023, mo).unwrap();

        let march = f.get(m(3)).unwrap();
        assert!((march - 4166.6667).abs() < 1e-3);
        assert!((f.get(m(4)).unwrap() - 4900.0).abs() < 1e-9);
        assert!((f.get(m(5)).unwrap() - 5900.0).abs() < 1e-9);
        assert!((f.get(m(6)).unwrap() - 6500.0).abs() < 1e-9);
    }

    #[test]
    fn keys_match_the_monthly_series() {
        let s = sample_series();
        let f = forecast_moving_average(&s);
        let forecast_months: Vec<_> = f.points.iter().map(|p| p.month).collect();
        let series_months: Vec<_> = s.months().collect();
        assert_eq!(forecast_months, series_months);
    }

    #[test]
    fn empty_series_empty_forecast() {
        let f = forecast_moving_average(&MonthlySeries::default());
        assert!(f.points.is_empty());
    }
}
