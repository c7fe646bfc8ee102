//! Ordinary-least-squares trend fitting over a per-year series.

use crate::analysis::aggregator::SeriesPoint;

/// The fitted line `value = slope * year + intercept` for one country.
///
/// A degenerate series (fewer than two points) yields a defined zero-slope
/// fallback rather than an error; the `point_count` lets callers tell the two
/// apart if they care.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendResult {
    pub country: String,
    pub slope: f64,
    pub intercept: f64,
    pub point_count: usize,
}

/// Fits value against year by ordinary least squares.
///
/// The aggregator guarantees one point per year upstream, so repeated years
/// never reach this function; a zero spread of years is still guarded and
/// takes the same fallback as a short series.
pub fn fit_trend(country: &str, series: &[SeriesPoint]) -> TrendResult {
    let point_count = series.len();
    if point_count < 2 {
        return TrendResult {
            country: country.to_string(),
            slope: 0.0,
            intercept: series.first().map(|p| p.value).unwrap_or(0.0),
            point_count,
        };
    }

    let n = point_count as f64;
    let mean_year = series.iter().map(|p| p.year as f64).sum::<f64>() / n;
    let mean_value = series.iter().map(|p| p.value).sum::<f64>() / n;

    let mut spread = 0.0;
    let mut covariance = 0.0;
    for point in series {
        let dx = point.year as f64 - mean_year;
        spread += dx * dx;
        covariance += dx * (point.value - mean_value);
    }

    if spread == 0.0 {
        return TrendResult {
            country: country.to_string(),
            slope: 0.0,
            intercept: mean_value,
            point_count,
        };
    }

    let slope = covariance / spread;
    TrendResult {
        country: country.to_string(),
        slope,
        intercept: mean_value - slope * mean_year,
        point_count,
    }
}
