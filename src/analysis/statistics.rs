//! Per-country statistics bundles, the minimal sufficient summary handed to
//! the narrative layer. The raw series never travels further than this.

use crate::analysis::aggregator::SeriesPoint;
use crate::analysis::trend::{fit_trend, TrendResult};

#[derive(Debug, Clone, PartialEq)]
pub struct EntityStatistics {
    pub country: String,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    /// Sum over the series; only carried for summed metrics (CO₂).
    pub total: Option<f64>,
    pub trend: TrendResult,
}

/// Condenses one country's aggregated series into its statistics bundle.
/// Returns `None` for an empty series so countries without data can be
/// dropped rather than reported as zero.
pub(crate) fn summarize_series(
    country: &str,
    series: &[SeriesPoint],
    include_total: bool,
) -> Option<EntityStatistics> {
    if series.is_empty() {
        return None;
    }

    let total: f64 = series.iter().map(|p| p.value).sum();
    let mean = total / series.len() as f64;
    let min = series.iter().map(|p| p.value).fold(f64::INFINITY, f64::min);
    let max = series
        .iter()
        .map(|p| p.value)
        .fold(f64::NEG_INFINITY, f64::max);

    Some(EntityStatistics {
        country: country.to_string(),
        mean,
        min,
        max,
        total: include_total.then_some(total),
        trend: fit_trend(country, series),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(points: &[(i32, f64)]) -> Vec<SeriesPoint> {
        points
            .iter()
            .map(|&(year, value)| SeriesPoint {
                country: "India".to_string(),
                year,
                value,
            })
            .collect()
    }

    #[test]
    fn bundles_mean_min_max_and_trend() {
        let stats =
            summarize_series("India", &series(&[(2000, 26.0), (2001, 27.0), (2002, 25.0)]), false)
                .unwrap();
        assert_eq!(stats.mean, 26.0);
        assert_eq!(stats.min, 25.0);
        assert_eq!(stats.max, 27.0);
        assert_eq!(stats.total, None);
        assert_eq!(stats.trend.point_count, 3);
    }

    #[test]
    fn total_is_carried_only_when_asked_for() {
        let stats = summarize_series("India", &series(&[(2000, 1.5), (2001, 2.5)]), true).unwrap();
        assert_eq!(stats.total, Some(4.0));
    }

    #[test]
    fn empty_series_yields_no_bundle() {
        assert!(summarize_series("India", &[], true).is_none());
    }
}
