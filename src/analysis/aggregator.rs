//! Grouping of selected rows into a per-year series.

use crate::analysis::error::AnalysisError;
use crate::store::{DatasetKind, COL_COUNTRY, COL_YEAR};
use log::warn;
use polars::prelude::*;

/// The reduction applied within a (country, year) group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reduction {
    /// Mean of the contributing values (temperature).
    Mean,
    /// Sum of the contributing values (CO₂ emissions).
    Sum,
}

impl Reduction {
    /// The reduction a dataset's metric calls for.
    pub fn for_kind(kind: DatasetKind) -> Self {
        match kind {
            DatasetKind::Temperature => Reduction::Mean,
            DatasetKind::Co2 => Reduction::Sum,
        }
    }

    fn apply(self, expr: Expr) -> Expr {
        match self {
            Reduction::Mean => expr.mean(),
            Reduction::Sum => expr.sum(),
        }
    }
}

/// One aggregated value for a (country, year) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub country: String,
    pub year: i32,
    pub value: f64,
}

/// Reduces selected rows to one [`SeriesPoint`] per (country, year) pair
/// present in the input, sorted by (country, year).
///
/// With `group_by_entity` unset (single-entity queries) the grouping key is
/// the year alone and the country is taken from the input rows. Years with no
/// contributing rows simply do not appear; the output is not a dense axis.
pub(crate) fn aggregate(
    rows: &DataFrame,
    value_column: &str,
    reduction: Reduction,
    group_by_entity: bool,
) -> Result<Vec<SeriesPoint>, AnalysisError> {
    if rows.height() == 0 {
        return Ok(Vec::new());
    }

    if group_by_entity {
        let grouped = rows
            .clone()
            .lazy()
            .group_by_stable([col(COL_COUNTRY), col(COL_YEAR)])
            .agg([reduction.apply(col(value_column))])
            .sort([COL_COUNTRY, COL_YEAR], SortMultipleOptions::default())
            .collect()?;
        let countries = grouped.column(COL_COUNTRY)?.str()?;
        let years = grouped.column(COL_YEAR)?.i32()?;
        let values = grouped.column(value_column)?.f64()?;

        let mut points = Vec::with_capacity(grouped.height());
        for index in 0..grouped.height() {
            let (Some(country), Some(year), Some(value)) =
                (countries.get(index), years.get(index), values.get(index))
            else {
                warn!("skipping aggregated row {index} with null fields");
                continue;
            };
            points.push(SeriesPoint {
                country: country.to_string(),
                year,
                value,
            });
        }
        Ok(points)
    } else {
        // Single-entity path: the country is constant across all input rows.
        let country = rows
            .column(COL_COUNTRY)?
            .str()?
            .get(0)
            .unwrap_or_default()
            .to_string();
        let grouped = rows
            .clone()
            .lazy()
            .group_by_stable([col(COL_YEAR)])
            .agg([reduction.apply(col(value_column))])
            .sort([COL_YEAR], SortMultipleOptions::default())
            .collect()?;
        let years = grouped.column(COL_YEAR)?.i32()?;
        let values = grouped.column(value_column)?.f64()?;

        let mut points = Vec::with_capacity(grouped.height());
        for index in 0..grouped.height() {
            let (Some(year), Some(value)) = (years.get(index), values.get(index)) else {
                warn!("skipping aggregated row {index} with null fields");
                continue;
            };
            points.push(SeriesPoint {
                country: country.clone(),
                year,
                value,
            });
        }
        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::selector::select;
    use crate::query::Query;
    use crate::store::fixtures::sample_store;
    use crate::store::DatasetKind;

    fn select_rows(kind: DatasetKind, countries: &[&str], start: i32, end: i32) -> DataFrame {
        let store = sample_store();
        let query = Query::builder()
            .entities(countries.iter().map(|c| c.to_string()).collect())
            .start_year(start)
            .end_year(end)
            .build()
            .unwrap();
        select(&store, kind, &query).unwrap()
    }

    #[test]
    fn mean_reduction_averages_city_rows_per_year() {
        let rows = select_rows(DatasetKind::Temperature, &["India"], 2000, 2002);
        let points = aggregate(&rows, "temperature", Reduction::Mean, false).unwrap();

        assert_eq!(points.len(), 3);
        assert_eq!(points[0], point("India", 2000, 26.0));
        assert_eq!(points[1], point("India", 2001, 27.0));
        assert_eq!(points[2], point("India", 2002, 26.0));
    }

    #[test]
    fn sum_reduction_totals_rows_per_year() {
        let rows = select_rows(DatasetKind::Co2, &["India"], 2000, 2002);
        let points = aggregate(&rows, "co2", Reduction::Sum, false).unwrap();

        assert_eq!(points.len(), 2);
        assert_eq!(points[0], point("India", 2000, 1.5));
        assert_eq!(points[1], point("India", 2001, 2.5));
    }

    #[test]
    fn one_point_per_country_year_pair() {
        let rows = select_rows(DatasetKind::Temperature, &["India", "Brazil"], 2000, 2002);
        let points = aggregate(&rows, "temperature", Reduction::Mean, true).unwrap();

        let mut keys: Vec<(String, i32)> = points
            .iter()
            .map(|p| (p.country.clone(), p.year))
            .collect();
        let before = keys.len();
        keys.dedup();
        assert_eq!(keys.len(), before, "duplicate (country, year) key");
        // Brazil has no 2001 rows, so 3 India years + 2 Brazil years.
        assert_eq!(points.len(), 5);
    }

    #[test]
    fn missing_years_are_omitted_not_zero_filled() {
        let rows = select_rows(DatasetKind::Temperature, &["Brazil"], 2000, 2002);
        let points = aggregate(&rows, "temperature", Reduction::Mean, false).unwrap();

        let years: Vec<i32> = points.iter().map(|p| p.year).collect();
        assert_eq!(years, [2000, 2002]);
    }

    #[test]
    fn output_is_stable_across_calls() {
        let rows = select_rows(DatasetKind::Temperature, &["India", "Brazil"], 2000, 2002);
        let first = aggregate(&rows, "temperature", Reduction::Mean, true).unwrap();
        let second = aggregate(&rows, "temperature", Reduction::Mean, true).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let rows = select_rows(DatasetKind::Co2, &["Atlantis"], 2000, 2002);
        let points = aggregate(&rows, "co2", Reduction::Sum, false).unwrap();
        assert!(points.is_empty());
    }

    fn point(country: &str, year: i32, value: f64) -> SeriesPoint {
        SeriesPoint {
            country: country.to_string(),
            year,
            value,
        }
    }
}
