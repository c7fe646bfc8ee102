//! Row selection: applies a query's predicates to one dataset frame.

use crate::analysis::error::AnalysisError;
use crate::query::Query;
use crate::store::{DatasetKind, DatasetStore, COL_CITY, COL_COUNTRY, COL_YEAR};
use log::debug;
use polars::prelude::*;

/// Filters the dataset to rows matching the query's countries, inclusive
/// year range, and (for temperature data) optional city.
///
/// The result is sorted by (country, year) so downstream iteration order does
/// not depend on the frame's internal row order. An empty frame is a valid
/// outcome, not an error; callers decide how to surface "no data".
pub(crate) fn select(
    store: &DatasetStore,
    kind: DatasetKind,
    query: &Query,
) -> Result<DataFrame, AnalysisError> {
    let mut entity_predicate = lit(false);
    for country in query.entities() {
        entity_predicate = entity_predicate.or(col(COL_COUNTRY).eq(lit(country.clone())));
    }

    let mut predicate = entity_predicate
        .and(col(COL_YEAR).gt_eq(lit(query.start_year())))
        .and(col(COL_YEAR).lt_eq(lit(query.end_year())));

    // Query guarantees a city is only present on single-entity queries, and
    // only the temperature frame carries a city column at all.
    if kind.has_city() {
        if let Some(city) = query.city() {
            predicate = predicate.and(col(COL_CITY).eq(lit(city.to_string())));
        }
    }

    let rows = store
        .frame(kind)
        .clone()
        .lazy()
        .filter(predicate)
        .sort([COL_COUNTRY, COL_YEAR], SortMultipleOptions::default())
        .collect()?;
    debug!(
        "selected {} {} rows for {:?}, {}-{}",
        rows.height(),
        kind,
        query.entities(),
        query.start_year(),
        query.end_year()
    );
    Ok(rows)
}
