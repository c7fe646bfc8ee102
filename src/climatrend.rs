//! The main entry point: a query engine over the two climate datasets that
//! can also hand its numbers to a text-generation backend for a
//! natural-language summary.

use crate::analysis::aggregator::{aggregate, Reduction, SeriesPoint};
use crate::analysis::selector::select;
use crate::analysis::statistics::{summarize_series, EntityStatistics};
use crate::error::ClimatrendError;
use crate::generation::generator::TextGenerator;
use crate::narrative::build_prompt;
use crate::query::Query;
use crate::store::{DatasetKind, DatasetStore};
use log::info;

/// Owns the read-only [`DatasetStore`] and runs the
/// select → aggregate → trend → narrative pipeline per query.
///
/// Every method is a pure function of the store and the query; nothing is
/// mutated between requests, so one `Climatrend` can serve any number of
/// concurrent callers.
///
/// # Examples
///
/// ```
/// use climatrend::{Climatrend, DatasetKind, DatasetStore, Observation, Query};
///
/// # fn run() -> Result<(), climatrend::ClimatrendError> {
/// let store = DatasetStore::from_observations(
///     &[Observation {
///         country: "India".to_string(),
///         year: 2000,
///         city: Some("Delhi".to_string()),
///         value: 24.0,
///     }],
///     &[],
/// )?;
/// let engine = Climatrend::new(store);
/// let query = Query::builder()
///     .entities(vec!["India".to_string()])
///     .start_year(1990)
///     .end_year(2020)
///     .build()?;
/// let stats = engine.compute_statistics(DatasetKind::Temperature, &query)?;
/// assert_eq!(stats.len(), 1);
/// # Ok(())
/// # }
/// # run().unwrap();
/// ```
pub struct Climatrend {
    store: DatasetStore,
}

impl Climatrend {
    pub fn new(store: DatasetStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &DatasetStore {
        &self.store
    }

    /// The grouped per-year series for a query, one point per (country, year)
    /// pair with data. Missing years are omitted, never zero-filled.
    pub fn year_series(
        &self,
        kind: DatasetKind,
        query: &Query,
    ) -> Result<Vec<SeriesPoint>, ClimatrendError> {
        let rows = select(&self.store, kind, query)?;
        let points = aggregate(
            &rows,
            kind.value_column(),
            Reduction::for_kind(kind),
            query.is_comparative(),
        )?;
        Ok(points)
    }

    /// One statistics bundle per queried country that has matching data, in
    /// query order. Countries without data are omitted; a query matching
    /// nothing yields an empty vector, which callers surface as a defined
    /// "no data" condition rather than a fault.
    pub fn compute_statistics(
        &self,
        kind: DatasetKind,
        query: &Query,
    ) -> Result<Vec<EntityStatistics>, ClimatrendError> {
        let points = self.year_series(kind, query)?;
        if points.is_empty() {
            info!(
                "no {} data for {:?}, {}-{}",
                kind,
                query.entities(),
                query.start_year(),
                query.end_year()
            );
            return Ok(Vec::new());
        }

        let mut bundles = Vec::with_capacity(query.entities().len());
        for country in query.entities() {
            let series: Vec<SeriesPoint> = points
                .iter()
                .filter(|p| p.country == *country)
                .cloned()
                .collect();
            if let Some(bundle) = summarize_series(country, &series, kind.tracks_total()) {
                bundles.push(bundle);
            }
        }
        Ok(bundles)
    }

    /// Runs the full pipeline and asks the generator for a natural-language
    /// summary of the result.
    ///
    /// A query matching no data returns the dataset's defined no-data message
    /// as a successful result. Only a failure of the external generation call
    /// surfaces as an error, and it surfaces as a value carrying its cause.
    pub async fn summarize<G: TextGenerator>(
        &self,
        generator: &G,
        kind: DatasetKind,
        query: &Query,
    ) -> Result<String, ClimatrendError> {
        let stats = self.compute_statistics(kind, query)?;
        if stats.is_empty() {
            return Ok(kind.no_data_message().to_string());
        }
        let prompt = build_prompt(&stats, query, kind);
        let summary = generator.generate(&prompt).await?;
        Ok(summary)
    }
}
