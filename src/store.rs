//! In-memory dataset store for the two climate datasets.
//!
//! The store is populated once at startup from already-parsed rows (the core
//! never reads files) and is read-only afterwards, so it can be shared across
//! any number of concurrent queries without locking.

use log::info;
use polars::prelude::*;
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

pub(crate) const COL_COUNTRY: &str = "country";
pub(crate) const COL_YEAR: &str = "year";
pub(crate) const COL_CITY: &str = "city";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("required column '{column}' missing from the {kind} dataset")]
    MissingColumn { kind: DatasetKind, column: String },

    #[error("failed to build dataset frame")]
    FrameConstruction(#[source] PolarsError),

    #[error("dataframe operation failed")]
    Polars(#[from] PolarsError),
}

/// Identifies one of the two datasets held by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetKind {
    /// Surface temperature observations, one row per (country, year, city)
    /// reading. Reduced by mean within a year.
    Temperature,
    /// Annual CO₂ emission observations, one row per (country, year) figure.
    /// Reduced by sum within a year.
    Co2,
}

impl DatasetKind {
    /// Name of the metric column in this dataset's frame.
    pub(crate) fn value_column(&self) -> &'static str {
        match self {
            DatasetKind::Temperature => "temperature",
            DatasetKind::Co2 => "co2",
        }
    }

    pub(crate) fn required_columns(&self) -> Vec<&'static str> {
        match self {
            DatasetKind::Temperature => vec![COL_COUNTRY, COL_YEAR, COL_CITY, "temperature"],
            DatasetKind::Co2 => vec![COL_COUNTRY, COL_YEAR, "co2"],
        }
    }

    /// Whether rows of this dataset carry a sub-location (city/state) column.
    pub(crate) fn has_city(&self) -> bool {
        matches!(self, DatasetKind::Temperature)
    }

    /// Whether a per-entity total belongs in the statistics bundle.
    /// Totals only make sense for summed metrics.
    pub(crate) fn tracks_total(&self) -> bool {
        matches!(self, DatasetKind::Co2)
    }

    pub(crate) fn no_data_message(&self) -> &'static str {
        match self {
            DatasetKind::Temperature => {
                "No temperature data available for the specified parameters."
            }
            DatasetKind::Co2 => "No CO₂ data available for the specified parameters.",
        }
    }

    fn name(&self) -> &'static str {
        match self {
            DatasetKind::Temperature => "temperature",
            DatasetKind::Co2 => "co2",
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One already-parsed dataset row, as handed over by the external loader.
///
/// `city` is only meaningful for temperature observations; CO₂ rows leave it
/// unset and the field is ignored when building the CO₂ frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub country: String,
    pub year: i32,
    pub city: Option<String>,
    pub value: f64,
}

/// Holds the temperature and CO₂ frames for the process lifetime.
#[derive(Debug)]
pub struct DatasetStore {
    temperature: DataFrame,
    co2: DataFrame,
}

impl DatasetStore {
    /// Wraps two pre-built frames, validating column presence once up front
    /// so queries never have to.
    pub fn new(temperature: DataFrame, co2: DataFrame) -> Result<Self, StoreError> {
        validate_columns(&temperature, DatasetKind::Temperature)?;
        validate_columns(&co2, DatasetKind::Co2)?;
        info!(
            "dataset store ready: {} temperature rows, {} co2 rows",
            temperature.height(),
            co2.height()
        );
        Ok(Self { temperature, co2 })
    }

    /// Builds the store from typed rows supplied by the external loader.
    pub fn from_observations(
        temperature: &[Observation],
        co2: &[Observation],
    ) -> Result<Self, StoreError> {
        let temperature = DataFrame::new(vec![
            Column::new(
                COL_COUNTRY.into(),
                temperature
                    .iter()
                    .map(|o| o.country.as_str())
                    .collect::<Vec<_>>(),
            ),
            Column::new(
                COL_YEAR.into(),
                temperature.iter().map(|o| o.year).collect::<Vec<_>>(),
            ),
            Column::new(
                COL_CITY.into(),
                temperature
                    .iter()
                    .map(|o| o.city.as_deref())
                    .collect::<Vec<_>>(),
            ),
            Column::new(
                DatasetKind::Temperature.value_column().into(),
                temperature.iter().map(|o| o.value).collect::<Vec<_>>(),
            ),
        ])
        .map_err(StoreError::FrameConstruction)?;

        let co2 = DataFrame::new(vec![
            Column::new(
                COL_COUNTRY.into(),
                co2.iter().map(|o| o.country.as_str()).collect::<Vec<_>>(),
            ),
            Column::new(
                COL_YEAR.into(),
                co2.iter().map(|o| o.year).collect::<Vec<_>>(),
            ),
            Column::new(
                DatasetKind::Co2.value_column().into(),
                co2.iter().map(|o| o.value).collect::<Vec<_>>(),
            ),
        ])
        .map_err(StoreError::FrameConstruction)?;

        Self::new(temperature, co2)
    }

    pub(crate) fn frame(&self, kind: DatasetKind) -> &DataFrame {
        match kind {
            DatasetKind::Temperature => &self.temperature,
            DatasetKind::Co2 => &self.co2,
        }
    }

    /// Unique country names of a dataset, null-free, in first-seen row order.
    pub fn countries(&self, kind: DatasetKind) -> Result<Vec<String>, StoreError> {
        let column = self.frame(kind).column(COL_COUNTRY)?.str()?;
        Ok(dedup_in_order(column.into_iter()))
    }

    /// Unique cities of the temperature dataset for one country, in
    /// first-seen row order.
    pub fn cities(&self, country: &str) -> Result<Vec<String>, StoreError> {
        let filtered = self
            .temperature
            .clone()
            .lazy()
            .filter(col(COL_COUNTRY).eq(lit(country.to_string())))
            .select([col(COL_CITY)])
            .collect()?;
        let column = filtered.column(COL_CITY)?.str()?;
        Ok(dedup_in_order(column.into_iter()))
    }
}

fn validate_columns(frame: &DataFrame, kind: DatasetKind) -> Result<(), StoreError> {
    for column in kind.required_columns() {
        if frame.column(column).is_err() {
            return Err(StoreError::MissingColumn {
                kind,
                column: column.to_string(),
            });
        }
    }
    Ok(())
}

fn dedup_in_order<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for value in values.flatten() {
        if seen.insert(value) {
            out.push(value.to_string());
        }
    }
    out
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub(crate) fn temp(country: &str, year: i32, city: &str, value: f64) -> Observation {
        Observation {
            country: country.to_string(),
            year,
            city: Some(city.to_string()),
            value,
        }
    }

    pub(crate) fn co2(country: &str, year: i32, value: f64) -> Observation {
        Observation {
            country: country.to_string(),
            year,
            city: None,
            value,
        }
    }

    /// Small two-country store shared by tests across the crate.
    pub(crate) fn sample_store() -> DatasetStore {
        DatasetStore::from_observations(
            &[
                temp("India", 2000, "Delhi", 24.0),
                temp("India", 2000, "Mumbai", 28.0),
                temp("India", 2001, "Delhi", 25.0),
                temp("India", 2001, "Mumbai", 29.0),
                temp("India", 2002, "Delhi", 26.0),
                temp("Brazil", 2000, "Rio de Janeiro", 21.0),
                temp("Brazil", 2002, "Rio de Janeiro", 22.0),
            ],
            &[
                co2("India", 2000, 1.0),
                co2("India", 2000, 0.5),
                co2("India", 2001, 2.5),
                co2("Brazil", 2000, 0.7),
            ],
        )
        .unwrap()
    }
}
