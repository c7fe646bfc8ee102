//! Validated query values.
//!
//! A [`Query`] can only be obtained through its builder, so the analysis code
//! never sees an empty entity list, an inverted year range, or a sub-location
//! attached to a comparative query.

use bon::bon;
use log::debug;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("query must name at least one country")]
    NoEntities,

    #[error("start year {start} is after end year {end}")]
    InvertedYearRange { start: i32, end: i32 },
}

/// A time-bounded, country-scoped selection over one dataset.
///
/// # Examples
///
/// ```
/// use climatrend::Query;
///
/// let query = Query::builder()
///     .entities(vec!["India".to_string()])
///     .start_year(2000)
///     .end_year(2020)
///     .city("Delhi".to_string())
///     .build()
///     .unwrap();
/// assert_eq!(query.city(), Some("Delhi"));
/// assert!(!query.is_comparative());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    entities: Vec<String>,
    start_year: i32,
    end_year: i32,
    city: Option<String>,
}

#[bon]
impl Query {
    /// Validates and normalizes the raw parameters into a `Query`.
    ///
    /// Duplicate entities are dropped (first occurrence wins) and a city on a
    /// multi-country query is cleared, since a sub-location is only
    /// meaningful when exactly one country is queried.
    #[builder]
    pub fn new(
        entities: Vec<String>,
        start_year: i32,
        end_year: i32,
        city: Option<String>,
    ) -> Result<Self, QueryError> {
        let mut deduped: Vec<String> = Vec::with_capacity(entities.len());
        for entity in entities {
            if !deduped.contains(&entity) {
                deduped.push(entity);
            }
        }
        if deduped.is_empty() {
            return Err(QueryError::NoEntities);
        }
        if start_year > end_year {
            return Err(QueryError::InvertedYearRange {
                start: start_year,
                end: end_year,
            });
        }
        let city = if deduped.len() > 1 && city.is_some() {
            debug!("dropping sub-location from comparative query over {deduped:?}");
            None
        } else {
            city
        };
        Ok(Self {
            entities: deduped,
            start_year,
            end_year,
            city,
        })
    }
}

impl Query {
    pub fn entities(&self) -> &[String] {
        &self.entities
    }

    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    pub fn end_year(&self) -> i32 {
        self.end_year
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    /// True when more than one country is queried.
    pub fn is_comparative(&self) -> bool {
        self.entities.len() > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entities(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn empty_entity_list_is_rejected() {
        let err = Query::builder()
            .entities(Vec::new())
            .start_year(2000)
            .end_year(2010)
            .build()
            .unwrap_err();
        assert_eq!(err, QueryError::NoEntities);
    }

    #[test]
    fn inverted_year_range_is_rejected() {
        let err = Query::builder()
            .entities(entities(&["India"]))
            .start_year(2010)
            .end_year(2000)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            QueryError::InvertedYearRange {
                start: 2010,
                end: 2000
            }
        );
    }

    #[test]
    fn duplicate_entities_are_dropped_in_order() {
        let query = Query::builder()
            .entities(entities(&["India", "Brazil", "India"]))
            .start_year(2000)
            .end_year(2010)
            .build()
            .unwrap();
        assert_eq!(query.entities(), ["India", "Brazil"]);
        assert!(query.is_comparative());
    }

    #[test]
    fn city_is_cleared_for_comparative_queries() {
        let query = Query::builder()
            .entities(entities(&["India", "Brazil"]))
            .start_year(2000)
            .end_year(2010)
            .city("Delhi".to_string())
            .build()
            .unwrap();
        assert_eq!(query.city(), None);
    }

    #[test]
    fn city_is_kept_for_single_entity_queries() {
        let query = Query::builder()
            .entities(entities(&["India"]))
            .start_year(2000)
            .end_year(2010)
            .city("Delhi".to_string())
            .build()
            .unwrap();
        assert_eq!(query.city(), Some("Delhi"));
    }

    #[test]
    fn single_year_range_is_valid() {
        let query = Query::builder()
            .entities(entities(&["India"]))
            .start_year(2005)
            .end_year(2005)
            .build()
            .unwrap();
        assert_eq!(query.start_year(), query.end_year());
    }
}
