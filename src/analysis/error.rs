use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("dataframe operation failed")]
    Polars(#[from] PolarsError),
}
