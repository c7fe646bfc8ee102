use crate::analysis::error::AnalysisError;
use crate::generation::error::GenerationError;
use crate::query::QueryError;
use crate::store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClimatrendError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}
