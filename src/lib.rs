mod analysis;
mod climatrend;
mod error;
mod generation;
mod narrative;
mod query;
mod store;

pub use error::ClimatrendError;

pub use climatrend::*;

pub use analysis::aggregator::SeriesPoint;
pub use analysis::statistics::EntityStatistics;
pub use analysis::trend::{fit_trend, TrendResult};
pub use narrative::build_prompt;
pub use query::{Query, QueryError};
pub use store::{DatasetKind, DatasetStore, Observation, StoreError};

pub use analysis::error::AnalysisError;
pub use generation::error::GenerationError;
pub use generation::gemini::GeminiGenerator;
pub use generation::generator::TextGenerator;
