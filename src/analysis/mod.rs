pub mod aggregator;
pub mod error;
pub mod selector;
pub mod statistics;
pub mod trend;
