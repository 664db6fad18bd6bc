//! Valuation Engine
//!
//! Entry point that runs the pipeline stages in order for each request

pub mod summary;
pub mod valuation_engine;

pub use summary::SampleSummary;
pub use valuation_engine::{HealthStatus, ValuationEngine};
