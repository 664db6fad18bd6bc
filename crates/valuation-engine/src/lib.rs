//! Property valuation engine
//!
//! This crate estimates a monetary value and return profile for a described
//! property. Each request runs four stages in strict sequence:
//!
//! - Input normalization of the raw JSON description
//! - Base value estimation from size and property category
//! - Location and market-noise adjustment
//! - Analysis composition: ROI, market trend, confidence and sub-scores
//!
//! The procedure is randomized by design. Every stage draws through the
//! [`RandomSource`] trait, so tests can inject a seeded generator or a mock
//! while production uses a per-call thread-local generator.
//!
//! A sibling [`pricing`] module encodes market indicators and a one-hot city
//! for a pluggable [`PriceModel`].
//!
//! # Example
//!
//! ```rust
//! use valuation_engine::ValuationEngine;
//! use serde_json::json;
//!
//! let engine = ValuationEngine::default();
//! let result = engine.evaluate(&json!({
//!     "sqft": 1500,
//!     "property_type": "residential",
//!     "location_grade": "good",
//! }))?;
//!
//! assert!(result.predicted_value() > 0.0);
//! # Ok::<(), valuation_engine::ValuationError>(())
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod pricing;
pub mod random;
pub mod tools;

// Re-export main types for convenience
pub use config::{EngineConfig, TrendWeights, ValuationTables, ValueRange};
pub use engine::{HealthStatus, SampleSummary, ValuationEngine};
pub use error::{Result, ValuationError};
pub use model::{LocationGrade, MarketTrend, PropertyCategory, PropertyDescription};
pub use pipeline::{AnalysisScores, ValuationResult};
pub use pricing::{City, LinearPriceModel, MarketFeatures, PriceModel};
pub use random::{RandomSource, RngSource};
pub use tools::{Tool, ValuationTool};
