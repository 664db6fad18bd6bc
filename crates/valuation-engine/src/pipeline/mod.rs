//! The four valuation stages
//!
//! Data flows strictly forward: normalizer, base estimator, adjustment,
//! composer. Each stage is a pure function of its inputs, the tables and the
//! injected random source.

pub mod adjustment;
pub mod composer;
pub mod estimator;
pub mod normalizer;
pub mod result;

pub use adjustment::{AdjustedValue, adjust};
pub use composer::compose;
pub use estimator::{BaseEstimate, estimate_base};
pub use normalizer::normalize;
pub use result::{AnalysisScores, ValuationResult};

/// Round half away from zero to `places` decimals
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
