//! Market-feature price estimation
//!
//! Encodes seven numeric market indicators plus a one-hot city into a fixed
//! feature vector, and scores it with a [`PriceModel`].

pub mod features;
pub mod model;

pub use features::{City, FEATURE_COUNT, FEATURE_NAMES, MarketFeatures};
pub use model::{LinearPriceModel, PriceModel};
