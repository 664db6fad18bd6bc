//! Base value estimator

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ValuationTables;
use crate::error::{Result, ValuationError};
use crate::model::PropertyCategory;
use crate::random::RandomSource;

/// Unadjusted estimate together with the unit price it was drawn from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaseEstimate {
    pub unit_price: f64,
    pub value: f64,
}

/// Draw a unit price for the category and scale it by size
///
/// The unit price is drawn exactly once and carried in the result.
pub fn estimate_base<R: RandomSource + ?Sized>(
    size_area: f64,
    category: PropertyCategory,
    tables: &ValuationTables,
    rng: &mut R,
) -> Result<BaseEstimate> {
    let unit_price = tables.price_range(category)?.sample(rng);
    let value = size_area * unit_price;

    if !value.is_finite() || value <= 0.0 {
        return Err(ValuationError::validation(
            "size_area",
            format!("base value {value} out of range at {unit_price} per unit"),
        ));
    }

    debug!(%category, unit_price, value, "Estimated base value");
    Ok(BaseEstimate { unit_price, value })
}
