//! Adjustment engine: location multiplier followed by market noise

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::estimator::BaseEstimate;
use crate::config::ValuationTables;
use crate::error::{Result, ValuationError};
use crate::model::LocationGrade;
use crate::random::RandomSource;

/// Base value after both multiplicative adjustments
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdjustedValue {
    pub location_multiplier: f64,
    pub market_noise: f64,
    pub value: f64,
}

/// Apply the location multiplier for `grade`, then the market noise
pub fn adjust<R: RandomSource + ?Sized>(
    base: &BaseEstimate,
    grade: LocationGrade,
    tables: &ValuationTables,
    rng: &mut R,
) -> Result<AdjustedValue> {
    let location_multiplier = tables.location_multiplier(grade)?.sample(rng);
    let market_noise = tables.market_noise.sample(rng);
    let value = base.value * location_multiplier * market_noise;

    if !value.is_finite() || value <= 0.0 {
        return Err(ValuationError::validation(
            "size_area",
            format!(
                "adjusted value {value} out of range (base {}, x{location_multiplier})",
                base.value
            ),
        ));
    }

    debug!(%grade, location_multiplier, market_noise, value, "Applied adjustments");
    Ok(AdjustedValue {
        location_multiplier,
        market_noise,
        value,
    })
}
