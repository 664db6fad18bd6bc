//! Valuation Engine - runs normalizer, estimator, adjustment and composer

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::summary::SampleSummary;
use crate::config::{EngineConfig, ValuationTables};
use crate::error::{Result, ValuationError};
use crate::model::PropertyDescription;
use crate::pipeline::{ValuationResult, adjust, compose, estimate_base, normalize, round_to};
use crate::random::{RandomSource, RngSource};

/// Liveness payload reported to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub model: String,
}

/// Stateless valuation engine
///
/// Cloning is cheap; clones share the same validated configuration, which is
/// never mutated after construction.
#[derive(Debug, Clone)]
pub struct ValuationEngine {
    config: Arc<EngineConfig>,
}

impl Default for ValuationEngine {
    fn default() -> Self {
        Self {
            config: Arc::new(EngineConfig::default()),
        }
    }
}

impl ValuationEngine {
    /// Create an engine over the given tables
    pub fn new(tables: ValuationTables) -> Result<Self> {
        Self::with_config(EngineConfig::builder().tables(tables).build()?)
    }

    /// Create an engine from a full configuration
    pub fn with_config(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        info!(model = %config.model_name, "Valuation engine ready");
        Ok(Self {
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn tables(&self) -> &ValuationTables {
        &self.config.tables
    }

    /// Evaluate a raw property description with a fresh thread-local generator
    pub fn evaluate(&self, raw: &Value) -> Result<ValuationResult> {
        self.evaluate_with(raw, &mut RngSource::thread())
    }

    /// Evaluate a raw property description with an injected random source
    #[instrument(skip_all)]
    pub fn evaluate_with<R: RandomSource + ?Sized>(
        &self,
        raw: &Value,
        rng: &mut R,
    ) -> Result<ValuationResult> {
        let description = normalize(raw).inspect_err(|e| {
            warn!(error = %e, "Rejected property description");
        })?;
        self.evaluate_description(&description, rng)
    }

    /// Run the valuation stages for an already validated description
    #[instrument(
        skip_all,
        fields(
            category = %description.property_category(),
            grade = %description.location_grade(),
        )
    )]
    pub fn evaluate_description<R: RandomSource + ?Sized>(
        &self,
        description: &PropertyDescription,
        rng: &mut R,
    ) -> Result<ValuationResult> {
        let tables = self.tables();
        let category = description.property_category();
        let grade = description.location_grade();
        check_value_range(description, tables).inspect_err(|e| {
            warn!(error = %e, "Rejected property size");
        })?;

        let base = estimate_base(description.size_area(), category, tables, rng)?;
        let adjusted = adjust(&base, grade, tables, rng)?;
        let result = compose(category, grade, &adjusted, tables, rng)?;

        info!(
            size_area = description.size_area(),
            predicted_value = result.predicted_value(),
            predicted_roi = result.predicted_roi(),
            market_trend = %result.market_trend(),
            "Valuation complete"
        );
        Ok(result)
    }

    /// Run `count` independent valuations and summarize the spread
    pub fn sample(&self, description: &PropertyDescription, count: usize) -> Result<SampleSummary> {
        self.sample_with(description, count, &mut RngSource::thread())
    }

    /// [`ValuationEngine::sample`] with an injected random source
    pub fn sample_with<R: RandomSource + ?Sized>(
        &self,
        description: &PropertyDescription,
        count: usize,
        rng: &mut R,
    ) -> Result<SampleSummary> {
        if count == 0 {
            return Err(ValuationError::validation(
                "count",
                "must be greater than zero",
            ));
        }

        let mut summary = SampleSummary::new();
        for _ in 0..count {
            summary.record(&self.evaluate_description(description, rng)?);
        }
        Ok(summary)
    }

    /// Health check payload
    pub fn health(&self) -> HealthStatus {
        HealthStatus {
            status: "healthy".to_string(),
            model: self.config.model_name.clone(),
        }
    }
}

/// Reject sizes whose value range cannot produce a positive, finite amount
fn check_value_range(description: &PropertyDescription, tables: &ValuationTables) -> Result<()> {
    let bounds = tables.value_bounds(
        description.size_area(),
        description.property_category(),
        description.location_grade(),
    )?;
    if round_to(bounds.min, 2) <= 0.0 {
        return Err(ValuationError::validation(
            "size_area",
            "too small to produce a value above 0.00",
        ));
    }
    if !bounds.max.is_finite() {
        return Err(ValuationError::validation(
            "size_area",
            "too large to produce a finite value",
        ));
    }
    Ok(())
}
