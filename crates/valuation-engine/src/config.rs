//! Configuration for valuation operations
//!
//! [`ValuationTables`] holds every range the pipeline samples from. It is
//! built once at startup, validated, and then shared read-only across
//! requests. [`EngineConfig`] wraps the tables together with engine-level
//! settings.

use crate::error::{Result, ValuationError};
use crate::model::{LocationGrade, MarketTrend, PropertyCategory};
use crate::random::RandomSource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Default model label reported by the health check
pub const DEFAULT_MODEL_NAME: &str = "PropertyValuationModel v1.0";

const WEIGHT_TOLERANCE: f64 = 1e-9;

/// Closed interval `[min, max]` to sample from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// One uniform draw from the range
    pub fn sample<R: RandomSource + ?Sized>(&self, rng: &mut R) -> f64 {
        rng.uniform(self.min, self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Shift both bounds by `offset`
    pub fn shifted(&self, offset: f64) -> Self {
        Self::new(self.min + offset, self.max + offset)
    }

    fn validate(&self, name: &str) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(ValuationError::ConfigError(format!(
                "{name}: bounds must be finite"
            )));
        }
        if self.min > self.max {
            return Err(ValuationError::ConfigError(format!(
                "{name}: min {} exceeds max {}",
                self.min, self.max
            )));
        }
        Ok(())
    }

    fn validate_positive(&self, name: &str) -> Result<()> {
        self.validate(name)?;
        if self.min <= 0.0 {
            return Err(ValuationError::ConfigError(format!(
                "{name}: bounds must be strictly positive"
            )));
        }
        Ok(())
    }

    fn validate_unit(&self, name: &str) -> Result<()> {
        self.validate(name)?;
        if self.min < 0.0 || self.max > 1.0 {
            return Err(ValuationError::ConfigError(format!(
                "{name}: bounds must lie within [0, 1]"
            )));
        }
        Ok(())
    }
}

/// Sampling weights for the market trend label
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendWeights {
    pub rising: f64,
    pub stable: f64,
    pub cooling: f64,
}

impl Default for TrendWeights {
    fn default() -> Self {
        Self {
            rising: 0.5,
            stable: 0.3,
            cooling: 0.2,
        }
    }
}

impl TrendWeights {
    /// Weights in [`MarketTrend::all`] order
    pub fn as_array(&self) -> [f64; 3] {
        [self.rising, self.stable, self.cooling]
    }

    pub fn weight(&self, trend: MarketTrend) -> f64 {
        match trend {
            MarketTrend::Rising => self.rising,
            MarketTrend::Stable => self.stable,
            MarketTrend::Cooling => self.cooling,
        }
    }

    fn validate(&self) -> Result<()> {
        let weights = self.as_array();
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(ValuationError::ConfigError(
                "trend_weights: weights must be finite and non-negative".to_string(),
            ));
        }
        let total: f64 = weights.iter().sum();
        if (total - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(ValuationError::ConfigError(format!(
                "trend_weights: weights must sum to 1.0, got {total}"
            )));
        }
        Ok(())
    }
}

/// Bands for the descriptive analysis scores
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubScoreRanges {
    pub location_score: ValueRange,
    pub market_demand: ValueRange,
    pub growth_potential: ValueRange,
}

impl Default for SubScoreRanges {
    fn default() -> Self {
        Self {
            location_score: ValueRange::new(0.6, 0.95),
            market_demand: ValueRange::new(0.7, 0.9),
            growth_potential: ValueRange::new(0.65, 0.95),
        }
    }
}

/// Lookup tables driving the valuation pipeline
///
/// Missing JSON fields fall back to the defaults, so a file only needs to
/// list what it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValuationTables {
    /// Price per unit area by property category
    pub price_per_area: BTreeMap<PropertyCategory, ValueRange>,

    /// Value multiplier by location grade
    pub location_multipliers: BTreeMap<LocationGrade, ValueRange>,

    /// ROI percentage range by property category
    pub roi_ranges: BTreeMap<PropertyCategory, ValueRange>,

    /// Additive ROI bonus by location grade (may be negative)
    pub roi_bonus: BTreeMap<LocationGrade, f64>,

    /// Market trend sampling weights
    pub trend_weights: TrendWeights,

    /// Market noise multiplier band
    pub market_noise: ValueRange,

    /// Confidence score band
    pub confidence: ValueRange,

    /// Descriptive sub-score bands
    pub sub_scores: SubScoreRanges,
}

impl Default for ValuationTables {
    fn default() -> Self {
        use LocationGrade::{Average, Developing, Good, Prime};
        use PropertyCategory::{Commercial, Industrial, Residential};

        Self {
            price_per_area: BTreeMap::from([
                (Residential, ValueRange::new(200.0, 400.0)),
                (Commercial, ValueRange::new(300.0, 600.0)),
                (Industrial, ValueRange::new(150.0, 300.0)),
            ]),
            location_multipliers: BTreeMap::from([
                (Prime, ValueRange::new(1.2, 1.4)),
                (Good, ValueRange::new(1.0, 1.2)),
                (Average, ValueRange::new(0.8, 1.0)),
                (Developing, ValueRange::new(0.6, 0.8)),
            ]),
            roi_ranges: BTreeMap::from([
                (Residential, ValueRange::new(4.0, 8.0)),
                (Commercial, ValueRange::new(6.0, 12.0)),
                (Industrial, ValueRange::new(5.0, 10.0)),
            ]),
            roi_bonus: BTreeMap::from([
                (Prime, 2.0),
                (Good, 1.0),
                (Average, 0.0),
                (Developing, -1.0),
            ]),
            trend_weights: TrendWeights::default(),
            market_noise: ValueRange::new(0.95, 1.05),
            confidence: ValueRange::new(0.85, 0.98),
            sub_scores: SubScoreRanges::default(),
        }
    }
}

fn missing(what: &str, key: impl std::fmt::Display) -> ValuationError {
    ValuationError::Computation(format!("no {what} configured for {key}"))
}

/// At load time a missing entry is a configuration problem
fn into_config_error(err: ValuationError) -> ValuationError {
    match err {
        ValuationError::Computation(msg) => ValuationError::ConfigError(msg),
        other => other,
    }
}

impl ValuationTables {
    /// Create a new tables builder seeded with the defaults
    pub fn builder() -> ValuationTablesBuilder {
        ValuationTablesBuilder::default()
    }

    /// Parse tables from JSON and validate them
    pub fn from_json_str(json: &str) -> Result<Self> {
        let tables: Self = serde_json::from_str(json)?;
        tables.validate()?;
        Ok(tables)
    }

    /// Load tables from a JSON file and validate them
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        tracing::debug!("Loading valuation tables from {}", path.display());
        Self::from_json_str(&contents)
    }

    /// Validate the tables
    ///
    /// Every enumeration member must have an entry, so that a validated table
    /// never yields a computation error for well-formed input.
    pub fn validate(&self) -> Result<()> {
        for category in PropertyCategory::all() {
            self.price_range(category)
                .map_err(into_config_error)?
                .validate_positive(&format!("price_per_area.{category}"))?;
            self.roi_range(category)
                .map_err(into_config_error)?
                .validate(&format!("roi_ranges.{category}"))?;
        }

        for grade in LocationGrade::all() {
            self.location_multiplier(grade)
                .map_err(into_config_error)?
                .validate_positive(&format!("location_multipliers.{grade}"))?;
            let bonus = self.roi_bonus(grade).map_err(into_config_error)?;
            if !bonus.is_finite() {
                return Err(ValuationError::ConfigError(format!(
                    "roi_bonus.{grade}: must be finite"
                )));
            }
        }

        self.trend_weights.validate()?;
        self.market_noise.validate_positive("market_noise")?;
        self.confidence.validate_unit("confidence")?;
        self.sub_scores
            .location_score
            .validate_unit("sub_scores.location_score")?;
        self.sub_scores
            .market_demand
            .validate_unit("sub_scores.market_demand")?;
        self.sub_scores
            .growth_potential
            .validate_unit("sub_scores.growth_potential")?;

        Ok(())
    }

    pub fn price_range(&self, category: PropertyCategory) -> Result<ValueRange> {
        self.price_per_area
            .get(&category)
            .copied()
            .ok_or_else(|| missing("price range", category))
    }

    pub fn location_multiplier(&self, grade: LocationGrade) -> Result<ValueRange> {
        self.location_multipliers
            .get(&grade)
            .copied()
            .ok_or_else(|| missing("location multiplier", grade))
    }

    pub fn roi_range(&self, category: PropertyCategory) -> Result<ValueRange> {
        self.roi_ranges
            .get(&category)
            .copied()
            .ok_or_else(|| missing("ROI range", category))
    }

    pub fn roi_bonus(&self, grade: LocationGrade) -> Result<f64> {
        self.roi_bonus
            .get(&grade)
            .copied()
            .ok_or_else(|| missing("ROI bonus", grade))
    }

    /// ROI bounds after the grade bonus is applied
    pub fn roi_bounds(
        &self,
        category: PropertyCategory,
        grade: LocationGrade,
    ) -> Result<ValueRange> {
        Ok(self.roi_range(category)?.shifted(self.roi_bonus(grade)?))
    }

    /// Extremes of the final value for a given size, category and grade
    pub fn value_bounds(
        &self,
        size_area: f64,
        category: PropertyCategory,
        grade: LocationGrade,
    ) -> Result<ValueRange> {
        let price = self.price_range(category)?;
        let location = self.location_multiplier(grade)?;
        let noise = self.market_noise;
        Ok(ValueRange::new(
            size_area * price.min * location.min * noise.min,
            size_area * price.max * location.max * noise.max,
        ))
    }
}

/// Builder for ValuationTables
#[derive(Debug, Default)]
pub struct ValuationTablesBuilder {
    tables: ValuationTables,
}

impl ValuationTablesBuilder {
    /// Set the price per area range for a category
    pub fn price_range(mut self, category: PropertyCategory, min: f64, max: f64) -> Self {
        self.tables
            .price_per_area
            .insert(category, ValueRange::new(min, max));
        self
    }

    /// Set the location multiplier range for a grade
    pub fn location_multiplier(mut self, grade: LocationGrade, min: f64, max: f64) -> Self {
        self.tables
            .location_multipliers
            .insert(grade, ValueRange::new(min, max));
        self
    }

    /// Set the ROI range for a category
    pub fn roi_range(mut self, category: PropertyCategory, min: f64, max: f64) -> Self {
        self.tables
            .roi_ranges
            .insert(category, ValueRange::new(min, max));
        self
    }

    /// Set the ROI bonus for a grade
    pub fn roi_bonus(mut self, grade: LocationGrade, bonus: f64) -> Self {
        self.tables.roi_bonus.insert(grade, bonus);
        self
    }

    /// Set the market trend weights
    pub fn trend_weights(mut self, rising: f64, stable: f64, cooling: f64) -> Self {
        self.tables.trend_weights = TrendWeights {
            rising,
            stable,
            cooling,
        };
        self
    }

    /// Set the market noise band
    pub fn market_noise(mut self, min: f64, max: f64) -> Self {
        self.tables.market_noise = ValueRange::new(min, max);
        self
    }

    /// Set the confidence band
    pub fn confidence(mut self, min: f64, max: f64) -> Self {
        self.tables.confidence = ValueRange::new(min, max);
        self
    }

    /// Set the sub-score bands
    pub fn sub_scores(mut self, ranges: SubScoreRanges) -> Self {
        self.tables.sub_scores = ranges;
        self
    }

    /// Build the tables
    pub fn build(self) -> Result<ValuationTables> {
        self.tables.validate()?;
        Ok(self.tables)
    }
}

/// Engine-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Model label reported by the health check
    pub model_name: String,

    /// Sampling tables
    pub tables: ValuationTables,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            model_name: DEFAULT_MODEL_NAME.to_string(),
            tables: ValuationTables::default(),
        }
    }
}

impl EngineConfig {
    /// Create a new configuration builder
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.model_name.trim().is_empty() {
            return Err(ValuationError::ConfigError(
                "model_name must not be empty".to_string(),
            ));
        }
        self.tables.validate()
    }
}

/// Builder for EngineConfig
#[derive(Debug, Default)]
pub struct EngineConfigBuilder {
    model_name: Option<String>,
    tables: Option<ValuationTables>,
}

impl EngineConfigBuilder {
    /// Set the model label
    pub fn model_name(mut self, name: impl Into<String>) -> Self {
        self.model_name = Some(name.into());
        self
    }

    /// Set the sampling tables
    pub fn tables(mut self, tables: ValuationTables) -> Self {
        self.tables = Some(tables);
        self
    }

    /// Load the model label from `VALUATION_MODEL_NAME` if set
    pub fn with_env(mut self) -> Self {
        if let Ok(name) = std::env::var("VALUATION_MODEL_NAME") {
            self.model_name = Some(name);
        }
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<EngineConfig> {
        let defaults = EngineConfig::default();

        let config = EngineConfig {
            model_name: self.model_name.unwrap_or(defaults.model_name),
            tables: self.tables.unwrap_or(defaults.tables),
        };

        config.validate()?;
        Ok(config)
    }
}
