//! Valuation result types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::MarketTrend;

/// Descriptive scores attached to a valuation
///
/// These are explanatory only and never feed back into value or ROI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisScores {
    pub location_score: f64,
    pub market_demand: f64,
    pub growth_potential: f64,
}

/// Final output of one valuation request
///
/// Serialized field names match the valuation API payload, so the timestamp
/// is emitted as `valuation_date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationResult {
    predicted_value: f64,
    predicted_roi: f64,
    market_trend: MarketTrend,
    confidence_score: f64,
    #[serde(rename = "valuation_date")]
    valuation_timestamp: DateTime<Utc>,
    analysis: AnalysisScores,
}

impl ValuationResult {
    pub(crate) fn new(
        predicted_value: f64,
        predicted_roi: f64,
        market_trend: MarketTrend,
        confidence_score: f64,
        valuation_timestamp: DateTime<Utc>,
        analysis: AnalysisScores,
    ) -> Self {
        Self {
            predicted_value,
            predicted_roi,
            market_trend,
            confidence_score,
            valuation_timestamp,
            analysis,
        }
    }

    /// Estimated value, rounded to cents
    pub fn predicted_value(&self) -> f64 {
        self.predicted_value
    }

    /// Expected return on investment in percent; may be negative
    pub fn predicted_roi(&self) -> f64 {
        self.predicted_roi
    }

    pub fn market_trend(&self) -> MarketTrend {
        self.market_trend
    }

    pub fn confidence_score(&self) -> f64 {
        self.confidence_score
    }

    pub fn valuation_timestamp(&self) -> DateTime<Utc> {
        self.valuation_timestamp
    }

    pub fn analysis(&self) -> &AnalysisScores {
        &self.analysis
    }

    /// One-line human readable summary
    pub fn summary(&self) -> String {
        format!(
            "{:.2} | ROI {:.2}% | {} | confidence {:.1}% ({})",
            self.predicted_value,
            self.predicted_roi,
            self.market_trend,
            self.confidence_score * 100.0,
            self.valuation_timestamp.format("%Y-%m-%d %H:%M UTC")
        )
    }
}
