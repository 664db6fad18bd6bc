//! Aggregate statistics over repeated valuations

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::MarketTrend;
use crate::pipeline::ValuationResult;

/// Spread of values, ROI and trends across a batch of valuations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleSummary {
    pub count: usize,
    pub min_value: f64,
    pub max_value: f64,
    pub mean_value: f64,
    pub min_roi: f64,
    pub max_roi: f64,
    pub mean_confidence: f64,
    pub trend_counts: BTreeMap<MarketTrend, usize>,
}

impl Default for SampleSummary {
    fn default() -> Self {
        Self {
            count: 0,
            min_value: f64::INFINITY,
            max_value: f64::NEG_INFINITY,
            mean_value: 0.0,
            min_roi: f64::INFINITY,
            max_roi: f64::NEG_INFINITY,
            mean_confidence: 0.0,
            trend_counts: BTreeMap::new(),
        }
    }
}

impl SampleSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one result into the summary
    pub fn record(&mut self, result: &ValuationResult) {
        self.count += 1;
        let n = self.count as f64;

        let value = result.predicted_value();
        self.min_value = self.min_value.min(value);
        self.max_value = self.max_value.max(value);
        self.mean_value += (value - self.mean_value) / n;

        let roi = result.predicted_roi();
        self.min_roi = self.min_roi.min(roi);
        self.max_roi = self.max_roi.max(roi);

        self.mean_confidence += (result.confidence_score() - self.mean_confidence) / n;

        *self.trend_counts.entry(result.market_trend()).or_insert(0) += 1;
    }

    /// Combine two partial summaries, e.g. from parallel workers
    pub fn merge(mut self, other: &SampleSummary) -> Self {
        if other.count == 0 {
            return self;
        }
        if self.count == 0 {
            return other.clone();
        }

        let total = (self.count + other.count) as f64;
        let (a, b) = (self.count as f64, other.count as f64);
        self.mean_value = (self.mean_value * a + other.mean_value * b) / total;
        self.mean_confidence = (self.mean_confidence * a + other.mean_confidence * b) / total;
        self.min_value = self.min_value.min(other.min_value);
        self.max_value = self.max_value.max(other.max_value);
        self.min_roi = self.min_roi.min(other.min_roi);
        self.max_roi = self.max_roi.max(other.max_roi);
        for (trend, n) in &other.trend_counts {
            *self.trend_counts.entry(*trend).or_insert(0) += n;
        }
        self.count += other.count;
        self
    }

    /// Observed share of a trend, 0 when empty
    pub fn trend_share(&self, trend: MarketTrend) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.trend_counts.get(&trend).copied().unwrap_or(0) as f64 / self.count as f64
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}
