//! Analysis composer
//!
//! Derives ROI, market trend, confidence and the descriptive sub-scores, then
//! assembles the final [`ValuationResult`]. Draw order is fixed: ROI, trend,
//! confidence, location score, market demand, growth potential.

use chrono::Utc;
use tracing::debug;

use super::adjustment::AdjustedValue;
use super::result::{AnalysisScores, ValuationResult};
use super::round_to;
use crate::config::ValuationTables;
use crate::error::{Result, ValuationError};
use crate::model::{LocationGrade, MarketTrend, PropertyCategory};
use crate::random::RandomSource;

/// Compose the result for an adjusted value
pub fn compose<R: RandomSource + ?Sized>(
    category: PropertyCategory,
    grade: LocationGrade,
    adjusted: &AdjustedValue,
    tables: &ValuationTables,
    rng: &mut R,
) -> Result<ValuationResult> {
    let predicted_value = round_to(adjusted.value, 2);
    if !predicted_value.is_finite() || predicted_value <= 0.0 {
        return Err(ValuationError::validation(
            "size_area",
            format!("value {} rounds to {predicted_value}", adjusted.value),
        ));
    }

    // Not clamped: a negative bonus can push a low draw below zero
    let roi_range = tables.roi_range(category)?;
    let bonus = tables.roi_bonus(grade)?;
    let predicted_roi = round_to(roi_range.sample(rng) + bonus, 2);

    let market_trend = sample_trend(tables, rng)?;
    let confidence_score = round_to(tables.confidence.sample(rng), 4);

    let bands = &tables.sub_scores;
    let analysis = AnalysisScores {
        location_score: round_to(bands.location_score.sample(rng), 2),
        market_demand: round_to(bands.market_demand.sample(rng), 2),
        growth_potential: round_to(bands.growth_potential.sample(rng), 2),
    };

    debug!(
        %category,
        %grade,
        predicted_roi,
        %market_trend,
        confidence_score,
        "Composed analysis"
    );

    Ok(ValuationResult::new(
        predicted_value,
        predicted_roi,
        market_trend,
        confidence_score,
        Utc::now(),
        analysis,
    ))
}

fn sample_trend<R: RandomSource + ?Sized>(
    tables: &ValuationTables,
    rng: &mut R,
) -> Result<MarketTrend> {
    let trends = MarketTrend::all();
    rng.weighted_index(&tables.trend_weights.as_array())
        .and_then(|i| trends.get(i).copied())
        .ok_or_else(|| {
            ValuationError::Computation(format!(
                "market trend weights {:?} do not form a distribution",
                tables.trend_weights
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValueRange;
    use crate::random::{MockRandomSource, RngSource};
    use mockall::predicate::{always, eq};

    fn adjusted(value: f64) -> AdjustedValue {
        AdjustedValue {
            location_multiplier: 1.0,
            market_noise: 1.0,
            value,
        }
    }

    #[test]
    fn test_compose_rounds_each_field() {
        let mut rng = MockRandomSource::new();
        rng.expect_uniform()
            .with(eq(4.0), eq(8.0))
            .return_const(5.123_456);
        rng.expect_uniform()
            .with(eq(0.85), eq(0.98))
            .return_const(0.912_345_6);
        rng.expect_uniform()
            .with(eq(0.6), eq(0.95))
            .return_const(0.777);
        rng.expect_uniform()
            .with(eq(0.7), eq(0.9))
            .return_const(0.801);
        rng.expect_uniform()
            .with(eq(0.65), eq(0.95))
            .return_const(0.9449);
        rng.expect_weighted_index()
            .with(always())
            .times(1)
            .return_const(Some(1_usize));

        let before = Utc::now();
        let result = compose(
            PropertyCategory::Residential,
            LocationGrade::Good,
            &adjusted(371_234.567_8),
            &ValuationTables::default(),
            &mut rng,
        )
        .unwrap();

        assert_eq!(result.predicted_value(), 371_234.57);
        assert_eq!(result.predicted_roi(), 6.12);
        assert_eq!(result.market_trend(), MarketTrend::Stable);
        assert_eq!(result.confidence_score(), 0.9123);
        assert_eq!(result.analysis().location_score, 0.78);
        assert_eq!(result.analysis().market_demand, 0.8);
        assert_eq!(result.analysis().growth_potential, 0.94);
        assert!(result.valuation_timestamp() >= before);
    }

    #[test]
    fn test_negative_roi_is_not_clamped() {
        let tables = ValuationTables::builder()
            .roi_range(PropertyCategory::Industrial, 0.0, 0.5)
            .roi_bonus(LocationGrade::Developing, -1.0)
            .build()
            .unwrap();

        // Midpoint of every band: the ROI draw lands on 0.25
        let mut rng = MockRandomSource::new();
        rng.expect_uniform().returning(|low, high| (low + high) / 2.0);
        rng.expect_weighted_index().return_const(Some(0_usize));

        let result = compose(
            PropertyCategory::Industrial,
            LocationGrade::Developing,
            &adjusted(1000.0),
            &tables,
            &mut rng,
        )
        .unwrap();
        assert_eq!(result.predicted_roi(), -0.75);
    }

    #[test]
    fn test_roi_within_bonus_shifted_range() {
        let tables = ValuationTables::default();
        let mut rng = RngSource::seeded(99);

        for category in PropertyCategory::all() {
            for grade in LocationGrade::all() {
                let bounds = tables.roi_bounds(category, grade).unwrap();
                for _ in 0..200 {
                    let result =
                        compose(category, grade, &adjusted(1000.0), &tables, &mut rng).unwrap();
                    assert!(
                        bounds.contains(result.predicted_roi()),
                        "{category}/{grade}: {} outside {bounds:?}",
                        result.predicted_roi()
                    );
                }
            }
        }
    }

    #[test]
    fn test_scores_within_bands() {
        let tables = ValuationTables::default();
        let mut rng = RngSource::seeded(1234);

        for _ in 0..1000 {
            let result = compose(
                PropertyCategory::Commercial,
                LocationGrade::Average,
                &adjusted(5000.0),
                &tables,
                &mut rng,
            )
            .unwrap();

            assert!(tables.confidence.contains(result.confidence_score()));
            assert!((0.0..=1.0).contains(&result.confidence_score()));
            let scores = result.analysis();
            assert!(ValueRange::new(0.6, 0.95).contains(scores.location_score));
            assert!(ValueRange::new(0.7, 0.9).contains(scores.market_demand));
            assert!(ValueRange::new(0.65, 0.95).contains(scores.growth_potential));
        }
    }

    #[test]
    fn test_value_rounding_to_zero_is_size_error() {
        let mut rng = MockRandomSource::new();
        rng.expect_uniform().never();

        let err = compose(
            PropertyCategory::Residential,
            LocationGrade::Good,
            &adjusted(0.001),
            &ValuationTables::default(),
            &mut rng,
        )
        .unwrap_err();
        assert!(
            matches!(err, ValuationError::Validation { ref field, .. } if field == "size_area")
        );
    }

    #[test]
    fn test_missing_roi_range_is_not_defaulted() {
        let mut tables = ValuationTables::default();
        tables.roi_ranges.remove(&PropertyCategory::Commercial);
        let mut rng = MockRandomSource::new();
        rng.expect_uniform().never();
        rng.expect_weighted_index().never();

        let err = compose(
            PropertyCategory::Commercial,
            LocationGrade::Prime,
            &adjusted(1000.0),
            &tables,
            &mut rng,
        )
        .unwrap_err();
        assert!(matches!(err, ValuationError::Computation(msg) if msg.contains("commercial")));
    }

    #[test]
    fn test_degenerate_trend_weights() {
        let mut rng = MockRandomSource::new();
        rng.expect_uniform().returning(|low, _| low);
        rng.expect_weighted_index().return_const(None);

        let err = compose(
            PropertyCategory::Residential,
            LocationGrade::Good,
            &adjusted(1000.0),
            &ValuationTables::default(),
            &mut rng,
        )
        .unwrap_err();
        assert!(matches!(err, ValuationError::Computation(msg) if msg.contains("trend")));
    }
}
