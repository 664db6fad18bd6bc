//! Price model seam and a linear implementation

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::features::{FEATURE_COUNT, MarketFeatures};
use crate::error::{Result, ValuationError};

/// Anything that maps an encoded feature vector to a price
pub trait PriceModel: Send + Sync {
    fn predict(&self, features: &[f64]) -> Result<f64>;

    /// Encode and score in one step
    fn predict_features(&self, features: &MarketFeatures) -> Result<f64> {
        self.predict(&features.to_vector()?)
    }
}

/// `intercept + Σ coefficient_i · feature_i`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LinearModelParams")]
pub struct LinearPriceModel {
    intercept: f64,
    coefficients: Vec<f64>,
}

#[derive(Deserialize)]
struct LinearModelParams {
    intercept: f64,
    coefficients: Vec<f64>,
}

impl TryFrom<LinearModelParams> for LinearPriceModel {
    type Error = ValuationError;

    fn try_from(params: LinearModelParams) -> Result<Self> {
        Self::new(params.intercept, params.coefficients)
    }
}

impl LinearPriceModel {
    /// Build a model, checking it matches the feature layout
    pub fn new(intercept: f64, coefficients: Vec<f64>) -> Result<Self> {
        if coefficients.len() != FEATURE_COUNT {
            return Err(ValuationError::ConfigError(format!(
                "expected {FEATURE_COUNT} coefficients, got {}",
                coefficients.len()
            )));
        }
        if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ValuationError::ConfigError(
                "model parameters must be finite".to_string(),
            ));
        }
        Ok(Self {
            intercept,
            coefficients,
        })
    }

    /// Load coefficients from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }
}

impl PriceModel for LinearPriceModel {
    fn predict(&self, features: &[f64]) -> Result<f64> {
        if features.len() != self.coefficients.len() {
            return Err(ValuationError::Computation(format!(
                "feature vector has {} entries, model expects {}",
                features.len(),
                self.coefficients.len()
            )));
        }

        let price = self.intercept
            + self
                .coefficients
                .iter()
                .zip(features)
                .map(|(c, x)| c * x)
                .sum::<f64>();

        if !price.is_finite() {
            return Err(ValuationError::Computation(format!(
                "model produced a non-finite price {price}"
            )));
        }
        tracing::debug!(price, "Scored market features");
        Ok(price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::City;
    use std::io::Write;

    fn model() -> LinearPriceModel {
        let mut coefficients = vec![0.0; FEATURE_COUNT];
        coefficients[0] = 10_000.0; // rental_yield
        coefficients[6] = 1_000.0; // walkability
        coefficients[7 + City::Boston.index()] = 50_000.0;
        LinearPriceModel::new(100_000.0, coefficients).unwrap()
    }

    fn features(city: City) -> MarketFeatures {
        MarketFeatures {
            rental_yield: 5.0,
            appreciation_rate: 3.0,
            crime_rate: 20.0,
            aqi: 40.0,
            transport_score: 70.0,
            school_rating: 7.0,
            walkability: 80.0,
            city,
        }
    }

    #[test]
    fn test_predict_features() {
        let model = model();
        assert_eq!(model.predict_features(&features(City::Boston)).unwrap(), 280_000.0);
        assert_eq!(model.predict_features(&features(City::Denver)).unwrap(), 230_000.0);
    }

    #[test]
    fn test_wrong_width_rejected() {
        assert!(matches!(
            LinearPriceModel::new(0.0, vec![1.0; 7]),
            Err(ValuationError::ConfigError(_))
        ));
        assert!(matches!(
            model().predict(&[1.0, 2.0]),
            Err(ValuationError::Computation(_))
        ));
    }

    #[test]
    fn test_deserialize_validates() {
        let json = format!(
            r#"{{ "intercept": 1.0, "coefficients": {:?} }}"#,
            vec![0.5; FEATURE_COUNT]
        );
        let model: LinearPriceModel = serde_json::from_str(&json).unwrap();
        assert_eq!(model.coefficients().len(), FEATURE_COUNT);

        let short = r#"{ "intercept": 1.0, "coefficients": [1.0, 2.0] }"#;
        assert!(serde_json::from_str::<LinearPriceModel>(short).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string(&model()).unwrap().as_bytes())
            .unwrap();

        let loaded = LinearPriceModel::from_json_file(file.path()).unwrap();
        assert_eq!(loaded, model());
    }
}
