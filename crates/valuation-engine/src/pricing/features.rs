//! Feature encoding for the market-feature price model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, ValuationError};

/// Cities known to the price model, in encoding order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum City {
    Boston,
    Chicago,
    Dallas,
    Denver,
    Houston,
    #[serde(rename = "Los Angeles")]
    LosAngeles,
    Miami,
    #[serde(rename = "New York City")]
    NewYorkCity,
    #[serde(rename = "San Francisco")]
    SanFrancisco,
    Seattle,
}

impl City {
    pub const COUNT: usize = 10;

    /// Get all cities in encoding order
    pub fn all() -> [City; Self::COUNT] {
        [
            City::Boston,
            City::Chicago,
            City::Dallas,
            City::Denver,
            City::Houston,
            City::LosAngeles,
            City::Miami,
            City::NewYorkCity,
            City::SanFrancisco,
            City::Seattle,
        ]
    }

    /// Get city display name
    pub fn name(&self) -> &'static str {
        match self {
            City::Boston => "Boston",
            City::Chicago => "Chicago",
            City::Dallas => "Dallas",
            City::Denver => "Denver",
            City::Houston => "Houston",
            City::LosAngeles => "Los Angeles",
            City::Miami => "Miami",
            City::NewYorkCity => "New York City",
            City::SanFrancisco => "San Francisco",
            City::Seattle => "Seattle",
        }
    }

    /// Position of this city's slot in the one-hot block
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn one_hot(&self) -> [f64; Self::COUNT] {
        let mut encoded = [0.0; Self::COUNT];
        encoded[self.index()] = 1.0;
        encoded
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for City {
    type Err = ValuationError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::all()
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValuationError::UnknownCity(s.to_string()))
    }
}

const NUMERIC_FEATURES: [&str; 7] = [
    "rental_yield",
    "appreciation_rate",
    "crime_rate",
    "aqi",
    "transport_score",
    "school_rating",
    "walkability",
];

/// Total width of an encoded feature vector
pub const FEATURE_COUNT: usize = NUMERIC_FEATURES.len() + City::COUNT;

/// Column names of an encoded feature vector, in order
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "rental_yield",
    "appreciation_rate",
    "crime_rate",
    "aqi",
    "transport_score",
    "school_rating",
    "walkability",
    "city_Boston",
    "city_Chicago",
    "city_Dallas",
    "city_Denver",
    "city_Houston",
    "city_Los Angeles",
    "city_Miami",
    "city_New York City",
    "city_San Francisco",
    "city_Seattle",
];

/// Market indicators for one property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketFeatures {
    pub rental_yield: f64,
    pub appreciation_rate: f64,
    pub crime_rate: f64,
    pub aqi: f64,
    pub transport_score: f64,
    pub school_rating: f64,
    pub walkability: f64,
    pub city: City,
}

impl MarketFeatures {
    fn numeric(&self) -> [f64; 7] {
        [
            self.rental_yield,
            self.appreciation_rate,
            self.crime_rate,
            self.aqi,
            self.transport_score,
            self.school_rating,
            self.walkability,
        ]
    }

    /// Encode into the model's feature order
    pub fn to_vector(&self) -> Result<Vec<f64>> {
        let numeric = self.numeric();
        if let Some((name, value)) = NUMERIC_FEATURES
            .iter()
            .zip(numeric)
            .find(|(_, v)| !v.is_finite())
        {
            return Err(ValuationError::validation(
                *name,
                format!("must be a finite number, got {value}"),
            ));
        }

        let mut vector = Vec::with_capacity(FEATURE_COUNT);
        vector.extend_from_slice(&numeric);
        vector.extend_from_slice(&self.city.one_hot());
        Ok(vector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(city: City) -> MarketFeatures {
        MarketFeatures {
            rental_yield: 5.2,
            appreciation_rate: 3.1,
            crime_rate: 22.0,
            aqi: 41.0,
            transport_score: 78.0,
            school_rating: 8.0,
            walkability: 85.0,
            city,
        }
    }

    #[test]
    fn test_feature_names_match_encoding_order() {
        assert_eq!(FEATURE_NAMES.len(), FEATURE_COUNT);
        assert_eq!(&FEATURE_NAMES[..7], &NUMERIC_FEATURES);
        for city in City::all() {
            assert_eq!(FEATURE_NAMES[7 + city.index()], format!("city_{city}"));
        }
    }

    #[test]
    fn test_one_hot_indices_are_unique() {
        for (i, city) in City::all().into_iter().enumerate() {
            assert_eq!(city.index(), i);
            let encoded = city.one_hot();
            assert_eq!(encoded.iter().sum::<f64>(), 1.0);
            assert_eq!(encoded[i], 1.0);
        }
    }

    #[test]
    fn test_to_vector() {
        let vector = features(City::Miami).to_vector().unwrap();
        assert_eq!(vector.len(), FEATURE_COUNT);
        assert_eq!(&vector[..7], &[5.2, 3.1, 22.0, 41.0, 78.0, 8.0, 85.0]);
        assert_eq!(vector[7 + City::Miami.index()], 1.0);
        assert_eq!(vector[7..].iter().sum::<f64>(), 1.0);
    }

    #[test]
    fn test_non_finite_feature_rejected() {
        let mut bad = features(City::Boston);
        bad.aqi = f64::NAN;
        let err = bad.to_vector().unwrap_err();
        assert!(matches!(&err, ValuationError::Validation { field, .. } if field == "aqi"));
    }

    #[test]
    fn test_city_parsing() {
        assert_eq!("new york city".parse::<City>().unwrap(), City::NewYorkCity);
        assert_eq!(" Seattle".parse::<City>().unwrap(), City::Seattle);
        assert!(matches!(
            "Atlantis".parse::<City>(),
            Err(ValuationError::UnknownCity(c)) if c == "Atlantis"
        ));
        assert_eq!(
            serde_json::from_str::<City>("\"San Francisco\"").unwrap(),
            City::SanFrancisco
        );
    }
}
