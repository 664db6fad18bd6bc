//! Property description and the closed enumerations it is built from

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, ValuationError};

/// Structural class of a property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyCategory {
    Residential,
    Commercial,
    Industrial,
}

impl PropertyCategory {
    /// Wire name of the category
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyCategory::Residential => "residential",
            PropertyCategory::Commercial => "commercial",
            PropertyCategory::Industrial => "industrial",
        }
    }

    /// Get all categories
    pub fn all() -> [PropertyCategory; 3] {
        [
            PropertyCategory::Residential,
            PropertyCategory::Commercial,
            PropertyCategory::Industrial,
        ]
    }
}

impl fmt::Display for PropertyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyCategory {
    type Err = ValuationError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::all()
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValuationError::UnknownCategory(s.to_string()))
    }
}

/// Qualitative location bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationGrade {
    Prime,
    Good,
    Average,
    Developing,
}

impl LocationGrade {
    /// Wire name of the grade
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationGrade::Prime => "prime",
            LocationGrade::Good => "good",
            LocationGrade::Average => "average",
            LocationGrade::Developing => "developing",
        }
    }

    /// Get all grades, best first
    pub fn all() -> [LocationGrade; 4] {
        [
            LocationGrade::Prime,
            LocationGrade::Good,
            LocationGrade::Average,
            LocationGrade::Developing,
        ]
    }
}

impl fmt::Display for LocationGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LocationGrade {
    type Err = ValuationError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::all()
            .into_iter()
            .find(|g| g.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValuationError::UnknownLocationGrade(s.to_string()))
    }
}

/// Simulated near-term market direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketTrend {
    Rising,
    Stable,
    Cooling,
}

impl MarketTrend {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketTrend::Rising => "rising",
            MarketTrend::Stable => "stable",
            MarketTrend::Cooling => "cooling",
        }
    }

    /// All trends in sampling order
    pub fn all() -> [MarketTrend; 3] {
        [MarketTrend::Rising, MarketTrend::Stable, MarketTrend::Cooling]
    }
}

impl fmt::Display for MarketTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated property attributes
///
/// Constructed through [`PropertyDescription::new`] or the input normalizer,
/// so `size_area` is always finite and strictly positive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyDescription {
    size_area: f64,
    property_category: PropertyCategory,
    location_grade: LocationGrade,
    address: Option<String>,
}

impl PropertyDescription {
    pub fn new(
        size_area: f64,
        property_category: PropertyCategory,
        location_grade: LocationGrade,
    ) -> Result<Self> {
        if !size_area.is_finite() {
            return Err(ValuationError::validation("size_area", "must be a finite number"));
        }
        if size_area <= 0.0 {
            return Err(ValuationError::validation(
                "size_area",
                format!("must be greater than zero, got {size_area}"),
            ));
        }

        Ok(Self {
            size_area,
            property_category,
            location_grade,
            address: None,
        })
    }

    /// Attach a free-text address; blank strings are dropped
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        let address = address.into();
        let trimmed = address.trim();
        self.address = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    pub fn size_area(&self) -> f64 {
        self.size_area
    }

    pub fn property_category(&self) -> PropertyCategory {
        self.property_category
    }

    pub fn location_grade(&self) -> LocationGrade {
        self.location_grade
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }
}
