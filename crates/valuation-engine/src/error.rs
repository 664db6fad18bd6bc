//! Error types for valuation operations

use thiserror::Error;

/// Valuation specific errors
#[derive(Debug, Error)]
pub enum ValuationError {
    /// Malformed or missing field in the raw property description
    #[error("Invalid {field}: {reason}")]
    Validation {
        field: String,
        reason: String,
    },

    /// Property category outside the configured enumeration
    #[error("Unknown property category: {0}")]
    UnknownCategory(String),

    /// Location grade outside the configured enumeration
    #[error("Unknown location grade: {0}")]
    UnknownLocationGrade(String),

    /// City outside the fixed encoding list
    #[error("Unknown city: {0}")]
    UnknownCity(String),

    /// Configuration is missing an entry an otherwise valid input needs
    #[error("Computation failed: {0}")]
    Computation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Reading a configuration file failed
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type alias for valuation operations
pub type Result<T> = std::result::Result<T, ValuationError>;

impl ValuationError {
    /// Shorthand for a validation failure on a named field
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Whether the caller can fix this by changing the request
    ///
    /// Presentation layers map these to 4xx-style responses; everything else
    /// is a configuration or code defect.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. }
                | Self::UnknownCategory(_)
                | Self::UnknownLocationGrade(_)
                | Self::UnknownCity(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ValuationError::UnknownCategory("unknown_type".to_string());
        assert_eq!(err.to_string(), "Unknown property category: unknown_type");

        let err = ValuationError::validation("size_area", "must be greater than zero");
        assert_eq!(err.to_string(), "Invalid size_area: must be greater than zero");

        let err = ValuationError::UnknownLocationGrade("suburban".to_string());
        assert_eq!(err.to_string(), "Unknown location grade: suburban");
    }

    #[test]
    fn test_client_error_classification() {
        assert!(ValuationError::validation("sqft", "missing").is_client_error());
        assert!(ValuationError::UnknownCategory("x".into()).is_client_error());
        assert!(ValuationError::UnknownLocationGrade("x".into()).is_client_error());
        assert!(ValuationError::UnknownCity("Paris".into()).is_client_error());
        assert!(!ValuationError::Computation("no ROI range".into()).is_client_error());
        assert!(!ValuationError::ConfigError("bad weights".into()).is_client_error());
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: ValuationError = json_err.into();
        assert!(matches!(err, ValuationError::JsonError(_)));
        assert!(!err.is_client_error());
    }
}
