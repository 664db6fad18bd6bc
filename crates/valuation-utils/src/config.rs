//! Configuration management utilities

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Application name
    pub app_name: String,
    /// Environment (dev, prod, etc.)
    pub environment: String,
    /// Fallback tracing filter used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "property-valuation".to_string(),
            environment: "development".to_string(),
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    /// Build a config from defaults overridden by `VALUATION_ENV` and `RUST_LOG`
    pub fn from_env() -> Self {
        Self::default().merge_env(|key| std::env::var(key).ok())
    }

    fn merge_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(env) = lookup("VALUATION_ENV").filter(|v| !v.trim().is_empty()) {
            self.environment = env;
        }
        if let Some(filter) = lookup("RUST_LOG").filter(|v| !v.trim().is_empty()) {
            self.log_filter = filter;
        }
        self
    }

    /// Whether this is a production deployment
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
            || self.environment.eq_ignore_ascii_case("prod")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.app_name, "property-valuation");
        assert_eq!(config.log_filter, "info");
        assert!(!config.is_production());
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::default().merge_env(|key| match key {
            "VALUATION_ENV" => Some("prod".to_string()),
            "RUST_LOG" => Some("debug,valuation_engine=trace".to_string()),
            _ => None,
        });

        assert!(config.is_production());
        assert_eq!(config.log_filter, "debug,valuation_engine=trace");
    }

    #[test]
    fn test_blank_env_values_ignored() {
        let config = Config::default().merge_env(|_| Some("  ".to_string()));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Config::default());
    }
}
