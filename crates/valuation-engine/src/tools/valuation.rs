//! Tool wrapping the valuation engine

use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Arc;

use super::tool::Tool;
use crate::engine::ValuationEngine;
use crate::error::Result;
use crate::model::{LocationGrade, PropertyCategory};

/// Property valuation exposed as a JSON tool
#[derive(Debug, Clone)]
pub struct ValuationTool {
    engine: Arc<ValuationEngine>,
}

impl ValuationTool {
    pub fn new(engine: Arc<ValuationEngine>) -> Self {
        Self { engine }
    }
}

#[async_trait]
impl Tool for ValuationTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let result = self.engine.evaluate(&params)?;
        Ok(serde_json::to_value(result)?)
    }

    fn name(&self) -> &str {
        "property_valuation"
    }

    fn description(&self) -> &str {
        "Estimate the market value of a property from its size, category and \
         location grade. Returns the predicted value, expected ROI, market trend, \
         a confidence score and location/demand/growth sub-scores."
    }

    fn input_schema(&self) -> Value {
        let categories: Vec<&str> = PropertyCategory::all().iter().map(|c| c.as_str()).collect();
        let grades: Vec<&str> = LocationGrade::all().iter().map(|g| g.as_str()).collect();

        json!({
            "type": "object",
            "properties": {
                "sqft": {
                    "type": "number",
                    "exclusiveMinimum": 0,
                    "description": "Floor area of the property"
                },
                "property_type": {
                    "type": "string",
                    "enum": categories,
                    "description": "Structural class of the property"
                },
                "location_grade": {
                    "type": "string",
                    "enum": grades,
                    "description": "Qualitative grade of the location"
                },
                "address": {
                    "type": "string",
                    "description": "Optional street address, informational only"
                }
            },
            "required": ["sqft", "property_type", "location_grade"]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValuationError;

    fn tool() -> ValuationTool {
        ValuationTool::new(Arc::new(ValuationEngine::default()))
    }

    #[tokio::test]
    async fn test_execute_returns_payload() {
        let output = tool()
            .execute(json!({
                "sqft": 1500,
                "property_type": "residential",
                "location_grade": "good",
                "address": "221B Baker St"
            }))
            .await
            .unwrap();

        let value = output["predicted_value"].as_f64().unwrap();
        assert!(value >= 1500.0 * 200.0 * 1.0 * 0.95);
        assert!(value <= 1500.0 * 400.0 * 1.2 * 1.05);
        assert!(output["market_trend"].is_string());
        assert!(output["valuation_date"].is_string());
        assert!(output["analysis"]["growth_potential"].is_number());
    }

    #[tokio::test]
    async fn test_execute_surfaces_error_kinds() {
        let err = tool()
            .execute(json!({
                "sqft": 1500,
                "property_type": "castle",
                "location_grade": "good"
            }))
            .await
            .unwrap_err();
        assert!(matches!(err, ValuationError::UnknownCategory(v) if v == "castle"));

        let err = tool().execute(json!({ "sqft": -3 })).await.unwrap_err();
        assert!(err.is_client_error());
    }

    #[test]
    fn test_schema_lists_enumerations() {
        let tool = tool();
        assert_eq!(tool.name(), "property_valuation");

        let schema = tool.input_schema();
        assert_eq!(
            schema["properties"]["property_type"]["enum"],
            json!(["residential", "commercial", "industrial"])
        );
        assert_eq!(
            schema["properties"]["location_grade"]["enum"],
            json!(["prime", "good", "average", "developing"])
        );
        assert_eq!(schema["required"].as_array().unwrap().len(), 3);
    }
}
