//! Tool trait definition

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// A named operation that accepts and returns JSON
///
/// Each tool provides a name, a description, and a JSON schema for its input
/// so that callers can validate or advertise it.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Execute the tool with given parameters
    ///
    /// # Arguments
    ///
    /// * `params` - Tool input as JSON value (should match input_schema)
    async fn execute(&self, params: Value) -> Result<Value>;

    /// Get the tool's name
    fn name(&self) -> &str;

    /// Get the tool's description
    fn description(&self) -> &str;

    /// Get the tool's input schema (JSON Schema format)
    fn input_schema(&self) -> Value;
}
