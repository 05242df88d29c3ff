//! Typed access to tool call arguments.

use crate::error::ScoutError;

/// Wrapper around the arguments a model supplied for one tool call.
///
/// Providers sometimes deliver arguments as a JSON-encoded string instead of
/// an object; [`ToolArguments::new`] normalizes that case up front.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolArguments {
    value: serde_json::Value,
}

impl ToolArguments {
    pub fn new(value: serde_json::Value) -> Self {
        let value = match value {
            serde_json::Value::String(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    serde_json::json!({})
                } else {
                    serde_json::from_str(trimmed).unwrap_or(serde_json::Value::String(raw))
                }
            }
            serde_json::Value::Null => serde_json::json!({}),
            other => other,
        };
        Self { value }
    }

    /// Get the raw JSON value.
    pub fn raw(&self) -> &serde_json::Value {
        &self.value
    }

    /// Deserialize the entire arguments into a typed struct.
    pub fn deserialize<T: serde::de::DeserializeOwned>(&self) -> Result<T, ScoutError> {
        serde_json::from_value(self.value.clone()).map_err(|e| {
            ScoutError::InvalidArgument(format!("Failed to deserialize arguments: {e}"))
        })
    }
}
