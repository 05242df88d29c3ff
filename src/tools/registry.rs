//! Closed registry of the tools a model may call.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use super::arguments::ToolArguments;
use super::tool::{Tool, ToolExecutionContext};
use super::validation::validate_arguments;
use crate::error::{Result, ScoutError};
use crate::provider::{ToolCall, ToolDefinition};

/// Result of dispatching one model tool call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolOutcome {
    /// The named tool ran and produced display text.
    Completed { name: String, output: String },
    /// The model asked for a tool that is not registered.
    Unknown { name: String },
}

impl ToolOutcome {
    pub fn name(&self) -> &str {
        match self {
            Self::Completed { name, .. } | Self::Unknown { name } => name,
        }
    }

    /// Message text appended to the conversation: `<tool_name> → <output>`.
    pub fn render(&self) -> String {
        match self {
            Self::Completed { name, output } => format!("{name} → {output}"),
            Self::Unknown { name } => format!("{name} → Unknown tool: {name}"),
        }
    }
}

/// Tools keyed by name, in registration order.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool. Names must be unique and usable as function names.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Result<()> {
        let name = tool.name();
        if !is_valid_tool_name(name) {
            return Err(ScoutError::Configuration(format!(
                "invalid tool name '{name}': use 1-64 of [A-Za-z0-9_-]"
            )));
        }
        if self.get(name).is_some() {
            return Err(ScoutError::Configuration(format!(
                "tool '{name}' registered twice"
            )));
        }
        self.tools.push(tool);
        Ok(())
    }

    /// Builder-style [`ToolRegistry::register`].
    pub fn with_tool(mut self, tool: Arc<dyn Tool>) -> Result<Self> {
        self.register(tool)?;
        Ok(self)
    }

    /// Startup check that there is something to offer the model.
    pub fn validate(&self) -> Result<()> {
        if self.tools.is_empty() {
            return Err(ScoutError::Configuration("no tools registered".into()));
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.iter().find(|t| t.name() == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Declarations sent to the model provider.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .iter()
            .map(|t| ToolDefinition {
                name: t.name().to_string(),
                description: t.description().to_string(),
                parameters: t.parameters().schema.clone(),
            })
            .collect()
    }

    /// Run one tool call.
    ///
    /// An unregistered name is not an error: it yields
    /// [`ToolOutcome::Unknown`]. Invalid arguments and tool failures are.
    pub async fn dispatch(&self, call: &ToolCall) -> Result<ToolOutcome> {
        let Some(tool) = self.get(&call.name) else {
            warn!(tool = %call.name, call_id = %call.id, "model requested unknown tool");
            return Ok(ToolOutcome::Unknown {
                name: call.name.clone(),
            });
        };

        let args = ToolArguments::new(call.arguments.clone());
        validate_arguments(tool.name(), args.raw(), &tool.parameters().schema)?;

        debug!(tool = %call.name, call_id = %call.id, "executing tool");
        let ctx = ToolExecutionContext {
            call_id: call.id.clone(),
        };
        let value = tool.execute(&args, &ctx).await?;

        Ok(ToolOutcome::Completed {
            name: call.name.clone(),
            output: value_to_text(&value),
        })
    }
}

fn is_valid_tool_name(name: &str) -> bool {
    (1..=64).contains(&name.len())
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn value_to_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_tags_output_with_tool_name() {
        let done = ToolOutcome::Completed {
            name: "search_ticketmaster".into(),
            output: "No events found.".into(),
        };
        assert_eq!(done.render(), "search_ticketmaster → No events found.");

        let unknown = ToolOutcome::Unknown {
            name: "book_flight".into(),
        };
        assert_eq!(unknown.render(), "book_flight → Unknown tool: book_flight");
        assert_eq!(unknown.name(), "book_flight");
    }

    #[test]
    fn tool_names_follow_function_name_rules() {
        assert!(is_valid_tool_name("search_eventbrite"));
        assert!(is_valid_tool_name("search-2"));
        assert!(!is_valid_tool_name(""));
        assert!(!is_valid_tool_name("has space"));
        assert!(!is_valid_tool_name(&"x".repeat(65)));
    }

    #[test]
    fn non_string_values_render_as_json() {
        assert_eq!(value_to_text(&serde_json::json!("plain")), "plain");
        assert_eq!(value_to_text(&serde_json::json!({"a": 1})), r#"{"a":1}"#);
    }

    #[test]
    fn empty_registry_fails_validation() {
        assert!(matches!(
            ToolRegistry::new().validate(),
            Err(ScoutError::Configuration(_))
        ));
    }
}
