//! Event search adapters exposed to the model as tools.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::arguments::ToolArguments;
use super::registry::ToolRegistry;
use super::tool::{Tool, ToolExecutionContext};
use super::types::AgentToolParameters;
use crate::config::ScoutConfig;
use crate::error::{Result, ScoutError};
use crate::search::{EventSearch, EventbriteSearch, TicketmasterSearch};

pub const SEARCH_EVENTBRITE: &str = "search_eventbrite";
pub const SEARCH_TICKETMASTER: &str = "search_ticketmaster";

#[derive(Debug, Deserialize)]
struct SearchArgs {
    query: String,
    #[serde(default)]
    location: Option<String>,
}

/// A tool that runs one [`EventSearch`] adapter.
pub struct SearchTool {
    name: String,
    description: String,
    parameters: AgentToolParameters,
    search: Arc<dyn EventSearch>,
}

impl SearchTool {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        search: Arc<dyn EventSearch>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: search_parameters(),
            search,
        }
    }

    pub fn eventbrite(search: EventbriteSearch) -> Self {
        Self::new(
            SEARCH_EVENTBRITE,
            "Search for events on Eventbrite by keyword and optional location.",
            Arc::new(search),
        )
    }

    pub fn ticketmaster(search: TicketmasterSearch) -> Self {
        Self::new(
            SEARCH_TICKETMASTER,
            "Search for events on Ticketmaster by keyword and optional location.",
            Arc::new(search),
        )
    }
}

fn search_parameters() -> AgentToolParameters {
    AgentToolParameters::object()
        .string("query", "Keywords describing the events to find", true)
        .string("location", "City or address to search near", false)
        .build()
}

#[async_trait]
impl Tool for SearchTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn parameters(&self) -> &AgentToolParameters {
        &self.parameters
    }

    async fn execute(
        &self,
        args: &ToolArguments,
        ctx: &ToolExecutionContext,
    ) -> std::result::Result<serde_json::Value, ScoutError> {
        let args: SearchArgs = args.deserialize()?;
        let text = self
            .search
            .search(&args.query, args.location.as_deref())
            .await
            .map_err(|e| match e {
                // bad arguments stay attributable to the model
                invalid @ ScoutError::InvalidArgument(_) => invalid,
                other => {
                    debug!(
                        tool = %self.name,
                        call_id = %ctx.call_id,
                        source = self.search.source_name(),
                        category = %other.category(),
                        "event search failed"
                    );
                    ScoutError::ToolExecution {
                        tool_name: self.name.clone(),
                        message: other.to_string(),
                    }
                }
            })?;
        Ok(serde_json::Value::String(text))
    }
}

impl std::fmt::Debug for SearchTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchTool")
            .field("name", &self.name)
            .field("source", &self.search.source_name())
            .finish()
    }
}

/// The two event search tools, wired from config and validated.
pub fn event_search_registry(config: &ScoutConfig) -> Result<ToolRegistry> {
    let registry = ToolRegistry::new()
        .with_tool(Arc::new(SearchTool::eventbrite(EventbriteSearch::from_config(
            config,
        ))))?
        .with_tool(Arc::new(SearchTool::ticketmaster(
            TicketmasterSearch::from_config(config),
        )))?;
    registry.validate()?;
    Ok(registry)
}
