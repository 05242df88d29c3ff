//! Tool system for function calling.

pub mod arguments;
pub mod registry;
pub mod search;
pub mod tool;
pub mod types;
pub mod validation;

pub use arguments::ToolArguments;
pub use registry::{ToolOutcome, ToolRegistry};
pub use search::{event_search_registry, SearchTool, SEARCH_EVENTBRITE, SEARCH_TICKETMASTER};
pub use tool::{Tool, ToolExecutionContext};
pub use types::AgentToolParameters;
