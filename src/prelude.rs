//! Convenience re-exports for common use.

pub use crate::config::ScoutConfig;
pub use crate::error::{Result, ScoutError};
pub use crate::models::LanguageModel;
pub use crate::provider::{ModelProvider, ProviderRequest, ProviderResponse, ToolCall};
pub use crate::search::EventSearch;
pub use crate::session::{ChatSession, MemorySessionStore, SessionStore};
pub use crate::tools::{Tool, ToolRegistry};
pub use crate::types::{
    ConversationState, Credential, GenerationSettings, Message, Role, SurveyAnswers, UserProfile,
};
pub use crate::workflow::{RunReport, StepOutcome, Workflow, FALLBACK_REPLY};
