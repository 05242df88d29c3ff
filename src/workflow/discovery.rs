//! Event discovery step: one model call, optional tool dispatch, reply append.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::{Node, NodeId, StepOutcome};
use crate::config::ScoutConfig;
use crate::error::{Result, ScoutError};
use crate::models::LanguageModel;
use crate::provider::{create_provider, ModelProvider, ProviderRequest};
use crate::tools::ToolRegistry;
use crate::types::{ConversationState, Credential, GenerationSettings, UserProfile};

/// The only reply a user sees when discovery fails for any reason.
pub const FALLBACK_REPLY: &str = "I'm sorry, I encountered an error. Please try again.";

/// Where the discovery step gets its model client from.
#[derive(Clone)]
pub enum ModelSource {
    /// Build a provider per run from config; the conversation credential,
    /// if any, overrides the configured key.
    Configured {
        model: LanguageModel,
        config: ScoutConfig,
    },
    /// Always use this provider.
    Fixed(Arc<dyn ModelProvider>),
}

impl ModelSource {
    pub fn resolve(&self, credential: Option<&Credential>) -> Result<Arc<dyn ModelProvider>> {
        match self {
            Self::Configured { model, config } => create_provider(model, config, credential),
            Self::Fixed(provider) => Ok(Arc::clone(provider)),
        }
    }
}

impl std::fmt::Debug for ModelSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configured { model, .. } => write!(f, "Configured({model})"),
            Self::Fixed(p) => write!(f, "Fixed({}:{})", p.provider_name(), p.model_id()),
        }
    }
}

/// System instruction for the discovery model call.
pub fn build_system_prompt(profile: &UserProfile) -> String {
    let interests = if profile.interests.is_empty() {
        "a bit of everything".to_string()
    } else {
        profile.interests_joined()
    };
    format!(
        "You are a helpful event discovery assistant. The user's profile shows they're \
         interested in {interests} and prefer {location} events with a {budget} budget.\n\n\
         Help them discover events. Be conversational, enthusiastic, and provide specific \
         recommendations when possible.\n\n\
         Use the Eventbrite and Ticketmaster tools when needed. Eventbrite is great for local \
         events, while Ticketmaster has big concerts and sports.",
        location = profile.location_preference_or_default(),
        budget = profile.budget_range_or_default(),
    )
}

/// Answers the latest user message, optionally through the search tools.
#[derive(Debug, Clone)]
pub struct EventDiscoveryNode {
    model: ModelSource,
    tools: ToolRegistry,
    settings: GenerationSettings,
}

impl EventDiscoveryNode {
    pub fn new(model: ModelSource, tools: ToolRegistry) -> Self {
        Self {
            model,
            tools,
            settings: GenerationSettings::discovery_defaults(),
        }
    }

    pub fn with_settings(mut self, settings: GenerationSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Compute the assistant replies for this turn without touching state.
    async fn discover(&self, state: &ConversationState) -> Result<Vec<String>> {
        let provider = self.model.resolve(state.credential())?;

        let request = ProviderRequest {
            system: Some(build_system_prompt(&state.profile)),
            messages: state.messages().to_vec(),
            tools: self.tools.definitions(),
            settings: self.settings.clone(),
        };

        debug!(
            provider = provider.provider_name(),
            model = provider.model_id(),
            history = request.messages.len(),
            "requesting discovery completion"
        );
        let response = provider.generate_text(&request).await?;

        if !response.has_tool_calls() {
            if response.text.trim().is_empty() {
                return Err(ScoutError::provider(
                    provider.provider_name(),
                    "model returned neither text nor tool calls",
                ));
            }
            return Ok(vec![response.text]);
        }

        let mut replies = Vec::with_capacity(response.tool_calls.len());
        for call in &response.tool_calls {
            let outcome = self.tools.dispatch(call).await?;
            replies.push(outcome.render());
        }
        Ok(replies)
    }
}

#[async_trait]
impl Node for EventDiscoveryNode {
    fn id(&self) -> NodeId {
        NodeId::EventDiscovery
    }

    async fn run(&self, state: &mut ConversationState) -> StepOutcome {
        if state.latest_user_message().is_none() {
            return StepOutcome::Skipped {
                reason: "no user message to respond to".into(),
            };
        }

        match self.discover(state).await {
            Ok(replies) => {
                let appended = replies.len();
                for reply in replies {
                    state.push_assistant(reply);
                }
                StepOutcome::Completed { appended }
            }
            Err(e) => {
                warn!(error = %e, category = %e.category(), "event discovery failed");
                state.push_assistant(FALLBACK_REPLY);
                StepOutcome::Recovered {
                    error: e.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_interpolates_profile() {
        let profile = UserProfile {
            interests: vec!["music".into(), "tech".into()],
            location_preference: Some("outdoor".into()),
            budget_range: Some("low".into()),
            ..Default::default()
        };
        let prompt = build_system_prompt(&profile);
        assert!(prompt.contains("interested in music, tech"));
        assert!(prompt.contains("prefer outdoor events with a low budget"));
    }

    #[test]
    fn prompt_defaults_for_empty_profile() {
        let prompt = build_system_prompt(&UserProfile::default());
        assert!(prompt.contains("interested in a bit of everything"));
        assert!(prompt.contains("prefer indoor events with a medium budget"));
    }

    #[tokio::test]
    async fn missing_key_recovers_with_fallback() {
        let model: LanguageModel = "acme:rocket".parse().unwrap();
        let node = EventDiscoveryNode::new(
            ModelSource::Configured {
                model,
                config: ScoutConfig::new(),
            },
            ToolRegistry::new(),
        );
        let mut state = ConversationState::new();
        state.push_user("anything on tonight?");

        let outcome = node.run(&mut state).await;

        assert!(matches!(outcome, StepOutcome::Recovered { .. }));
        assert_eq!(state.messages().len(), 2);
        assert_eq!(state.messages()[1].content(), FALLBACK_REPLY);
    }
}
