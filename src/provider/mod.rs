//! Model provider trait and implementations.

pub mod http;

#[cfg(feature = "openai")]
pub mod openai;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::ScoutConfig;
use crate::error::ScoutError;
use crate::models::LanguageModel;
use crate::types::{Credential, FinishReason, GenerationSettings, Message, Usage};

/// A request sent to a model provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRequest {
    /// System-level instruction, sent ahead of the history.
    pub system: Option<String>,
    pub messages: Vec<Message>,
    pub tools: Vec<ToolDefinition>,
    pub settings: GenerationSettings,
}

/// Tool definition sent to the provider API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// A tool call requested by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub arguments: serde_json::Value,
}

impl ToolCall {
    pub fn new(name: impl Into<String>, arguments: serde_json::Value) -> Self {
        Self {
            id: format!("call_{}", uuid::Uuid::new_v4().simple()),
            name: name.into(),
            arguments,
        }
    }
}

/// Response from a provider: either free text or a list of tool selections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderResponse {
    pub text: String,
    pub tool_calls: Vec<ToolCall>,
    pub finish_reason: Option<FinishReason>,
    pub usage: Usage,
}

impl ProviderResponse {
    /// A plain text reply.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            finish_reason: Some(FinishReason::Stop),
            ..Default::default()
        }
    }

    /// A reply that selects tools.
    pub fn tool_calls(calls: Vec<ToolCall>) -> Self {
        Self {
            tool_calls: calls,
            finish_reason: Some(FinishReason::ToolCalls),
            ..Default::default()
        }
    }

    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

/// Core trait implemented by all model providers.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Provider name (e.g., "openai").
    fn provider_name(&self) -> &str;

    /// The model ID this provider instance serves.
    fn model_id(&self) -> &str;

    /// Generate a completion (non-streaming).
    async fn generate_text(&self, request: &ProviderRequest)
        -> Result<ProviderResponse, ScoutError>;
}

/// Create a provider for the given model.
///
/// A conversation credential, when given, takes precedence over the key in
/// `config`.
#[allow(unused_variables)]
pub fn create_provider(
    model: &LanguageModel,
    config: &ScoutConfig,
    credential: Option<&Credential>,
) -> Result<Arc<dyn ModelProvider>, ScoutError> {
    let override_key = credential.map(|c| c.expose().to_string());
    match model {
        #[cfg(feature = "openai")]
        LanguageModel::OpenAi(m) => {
            let api_key = override_key
                .or_else(|| config.get_api_key("openai"))
                .ok_or_else(|| ScoutError::Authentication("Missing OPENAI_API_KEY".into()))?;
            Ok(Arc::new(openai::OpenAiProvider::new(
                m.as_str(),
                api_key,
                config.get_base_url("openai"),
            )))
        }
        #[cfg(feature = "openai-compatible")]
        LanguageModel::OpenAiCompatible(m) => {
            let api_key = override_key
                .or_else(|| config.get_api_key("openai-compatible"))
                .or_else(|| config.get_api_key("openai"))
                .ok_or_else(|| {
                    ScoutError::Authentication("Missing OPENAI_COMPAT_API_KEY".into())
                })?;
            let base_url = m
                .base_url
                .clone()
                .or_else(|| config.get_base_url("openai-compatible"))
                .ok_or_else(|| {
                    ScoutError::Configuration("Missing OPENAI_COMPAT_BASE_URL".into())
                })?;
            Ok(Arc::new(
                openai::OpenAiProvider::new(m.model_id.clone(), api_key, Some(base_url))
                    .with_provider_name("openai-compatible"),
            ))
        }
        LanguageModel::Custom { provider, .. } => Err(ScoutError::ModelNotFound(format!(
            "No built-in provider for '{provider}'. Use openai or openai-compatible."
        ))),
    }
}
