//! Model definitions and `provider:model` parsing.

#[cfg(feature = "openai")]
pub mod openai;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ScoutError;

/// Top-level language model enum, dispatching to provider-specific variants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "provider", content = "model")]
pub enum LanguageModel {
    #[cfg(feature = "openai")]
    OpenAi(openai::OpenAiModel),
    #[cfg(feature = "openai-compatible")]
    OpenAiCompatible(openai::OpenAiCompatibleModel),
    /// A provider this build has no client for.
    Custom { provider: String, model_id: String },
}

impl LanguageModel {
    /// Get the model's API identifier string.
    pub fn model_id(&self) -> &str {
        match self {
            #[cfg(feature = "openai")]
            Self::OpenAi(m) => m.as_str(),
            #[cfg(feature = "openai-compatible")]
            Self::OpenAiCompatible(m) => m.model_id.as_str(),
            Self::Custom { model_id, .. } => model_id,
        }
    }

    /// Get the provider name.
    pub fn provider_name(&self) -> &str {
        match self {
            #[cfg(feature = "openai")]
            Self::OpenAi(_) => "openai",
            #[cfg(feature = "openai-compatible")]
            Self::OpenAiCompatible(_) => "openai-compatible",
            Self::Custom { provider, .. } => provider,
        }
    }
}

impl fmt::Display for LanguageModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.provider_name(), self.model_id())
    }
}

impl FromStr for LanguageModel {
    type Err = ScoutError;

    /// Parse `provider:model_id`, e.g. `openai:gpt-4o-mini`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (provider, model_id) = s
            .split_once(':')
            .filter(|(p, m)| !p.is_empty() && !m.is_empty())
            .ok_or_else(|| {
                ScoutError::InvalidArgument(format!(
                    "Invalid model selector '{s}': expected 'provider:model_id'"
                ))
            })?;

        match provider {
            #[cfg(feature = "openai")]
            "openai" => {
                let m = openai::OpenAiModel::from_str(model_id)
                    .unwrap_or(openai::OpenAiModel::Custom(model_id.to_string()));
                Ok(Self::OpenAi(m))
            }
            #[cfg(feature = "openai-compatible")]
            "openai-compatible" | "openai_compatible" => Ok(Self::OpenAiCompatible(
                openai::OpenAiCompatibleModel::new(model_id, None),
            )),
            _ => Ok(Self::Custom {
                provider: provider.to_string(),
                model_id: model_id.to_string(),
            }),
        }
    }
}
