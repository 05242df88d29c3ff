//! Error types for eventscout.

use thiserror::Error;

/// Primary error type for all eventscout operations.
///
/// None of these reach the caller of a workflow run: the discovery step
/// downgrades them to a fixed apology message. They exist so the fault can be
/// classified and logged before that happens.
#[derive(Error, Debug)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config file error: {0}")]
    ConfigFile(#[from] toml::de::Error),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Rate limited: retry after {retry_after_ms:?}ms")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Tool execution error: {tool_name}: {message}")]
    ToolExecution { tool_name: String, message: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Provider error: {provider}: {message}")]
    Provider { provider: String, message: String },

    #[error("Session store error: {0}")]
    Session(String),
}

/// Broad error category, used as a structured logging field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorCategory {
    Authentication,
    RateLimit,
    Network,
    Server,
    Api,
    Configuration,
    Serialization,
    ToolExecution,
    InvalidArgument,
    Unknown,
}

impl ScoutError {
    /// Create an API error.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a provider error.
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Authentication(_) => ErrorCategory::Authentication,
            Self::RateLimited { .. } => ErrorCategory::RateLimit,
            Self::Network(_) | Self::Io(_) => ErrorCategory::Network,
            Self::Configuration(_) | Self::ConfigFile(_) | Self::ModelNotFound(_) => {
                ErrorCategory::Configuration
            }
            Self::Serialization(_) => ErrorCategory::Serialization,
            Self::Api { status, .. } => match status {
                401 | 403 => ErrorCategory::Authentication,
                429 => ErrorCategory::RateLimit,
                500..=599 => ErrorCategory::Server,
                _ => ErrorCategory::Api,
            },
            Self::ToolExecution { .. } => ErrorCategory::ToolExecution,
            Self::InvalidArgument(_) => ErrorCategory::InvalidArgument,
            Self::Provider { .. } | Self::Session(_) => ErrorCategory::Unknown,
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ScoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_status_drives_category() {
        assert_eq!(ScoutError::api(401, "nope").category(), ErrorCategory::Authentication);
        assert_eq!(ScoutError::api(429, "slow down").category(), ErrorCategory::RateLimit);
        assert_eq!(ScoutError::api(503, "down").category(), ErrorCategory::Server);
        assert_eq!(ScoutError::api(400, "bad").category(), ErrorCategory::Api);
    }

    #[test]
    fn category_displays_snake_case() {
        assert_eq!(ErrorCategory::ToolExecution.to_string(), "tool_execution");
        assert_eq!(ErrorCategory::RateLimit.to_string(), "rate_limit");
    }

    #[test]
    fn tool_execution_message_names_the_tool() {
        let err = ScoutError::ToolExecution {
            tool_name: "search_eventbrite".into(),
            message: "boom".into(),
        };
        assert_eq!(
            err.to_string(),
            "Tool execution error: search_eventbrite: boom"
        );
    }
}
