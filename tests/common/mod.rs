//! Shared test helpers and mock provider.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use eventscout::error::ScoutError;
use eventscout::provider::{ModelProvider, ProviderRequest, ProviderResponse, ToolCall};
use eventscout::tools::ToolRegistry;
use eventscout::types::{FinishReason, SurveyAnswers, Usage};
use eventscout::workflow::{EventDiscoveryNode, ModelSource, ProfileIntakeNode, Workflow};

/// A provider that replays queued responses and records every request.
pub struct ScriptedProvider {
    responses: Mutex<VecDeque<Result<ProviderResponse, ScoutError>>>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl ScriptedProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Queue a text response.
    pub fn queue_text(&self, text: &str) {
        self.responses.lock().unwrap().push_back(Ok(ProviderResponse {
            text: text.to_string(),
            tool_calls: vec![],
            finish_reason: Some(FinishReason::Stop),
            usage: Usage {
                input_tokens: 10,
                output_tokens: 20,
                total_tokens: 30,
            },
        }));
    }

    /// Queue a response asking for the given tool calls.
    pub fn queue_tool_calls(&self, calls: Vec<ToolCall>) {
        self.responses.lock().unwrap().push_back(Ok(ProviderResponse {
            text: String::new(),
            tool_calls: calls,
            finish_reason: Some(FinishReason::ToolCalls),
            usage: Usage {
                input_tokens: 10,
                output_tokens: 5,
                total_tokens: 15,
            },
        }));
    }

    /// Queue a provider failure.
    pub fn queue_error(&self, error: ScoutError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> ProviderRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("provider was never called")
    }
}

#[async_trait]
impl ModelProvider for ScriptedProvider {
    fn provider_name(&self) -> &str {
        "scripted"
    }

    fn model_id(&self) -> &str {
        "scripted-model"
    }

    async fn generate_text(
        &self,
        request: &ProviderRequest,
    ) -> Result<ProviderResponse, ScoutError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(ProviderResponse::text("Mock response")))
    }
}

/// Workflow whose discovery step always talks to `provider`.
pub fn workflow_with(provider: Arc<ScriptedProvider>, tools: ToolRegistry) -> Workflow {
    Workflow::new(
        ProfileIntakeNode,
        EventDiscoveryNode::new(ModelSource::Fixed(provider), tools),
    )
}

/// Survey answers used by the end-to-end scenario.
pub fn music_survey() -> SurveyAnswers {
    SurveyAnswers {
        name: None,
        interests: Some(vec!["music".to_string()]),
        location_preference: Some("indoor".to_string()),
        budget_range: Some("medium".to_string()),
    }
}

/// One Eventbrite event as the API returns it.
pub fn eventbrite_event(i: usize) -> serde_json::Value {
    serde_json::json!({
        "name": {"text": format!("Concert {i}")},
        "start": {"local": format!("2026-11-{:02}T20:00:00", i + 1)},
        "venue": {"address": {"localized_address_display": "Brooklyn Steel, New York"}},
        "url": format!("https://www.eventbrite.com/e/{i}")
    })
}

/// One Ticketmaster event as the Discovery API returns it.
pub fn ticketmaster_event(i: usize) -> serde_json::Value {
    serde_json::json!({
        "name": format!("Arena Show {i}"),
        "dates": {"start": {"localDate": format!("2026-12-{:02}", i + 1)}},
        "_embedded": {"venues": [{"name": "Madison Square Garden"}]},
        "url": format!("https://www.ticketmaster.com/event/{i}")
    })
}
