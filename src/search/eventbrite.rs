//! Eventbrite event search.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::config::ScoutConfig;
use crate::error::{Result, ScoutError};
use crate::provider::http::{error_body, join_url, shared_client};

use super::{
    error_report, normalize_location, or_unannounced, render_summaries, require_query,
    EventSearch, EventSummary, MAX_RESULTS,
};

const DEFAULT_BASE_URL: &str = "https://www.eventbriteapi.com";
const SEARCH_PATH: &str = "v3/events/search/";

/// Keyword search against the Eventbrite v3 API (Bearer token auth).
#[derive(Clone)]
pub struct EventbriteSearch {
    token: Option<String>,
    base_url: String,
}

impl EventbriteSearch {
    pub fn new(token: Option<String>, base_url: Option<String>) -> Self {
        Self {
            token,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }

    pub fn from_config(config: &ScoutConfig) -> Self {
        Self::new(
            config.get_api_key("eventbrite"),
            config.get_base_url("eventbrite"),
        )
    }

    fn query_params(query: &str, location: Option<&str>) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("q", query.to_string()),
            ("expand", "venue".to_string()),
            ("sort_by", "date".to_string()),
        ];
        if let Some(location) = location {
            params.push(("location.address", location.to_string()));
        }
        params
    }
}

impl std::fmt::Debug for EventbriteSearch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventbriteSearch")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| ".."))
            .finish()
    }
}

#[async_trait]
impl EventSearch for EventbriteSearch {
    fn source_name(&self) -> &str {
        "eventbrite"
    }

    async fn search(&self, query: &str, location: Option<&str>) -> Result<String> {
        let query = require_query(query)?;
        let location = normalize_location(location);
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| ScoutError::Authentication("Missing EVENTBRITE_API_KEY".into()))?;

        debug!(query, location, "Eventbrite search");

        let resp = shared_client()
            .get(join_url(&self.base_url, SEARCH_PATH))
            .bearer_auth(token)
            .query(&Self::query_params(query, location))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = error_body(resp).await;
            return Ok(error_report(status.as_u16(), &body));
        }

        let data: EventbriteResponse = resp.json().await?;
        let events = data
            .events
            .into_iter()
            .take(MAX_RESULTS)
            .map(|raw| serde_json::from_value::<EventbriteEvent>(raw).map(EventSummary::from))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(render_summaries(events))
    }
}

// Eventbrite API response types (internal)

#[derive(Deserialize)]
struct EventbriteResponse {
    #[serde(default)]
    events: Vec<Value>,
}

#[derive(Deserialize)]
struct EventbriteEvent {
    name: EventbriteText,
    start: EventbriteStart,
    #[serde(default)]
    venue: Option<EventbriteVenue>,
    url: String,
}

#[derive(Deserialize)]
struct EventbriteText {
    text: String,
}

#[derive(Deserialize)]
struct EventbriteStart {
    local: Option<String>,
}

#[derive(Deserialize)]
struct EventbriteVenue {
    #[serde(default)]
    address: Option<EventbriteAddress>,
}

#[derive(Deserialize)]
struct EventbriteAddress {
    localized_address_display: Option<String>,
}

impl From<EventbriteEvent> for EventSummary {
    fn from(event: EventbriteEvent) -> Self {
        let venue = event
            .venue
            .and_then(|v| v.address)
            .and_then(|a| a.localized_address_display);
        Self {
            name: event.name.text,
            date: or_unannounced(event.start.local),
            venue: or_unannounced(venue),
            url: event.url,
        }
    }
}
