//! Ticketmaster Discovery API event search.

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

const DEFAULT_BASE_URL: &str = "https://app.ticketmaster.com";
const SEARCH_PATH: &str = "discovery/v2/events.json";

/// Keyword search against the Ticketmaster Discovery v2 API (`apikey` query
/// parameter auth).
#[derive(Clone)]
pub struct TicketmasterSearch {
    api_key: Option<String>,
    base_url: String,
}

impl TicketmasterSearch {
    pub fn new(api_key: Option<String>, base_url: Option<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }

    pub fn from_config(config: &ScoutConfig) -> Self {
        Self::new(
            config.get_api_key("ticketmaster"),
            config.get_base_url("ticketmaster"),
        )
    }

    fn query_params(
        api_key: &str,
        query: &str,
        location: Option<&str>,
    ) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("apikey", api_key.to_string()),
            ("keyword", query.to_string()),
            ("size", MAX_RESULTS.to_string()),
        ];
        if let Some(location) = location {
            params.push(("city", location.to_string()));
        }
        params
    }
}

impl std::fmt::Debug for TicketmasterSearch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TicketmasterSearch")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| ".."))
            .finish()
    }
}

#[async_trait]
impl EventSearch for TicketmasterSearch {
    fn source_name(&self) -> &str {
        "ticketmaster"
    }

    async fn search(&self, query: &str, location: Option<&str>) -> Result<String> {
        let query = require_query(query)?;
        let location = normalize_location(location);
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ScoutError::Authentication("Missing TICKETMASTER_API_KEY".into()))?;

        debug!(query, location, "Ticketmaster search");

        let resp = shared_client()
            .get(join_url(&self.base_url, SEARCH_PATH))
            .query(&Self::query_params(api_key, query, location))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = error_body(resp).await;
            return Ok(error_report(status.as_u16(), &body));
        }

        let data: TicketmasterResponse = resp.json().await?;
        let events = data
            .embedded
            .map(|e| e.events)
            .unwrap_or_default()
            .into_iter()
            .take(MAX_RESULTS)
            .map(|raw| serde_json::from_value::<TicketmasterEvent>(raw).map(EventSummary::from))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(render_summaries(events))
    }
}

// Ticketmaster API response types (internal)

#[derive(Deserialize)]
struct TicketmasterResponse {
    #[serde(rename = "_embedded", default)]
    embedded: Option<TicketmasterEmbedded>,
}

#[derive(Deserialize)]
struct TicketmasterEmbedded {
    #[serde(default)]
    events: Vec<Value>,
}

#[derive(Deserialize)]
struct TicketmasterEvent {
    name: String,
    dates: TicketmasterDates,
    #[serde(rename = "_embedded", default)]
    embedded: Option<TicketmasterEventEmbedded>,
    url: String,
}

#[derive(Deserialize)]
struct TicketmasterDates {
    start: TicketmasterStart,
}

#[derive(Deserialize)]
struct TicketmasterStart {
    #[serde(rename = "localDate")]
    local_date: Option<String>,
}

#[derive(Deserialize)]
struct TicketmasterEventEmbedded {
    #[serde(default)]
    venues: Vec<TicketmasterVenue>,
}

#[derive(Deserialize)]
struct TicketmasterVenue {
    name: Option<String>,
}

impl From<TicketmasterEvent> for EventSummary {
    fn from(event: TicketmasterEvent) -> Self {
        let venue = event
            .embedded
            .and_then(|e| e.venues.into_iter().next())
            .and_then(|v| v.name);
        Self {
            name: event.name,
            date: or_unannounced(event.dates.start.local_date),
            venue: or_unannounced(venue),
            url: event.url,
        }
    }
}
