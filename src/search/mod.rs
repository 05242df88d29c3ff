//! Event search adapters.
//!
//! Each adapter turns a free-text query (and optional location) into one HTTP
//! GET against its provider and reduces the JSON reply to display text:
//! up to [`MAX_RESULTS`] lines of `<name> on <date> at <venue> (<url>)`,
//! [`NO_EVENTS_FOUND`] when the provider returned nothing, or
//! `Error <status>: <body>` when the provider answered with a non-success
//! status. Only transport and decoding failures are returned as `Err`.

pub mod eventbrite;
pub mod ticketmaster;

pub use eventbrite::EventbriteSearch;
pub use ticketmaster::TicketmasterSearch;

use std::fmt;

use async_trait::async_trait;

use crate::error::{Result, ScoutError};

/// Upper bound on rendered events per search.
pub const MAX_RESULTS: usize = 5;

/// Adapter output when the provider returned zero events.
pub const NO_EVENTS_FOUND: &str = "No events found.";

/// Placeholder for a date or venue the provider left out.
pub const UNANNOUNCED: &str = "TBA";

/// A provider that can be searched for events.
#[async_trait]
pub trait EventSearch: Send + Sync {
    /// Short provider name used in logs, e.g. `"eventbrite"`.
    fn source_name(&self) -> &str;

    /// Run one search and render the result as display text.
    async fn search(&self, query: &str, location: Option<&str>) -> Result<String>;
}

/// One event reduced to what gets shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSummary {
    pub name: String,
    pub date: String,
    pub venue: String,
    pub url: String,
}

impl fmt::Display for EventSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on {} at {} ({})", self.name, self.date, self.venue, self.url)
    }
}

/// Render at most [`MAX_RESULTS`] summaries, one per line.
pub fn render_summaries<I>(events: I) -> String
where
    I: IntoIterator<Item = EventSummary>,
{
    let lines: Vec<String> = events
        .into_iter()
        .take(MAX_RESULTS)
        .map(|e| e.to_string())
        .collect();
    if lines.is_empty() {
        NO_EVENTS_FOUND.to_string()
    } else {
        lines.join("\n")
    }
}

/// Inline report for a non-success provider status.
pub fn error_report(status: u16, body: &str) -> String {
    format!("Error {status}: {body}")
}

fn require_query(query: &str) -> Result<&str> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(ScoutError::InvalidArgument(
            "search query must not be empty".into(),
        ));
    }
    Ok(trimmed)
}

fn normalize_location(location: Option<&str>) -> Option<&str> {
    location.map(str::trim).filter(|l| !l.is_empty())
}

fn or_unannounced(value: Option<String>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| UNANNOUNCED.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(i: usize) -> EventSummary {
        EventSummary {
            name: format!("Show {i}"),
            date: "2026-11-01".into(),
            venue: "Hall".into(),
            url: format!("https://e.test/{i}"),
        }
    }

    #[test]
    fn summary_line_shape() {
        assert_eq!(
            summary(1).to_string(),
            "Show 1 on 2026-11-01 at Hall (https://e.test/1)"
        );
    }

    #[test]
    fn empty_results_render_no_events_found() {
        assert_eq!(render_summaries(Vec::new()), "No events found.");
    }

    #[test]
    fn results_are_capped_at_five_lines() {
        let rendered = render_summaries((0..8).map(summary));
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "Show 0 on 2026-11-01 at Hall (https://e.test/0)");
        assert_eq!(lines[4], "Show 4 on 2026-11-01 at Hall (https://e.test/4)");
    }

    #[test]
    fn error_report_embeds_status_and_body() {
        assert_eq!(error_report(503, "busy"), "Error 503: busy");
    }

    #[test]
    fn blank_query_is_rejected() {
        assert!(require_query("   ").is_err());
        assert_eq!(require_query(" jazz ").unwrap(), "jazz");
    }

    #[test]
    fn blank_location_is_dropped() {
        assert_eq!(normalize_location(Some("  ")), None);
        assert_eq!(normalize_location(Some(" Boston ")), Some("Boston"));
        assert_eq!(normalize_location(None), None);
    }
}
