//! HTTP-level tests for the Eventbrite and Ticketmaster adapters.

mod common;

use pretty_assertions::assert_eq;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use eventscout::error::ScoutError;
use eventscout::search::{EventSearch, EventbriteSearch, TicketmasterSearch, NO_EVENTS_FOUND};

use common::{eventbrite_event, ticketmaster_event};

fn eventbrite(server: &MockServer) -> EventbriteSearch {
    EventbriteSearch::new(Some("eb-token".into()), Some(server.uri()))
}

fn ticketmaster(server: &MockServer) -> TicketmasterSearch {
    TicketmasterSearch::new(Some("tm-key".into()), Some(server.uri()))
}

#[tokio::test]
async fn eventbrite_sends_token_and_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/events/search/"))
        .and(header("authorization", "Bearer eb-token"))
        .and(query_param("q", "concerts"))
        .and(query_param("expand", "venue"))
        .and(query_param("sort_by", "date"))
        .and(query_param("location.address", "New York"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "events": [eventbrite_event(0)] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let text = eventbrite(&server)
        .search("concerts", Some("New York"))
        .await
        .unwrap();

    assert_eq!(
        text,
        "Concert 0 on 2026-11-01T20:00:00 at Brooklyn Steel, New York \
         (https://www.eventbrite.com/e/0)"
    );
}

#[tokio::test]
async fn eventbrite_caps_results_at_five() {
    let server = MockServer::start().await;
    let events: Vec<_> = (0..8).map(eventbrite_event).collect();
    Mock::given(method("GET"))
        .and(path("/v3/events/search/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "events": events })),
        )
        .mount(&server)
        .await;

    let text = eventbrite(&server).search("concerts", None).await.unwrap();

    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("Concert 0 on "));
    assert!(lines[4].starts_with("Concert 4 on "));
}

#[tokio::test]
async fn eventbrite_zero_events() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "events": [] })))
        .mount(&server)
        .await;

    let text = eventbrite(&server).search("knitting", None).await.unwrap();
    assert_eq!(text, NO_EVENTS_FOUND);
}

#[tokio::test]
async fn eventbrite_non_success_is_inline_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;

    let text = eventbrite(&server).search("concerts", None).await.unwrap();
    assert_eq!(text, "Error 404: not found");
}

#[tokio::test]
async fn eventbrite_without_token_is_authentication_error() {
    let server = MockServer::start().await;
    let search = EventbriteSearch::new(None, Some(server.uri()));

    let err = search.search("concerts", None).await.unwrap_err();

    assert!(matches!(err, ScoutError::Authentication(_)));
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn ticketmaster_sends_key_and_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/discovery/v2/events.json"))
        .and(query_param("apikey", "tm-key"))
        .and(query_param("keyword", "hockey"))
        .and(query_param("size", "5"))
        .and(query_param("city", "Boston"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "_embedded": { "events": [ticketmaster_event(2)] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let text = ticketmaster(&server)
        .search("hockey", Some("Boston"))
        .await
        .unwrap();

    assert_eq!(
        text,
        "Arena Show 2 on 2026-12-03 at Madison Square Garden \
         (https://www.ticketmaster.com/event/2)"
    );
}

#[tokio::test]
async fn ticketmaster_without_embedded_is_no_events() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "page": { "totalElements": 0 }
        })))
        .mount(&server)
        .await;

    let text = ticketmaster(&server).search("polka", None).await.unwrap();
    assert_eq!(text, NO_EVENTS_FOUND);
}

#[tokio::test]
async fn ticketmaster_caps_oversized_page() {
    let server = MockServer::start().await;
    let events: Vec<_> = (0..7).map(ticketmaster_event).collect();
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "_embedded": { "events": events }
        })))
        .mount(&server)
        .await;

    let text = ticketmaster(&server).search("rock", None).await.unwrap();
    assert_eq!(text.lines().count(), 5);
}

#[tokio::test]
async fn ticketmaster_non_success_contains_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid ApiKey"))
        .mount(&server)
        .await;

    let text = ticketmaster(&server).search("rock", None).await.unwrap();
    assert!(text.contains("401"));
    assert!(text.contains("Invalid ApiKey"));
}

#[tokio::test]
async fn blank_query_is_rejected_before_any_request() {
    let server = MockServer::start().await;

    let err = ticketmaster(&server).search("   ", None).await.unwrap_err();

    assert!(matches!(err, ScoutError::InvalidArgument(_)));
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn malformed_body_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    assert!(eventbrite(&server).search("jazz", None).await.is_err());
}
