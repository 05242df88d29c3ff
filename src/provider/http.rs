//! Shared HTTP client and auth/status helpers.

use std::sync::OnceLock;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use crate::error::ScoutError;

static SHARED_CLIENT: OnceLock<reqwest::Client> = OnceLock::new();

/// Get (or create) the shared reqwest client used by the model provider and
/// both search adapters.
pub fn shared_client() -> &'static reqwest::Client {
    SHARED_CLIENT.get_or_init(|| {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .pool_max_idle_per_host(10)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "falling back to default HTTP client");
                reqwest::Client::new()
            })
    })
}

/// Build default headers for a Bearer-token JSON API.
pub fn bearer_headers(api_key: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Ok(val) = HeaderValue::from_str(&format!("Bearer {api_key}")) {
        headers.insert(AUTHORIZATION, val);
    }
    headers
}

/// Map a non-success status from the model provider to a typed error.
pub fn status_to_error(status: u16, body: &str) -> ScoutError {
    match status {
        401 | 403 => ScoutError::Authentication(body.to_string()),
        429 => ScoutError::RateLimited {
            retry_after_ms: extract_retry_after(body),
        },
        _ => ScoutError::api(status, body),
    }
}

fn extract_retry_after(body: &str) -> Option<u64> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("retry_after"))
                .and_then(|r| r.as_f64())
                .map(|s| (s * 1000.0) as u64)
        })
}

/// Body of a non-success response, for error text.
///
/// A body that cannot be read yields an empty string; the read failure is
/// logged.
pub async fn error_body(resp: reqwest::Response) -> String {
    let status = resp.status().as_u16();
    let url = resp.url().clone();
    match resp.text().await {
        Ok(body) => body,
        Err(e) => {
            tracing::debug!(status, %url, error = %e, "failed to read error response body");
            String::new()
        }
    }
}

/// Join a base URL and a path without doubling the slash.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
