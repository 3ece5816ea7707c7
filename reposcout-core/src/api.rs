//! HTTP client for the search and project-detail services.
//!
//! Both endpoints are POST-with-JSON. Non-2xx responses carry an
//! `{"error": "..."}` body, but the detail endpoint has been observed to
//! return plain text on some failure paths, so error-body parsing tries JSON
//! first and falls back to the raw text. Decoding is split from transport
//! (`decode_body`) so the error paths are unit-testable without a server.

pub use reqwest::StatusCode;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::warn;
use url::Url;

use crate::types::{ProcessOutcome, ProjectDetail, SearchResponse, SearchResult};

/// Failure of one API call, categorized for panel-local rendering.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection, DNS, or timeout failure before any response arrived.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// Non-2xx response. `message` is the service's reported error text
    /// (JSON `error` field, else the raw body) when one was present.
    #[error("HTTP error! status: {status}")]
    Status {
        status: StatusCode,
        message: Option<String>,
    },
    /// 2xx response whose body failed to deserialize.
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// The user-visible message: the service's reported text when available,
    /// otherwise a generic description of the failure.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status {
                message: Some(msg), ..
            } if !msg.is_empty() => msg.clone(),
            other => other.to_string(),
        }
    }
}

/// Error envelope the service attaches to non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Client for the two backend collaborators, cheap to clone per fetch task.
///
/// `reqwest::Client` is an `Arc` around its connection pool internally, so
/// cloning the whole struct per spawned request is the intended usage.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
}

impl ApiClient {
    /// Builds a client for the service at `base` (e.g. `http://127.0.0.1:5000`).
    pub fn new(base: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            base,
        }
    }

    fn endpoint(&self, path: &str) -> Url {
        // Url::join would treat a missing trailing slash as a file component;
        // the service paths are flat so plain path assignment is enough.
        let mut url = self.base.clone();
        url.set_path(path);
        url
    }

    /// `POST /search` — returns the results in response order.
    ///
    /// Callers must not pass an empty or whitespace-only query; that check
    /// belongs to the input boundary (no request is issued for those).
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>, ApiError> {
        let response = self
            .http
            .post(self.endpoint("/search"))
            .json(&json!({ "query": query }))
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        let parsed: SearchResponse = decode_body(status, &body)?;
        Ok(parsed.results)
    }

    /// `POST /project_details` — fetches details for `id` under `query`.
    pub async fn project_details(&self, id: &str, query: &str) -> Result<ProjectDetail, ApiError> {
        let response = self
            .http
            .post(self.endpoint("/project_details"))
            .json(&json!({ "id": id, "query": query }))
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        decode_body(status, &body)
    }

    /// `POST /process_selected` — submits the chosen project URLs.
    pub async fn process_selected(&self, urls: &[String]) -> Result<ProcessOutcome, ApiError> {
        let response = self
            .http
            .post(self.endpoint("/process_selected"))
            .json(&json!({ "urls": urls }))
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        decode_body(status, &body)
    }
}

/// Decodes a response body according to its status.
///
/// 2xx: deserialize `T`, mapping failure to `ApiError::Decode`. Non-2xx:
/// extract the `error` field from a JSON body, fall back to the raw text,
/// and return `ApiError::Status`.
fn decode_body<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T, ApiError> {
    if !status.is_success() {
        let message = match serde_json::from_str::<ErrorBody>(body) {
            Ok(envelope) => Some(envelope.error),
            Err(_) => {
                let text = body.trim();
                if text.is_empty() {
                    None
                } else {
                    Some(text.to_owned())
                }
            }
        };
        warn!(%status, ?message, "service returned an error response");
        return Err(ApiError::Status { status, message });
    }
    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_success_body() {
        let body = r#"{"results":[{"title":"A","url":"http://x/a","stars":5}]}"#;
        let parsed: SearchResponse = decode_body(StatusCode::OK, body).unwrap();
        assert_eq!(parsed.results.len(), 1);
        assert_eq!(parsed.results[0].name, "A");
        assert_eq!(parsed.results[0].stars, 5);
    }

    #[test]
    fn decode_error_json_envelope() {
        let err = decode_body::<SearchResponse>(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"error":"db down"}"#,
        )
        .unwrap_err();
        assert!(err.user_message().contains("db down"));
    }

    #[test]
    fn decode_error_plain_text_fallback() {
        let err = decode_body::<ProjectDetail>(StatusCode::BAD_GATEWAY, "upstream unavailable")
            .unwrap_err();
        assert_eq!(err.user_message(), "upstream unavailable");
    }

    #[test]
    fn decode_error_empty_body_uses_generic_message() {
        let err = decode_body::<ProjectDetail>(StatusCode::NOT_FOUND, "").unwrap_err();
        assert!(err.user_message().contains("404"));
    }

    #[test]
    fn decode_malformed_success_body_is_decode_error() {
        let err = decode_body::<SearchResponse>(StatusCode::OK, "<html>nope</html>").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
