//! JSON-over-HTTP helper with a fixed timeout policy. The backend signals
//! results through the response body, so the helper hands back the decoded
//! JSON whatever the HTTP status was and leaves interpretation to callers.

use super::errors::ClientError;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

/// Backend location used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";
/// Default request timeout applied to every call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// Maximum number of body characters surfaced in error messages.
const MAX_ERROR_CHARS: usize = 200;

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Builds a client for `base_url` with the given request timeout.
    ///
    /// # Errors
    /// Returns `ClientError::Config` if the URL is not an absolute http(s) URL
    /// or the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let parsed = Url::parse(base_url.trim())
            .map_err(|err| ClientError::Config(format!("Invalid API URL {base_url}: {err}")))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::Config(format!(
                "Unsupported API URL scheme: {}",
                parsed.scheme()
            )));
        }

        let http = Client::builder()
            .user_agent(crate::APP_USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|err| ClientError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            base_url: base_url.trim().to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Posts `body` as JSON to `path` and decodes the reply as untyped JSON.
    ///
    /// # Errors
    /// Returns `Timeout` or `Network` when the request does not complete,
    /// `Serialization` when the body cannot be encoded, and `Parse` when the
    /// reply is not JSON.
    #[instrument(skip(self, body), fields(url))]
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, ClientError> {
        let url = build_url(&self.base_url, path);
        tracing::Span::current().record("url", url.as_str());

        let payload = serde_json::to_vec(body)
            .map_err(|err| ClientError::Serialization(format!("Failed to encode request: {err}")))?;

        let response = self
            .http
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status();
        let text = response.text().await.map_err(map_request_error)?;

        debug!(status = status.as_u16(), "response received");

        serde_json::from_str(&text).map_err(|err| {
            ClientError::Parse(format!(
                "Failed to decode response ({status}): {err}: {}",
                sanitize_body(&text)
            ))
        })
    }
}

/// Builds a URL from a base URL and the provided path.
fn build_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

/// Maps transport errors into `ClientError` variants with timeout detection.
fn map_request_error(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        ClientError::Timeout("Request timed out. Please try again.".to_string())
    } else if err.is_decode() || err.is_body() {
        ClientError::Parse(format!("Failed to read response: {err}"))
    } else {
        ClientError::Network(format!("Unable to reach the server: {err}"))
    }
}

/// Trims and truncates a response body for user-facing messages.
fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "empty body".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}
