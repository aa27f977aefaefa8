//! HTTP transport
//!
//! Turns a method, a path, a bearer token and a JSON body into one call
//! against the API host. Only status 200 counts as success.

use crate::error::{PplxError, PplxResult};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use std::fmt;
use std::time::{Duration, Instant};

/// Host of the chat completions API
pub const API_HOST: &str = "api.perplexity.ai";
/// Scheme and host every request path is resolved against
pub const DEFAULT_BASE_URL: &str = "https://api.perplexity.ai";
pub const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";
/// Overall per-request timeout of the shared HTTP client
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// A fully built request, ready to send
#[derive(Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    /// Sent verbatim as the `Authorization` header
    pub authorization: String,
    pub body: Vec<u8>,
}

impl ApiRequest {
    /// Serialize `body` as JSON and attach the bearer token
    pub fn json<B: Serialize>(
        method: Method,
        path: impl Into<String>,
        authorization: impl Into<String>,
        body: &B,
    ) -> PplxResult<Self> {
        let body = serde_json::to_vec(body).map_err(PplxError::Encode)?;
        Ok(Self {
            method,
            path: path.into(),
            authorization: authorization.into(),
            body,
        })
    }
}

impl fmt::Debug for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiRequest")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("authorization", &"<redacted>")
            .field("body_len", &self.body.len())
            .finish()
    }
}

/// Status and body of a completed exchange, before interpretation
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Body of a 200 response
    ///
    /// Any other status becomes [`PplxError::UpstreamError`] carrying the
    /// status line and the body as text; the body is never parsed.
    pub fn into_success_body(self) -> PplxResult<Vec<u8>> {
        if self.status == StatusCode::OK {
            return Ok(self.body);
        }

        let body = String::from_utf8_lossy(&self.body).into_owned();
        tracing::warn!(
            status = %self.status,
            body_len = self.body.len(),
            "API returned non-successful status"
        );
        Err(PplxError::UpstreamError {
            status: self.status.to_string(),
            body,
        })
    }
}

/// Executes [`ApiRequest`]s
///
/// Implementations must be safe to share across tasks and must not retry.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> PplxResult<RawResponse>;
}

/// [`Transport`] backed by a single shared `reqwest::Client`
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Transport against `base_url` with an overall per-request `timeout`
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> PplxResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: ApiRequest) -> PplxResult<RawResponse> {
        let url = self.url(&request.path);
        let body_len = request.body.len();
        let started = Instant::now();

        tracing::debug!(method = %request.method, url = %url, body_len, "Sending request");

        let response = self
            .client
            .request(request.method, &url)
            .header(AUTHORIZATION, request.authorization)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(request.body)
            .send()
            .await
            .inspect_err(|e| {
                tracing::debug!(url = %url, error = %e, "Request failed before a response arrived")
            })?;

        let status = response.status();
        let body = response.bytes().await?.to_vec();

        tracing::debug!(
            url = %url,
            status = %status,
            body_len = body.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Received response"
        );

        Ok(RawResponse { status, body })
    }
}
