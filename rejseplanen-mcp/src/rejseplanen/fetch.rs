//! The outbound HTTP capability.
//!
//! The client never touches `reqwest` directly; it goes through `HttpFetch`
//! so tests can swap in `StubFetch` and run without a network.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::error::UpstreamError;

/// User agent sent with every upstream request.
const USER_AGENT: &str = concat!("rejseplanen-mcp/", env!("CARGO_PKG_VERSION"));

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Raw upstream response: status and body, not yet interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    /// Create a response from a status code and body text.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues a single HTTP GET.
///
/// Implementations report transport failures (timeouts, refused
/// connections) as `UpstreamError`; any response that arrives, whatever its
/// status, is returned as a `FetchResponse`.
#[async_trait]
pub trait HttpFetch: Send + Sync + fmt::Debug {
    async fn get(
        &self,
        url: &str,
        query: &[(&'static str, String)],
    ) -> Result<FetchResponse, UpstreamError>;
}

/// `HttpFetch` backed by a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestFetch {
    http: reqwest::Client,
    timeout_secs: u64,
}

impl ReqwestFetch {
    /// Create a fetcher whose requests time out after `timeout_secs`.
    pub fn new(timeout_secs: u64) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| UpstreamError::Connection(e.to_string()))?;

        Ok(Self { http, timeout_secs })
    }

    fn map_error(&self, err: reqwest::Error) -> UpstreamError {
        if err.is_timeout() {
            UpstreamError::Timeout {
                timeout_secs: self.timeout_secs,
            }
        } else {
            UpstreamError::Connection(err.to_string())
        }
    }
}

#[async_trait]
impl HttpFetch for ReqwestFetch {
    async fn get(
        &self,
        url: &str,
        query: &[(&'static str, String)],
    ) -> Result<FetchResponse, UpstreamError> {
        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| self.map_error(e))?;
        debug!(url, status, bytes = body.len(), "upstream responded");

        Ok(FetchResponse { status, body })
    }
}
