//! Stub fetcher for testing without network access.
//!
//! Serves canned responses keyed by endpoint name and records every request
//! it sees, so tests can assert both what was sent and that nothing was.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use super::error::UpstreamError;
use super::fetch::{FetchResponse, HttpFetch};

/// A request observed by `StubFetch`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
}

impl RecordedRequest {
    /// The endpoint name: the last path segment of the URL.
    pub fn endpoint(&self) -> &str {
        endpoint_of(&self.url)
    }

    /// Value of a query parameter, if present.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

fn endpoint_of(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}

/// `HttpFetch` that never leaves the process.
///
/// Endpoints without a canned response get a 404 with an explanatory body.
#[derive(Debug, Default)]
pub struct StubFetch {
    responses: HashMap<String, Result<FetchResponse, UpstreamError>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl StubFetch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `endpoint` with a JSON body.
    pub fn with_json(self, endpoint: &str, status: u16, body: &serde_json::Value) -> Self {
        self.with_body(endpoint, status, body.to_string())
    }

    /// Answer `endpoint` with an arbitrary body.
    pub fn with_body(mut self, endpoint: &str, status: u16, body: impl Into<String>) -> Self {
        self.responses
            .insert(endpoint.to_string(), Ok(FetchResponse::new(status, body)));
        self
    }

    /// Fail requests to `endpoint` with a transport error.
    pub fn with_error(mut self, endpoint: &str, error: UpstreamError) -> Self {
        self.responses.insert(endpoint.to_string(), Err(error));
        self
    }

    /// Every request seen so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// The most recent request, if any.
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

#[async_trait]
impl HttpFetch for StubFetch {
    async fn get(
        &self,
        url: &str,
        query: &[(&'static str, String)],
    ) -> Result<FetchResponse, UpstreamError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedRequest {
                url: url.to_string(),
                query: query
                    .iter()
                    .map(|(k, v)| ((*k).to_string(), v.clone()))
                    .collect(),
            });

        let endpoint = endpoint_of(url);
        match self.responses.get(endpoint) {
            Some(canned) => canned.clone(),
            None => Ok(FetchResponse::new(
                404,
                format!("no stub response for endpoint {endpoint}"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn serves_canned_response_and_records() {
        let stub = StubFetch::new().with_json("location", 200, &json!({"ok": true}));

        let response = stub
            .get("http://upstream/rest.exe/location", &[("input", "Aarhus".into())])
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.body, r#"{"ok":true}"#);
        assert_eq!(stub.request_count(), 1);

        let request = stub.last_request().unwrap();
        assert_eq!(request.endpoint(), "location");
        assert_eq!(request.param("input"), Some("Aarhus"));
        assert_eq!(request.param("missing"), None);
    }

    #[tokio::test]
    async fn unknown_endpoint_is_404() {
        let stub = StubFetch::new();
        let response = stub.get("http://upstream/trip", &[]).await.unwrap();
        assert_eq!(response.status, 404);
    }

    #[tokio::test]
    async fn canned_error() {
        let stub = StubFetch::new().with_error("trip", UpstreamError::Timeout { timeout_secs: 5 });
        let err = stub.get("http://upstream/trip", &[]).await.unwrap_err();
        assert!(err.is_timeout());
        assert_eq!(stub.request_count(), 1);
    }
}
