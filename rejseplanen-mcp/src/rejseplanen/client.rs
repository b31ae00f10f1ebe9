//! Rejseplanen REST client.
//!
//! Maps validated queries to upstream GETs and classifies the responses.
//! Successful bodies are returned as parsed JSON without any reshaping.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::domain::{DepartureQuery, LocationQuery, NearbyQuery, TripQuery};

use super::error::{UpstreamError, truncate_body};
use super::fetch::HttpFetch;

/// Default base URL for the Rejseplanen API.
pub const DEFAULT_BASE_URL: &str = "https://xmlopen.rejseplanen.dk/bin/rest.exe";

/// Configuration for the Rejseplanen client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejseplanenConfig {
    /// Base URL for the API (defaults to production Rejseplanen)
    pub base_url: String,
    /// Access key, sent as `accessId` when set
    pub api_key: Option<String>,
}

impl RejseplanenConfig {
    /// Create a config pointing at production Rejseplanen with no key.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the access key. An empty key counts as none.
    pub fn with_api_key(mut self, key: Option<String>) -> Self {
        self.api_key = key.filter(|k| !k.trim().is_empty());
        self
    }
}

impl Default for RejseplanenConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Rejseplanen API client.
///
/// Cheap to clone; clones share the underlying fetcher.
#[derive(Debug, Clone)]
pub struct RejseplanenClient {
    fetch: Arc<dyn HttpFetch>,
    base_url: String,
    api_key: Option<String>,
}

impl RejseplanenClient {
    /// Create a new client that sends requests through `fetch`.
    pub fn new(config: RejseplanenConfig, fetch: Arc<dyn HttpFetch>) -> Self {
        Self {
            fetch,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        }
    }

    /// Search stations, stops and addresses by name.
    pub async fn location(&self, query: &LocationQuery) -> Result<Value, UpstreamError> {
        self.request("location", vec![("input", query.input().to_string())])
            .await
    }

    /// Search journeys between two locations.
    pub async fn trip(&self, query: &TripQuery) -> Result<Value, UpstreamError> {
        let mut params = vec![
            ("originId", query.origin.as_str().to_string()),
            ("destId", query.destination.as_str().to_string()),
        ];
        if let Some(date) = &query.date {
            params.push(("date", date.clone()));
        }
        if let Some(time) = &query.time {
            params.push(("time", time.clone()));
        }
        params.push(("useTog", flag(query.modes.train)));
        params.push(("useBus", flag(query.modes.bus)));
        params.push(("useMetro", flag(query.modes.metro)));
        params.push(("useFerry", flag(query.modes.ferry)));

        self.request("trip", params).await
    }

    /// Upcoming departures from one station.
    pub async fn departure_board(&self, query: &DepartureQuery) -> Result<Value, UpstreamError> {
        let mut params = vec![("id", query.station.as_str().to_string())];
        if let Some(date) = &query.date {
            params.push(("date", date.clone()));
        }
        if let Some(time) = &query.time {
            params.push(("time", time.clone()));
        }

        self.request("departureBoard", params).await
    }

    /// Stops around a coordinate. Upstream uses x for longitude, y for latitude.
    pub async fn stops_nearby(&self, query: &NearbyQuery) -> Result<Value, UpstreamError> {
        let params = vec![
            ("coordX", query.longitude.to_string()),
            ("coordY", query.latitude.to_string()),
            ("maxRadius", query.max_radius.to_string()),
            ("maxNumber", query.max_results.to_string()),
        ];

        self.request("stopsNearby", params).await
    }

    #[instrument(skip(self, params), fields(base_url = %self.base_url))]
    async fn request(
        &self,
        endpoint: &'static str,
        mut params: Vec<(&'static str, String)>,
    ) -> Result<Value, UpstreamError> {
        params.push(("format", "json".to_string()));
        if let Some(key) = &self.api_key {
            params.push(("accessId", key.clone()));
        }

        let url = format!("{}/{}", self.base_url, endpoint);
        let response = self.fetch.get(&url, &params).await.inspect_err(|e| {
            warn!(endpoint, error = %e, "upstream request failed");
        })?;

        if !response.is_success() {
            warn!(endpoint, status = response.status, "upstream returned error status");
            return Err(UpstreamError::status(response.status, &response.body));
        }

        let value: Value =
            serde_json::from_str(&response.body).map_err(|e| UpstreamError::InvalidJson {
                status: response.status,
                message: e.to_string(),
                body: truncate_body(&response.body),
            })?;

        debug!(endpoint, status = response.status, "upstream call succeeded");
        Ok(value)
    }
}

fn flag(on: bool) -> String {
    let value = if on { "1" } else { "0" };
    value.to_string()
}
