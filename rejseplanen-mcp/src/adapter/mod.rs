//! The transport adapter: five operations over the Rejseplanen API.
//!
//! Each data operation validates its arguments into a domain query, makes
//! exactly one upstream call, and returns the upstream JSON untouched. The
//! adapter holds no mutable state, so concurrent calls need no coordination.

mod error;
mod server_info;

use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use crate::config::ServerConfig;
use crate::domain::{DepartureQuery, LocationQuery, ModeFilter, NearbyQuery, TripQuery};
use crate::rejseplanen::{HttpFetch, RejseplanenClient};

pub use error::AdapterError;
pub use server_info::{ConfigEcho, SERVER_NAME, ServerInfo, VERSION};

/// Names of the operations that call the upstream API.
pub const DATA_OPERATIONS: [&str; 4] = [
    "location_search",
    "trip_search",
    "departure_board",
    "nearby_stops",
];

/// Name of the self-description operation.
pub const SERVER_INFO_OPERATION: &str = "get_server_info";

/// Journey-planner adapter.
#[derive(Debug, Clone)]
pub struct TransitAdapter {
    client: RejseplanenClient,
    config: Arc<ServerConfig>,
}

impl TransitAdapter {
    /// Build an adapter that reaches the upstream through `fetch`.
    pub fn new(config: Arc<ServerConfig>, fetch: Arc<dyn HttpFetch>) -> Self {
        let client = RejseplanenClient::new(config.upstream(), fetch);
        Self { client, config }
    }

    /// Search for stations, stops and addresses by name.
    pub async fn location_search(&self, query: &str) -> Result<Value, AdapterError> {
        let query = LocationQuery::new(query)?;
        info!(query = query.input(), "location_search");
        Ok(self.client.location(&query).await?)
    }

    /// Search journeys between two upstream locations.
    pub async fn trip_search(
        &self,
        origin_id: &str,
        dest_id: &str,
        date: Option<&str>,
        time: Option<&str>,
        modes: ModeFilter,
    ) -> Result<Value, AdapterError> {
        let query = TripQuery::new(origin_id, dest_id, date, time, modes)?;
        info!(
            origin = %query.origin,
            destination = %query.destination,
            "trip_search"
        );
        Ok(self.client.trip(&query).await?)
    }

    /// Upcoming departures from a station, in upstream order.
    pub async fn departure_board(
        &self,
        station_id: &str,
        date: Option<&str>,
        time: Option<&str>,
    ) -> Result<Value, AdapterError> {
        let query = DepartureQuery::new(station_id, date, time)?;
        info!(station = %query.station, "departure_board");
        Ok(self.client.departure_board(&query).await?)
    }

    /// Stops near a coordinate, nearest first as the upstream returns them.
    pub async fn nearby_stops(
        &self,
        latitude: f64,
        longitude: f64,
        max_radius: Option<i64>,
        max_results: Option<i64>,
    ) -> Result<Value, AdapterError> {
        let query = NearbyQuery::new(latitude, longitude, max_radius, max_results)?;
        info!(
            latitude,
            longitude,
            max_radius = query.max_radius,
            max_results = query.max_results,
            "nearby_stops"
        );
        Ok(self.client.stops_nearby(&query).await?)
    }

    /// Describe this server. Makes no network call.
    pub fn get_server_info(&self) -> ServerInfo {
        ServerInfo::new(&self.config, &DATA_OPERATIONS)
    }
}
