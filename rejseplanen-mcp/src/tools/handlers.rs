//! Handlers and argument schemas for the five operations.
//!
//! Each handler pulls its arguments out of an `Arguments` map and calls the
//! matching `TransitAdapter` method. Business rules stay in the adapter.

use std::sync::Arc;

use futures::FutureExt;
use serde_json::json;

use crate::adapter::{AdapterError, TransitAdapter};
use crate::domain::ModeFilter;

use super::arguments::Arguments;
use super::registry::{ToolFuture, ToolSpec};

/// The registration table, in listing order.
pub(super) fn all() -> Vec<ToolSpec> {
    vec![
        ToolSpec {
            name: "location_search",
            description: "Search for stations, stops, and addresses in Denmark by name. \
                Returns location IDs needed for trip searches and departure boards.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Location or station name, e.g. \"København H\""
                    }
                },
                "required": ["query"]
            }),
            handler: location_search,
        },
        ToolSpec {
            name: "trip_search",
            description: "Search for public transport trips between two locations in Denmark. \
                Returns journey options with departure/arrival times, transfers, and legs.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "origin_id": {"type": "string", "description": "Origin location ID (from location_search)"},
                    "dest_id": {"type": "string", "description": "Destination location ID (from location_search)"},
                    "date": {"type": "string", "description": "Date as DD.MM.YY (defaults to today)"},
                    "time": {"type": "string", "description": "Time as HH:MM (defaults to now)"},
                    "use_train": {"type": "boolean", "default": true},
                    "use_bus": {"type": "boolean", "default": true},
                    "use_metro": {"type": "boolean", "default": true},
                    "use_ferry": {"type": "boolean", "default": true}
                },
                "required": ["origin_id", "dest_id"]
            }),
            handler: trip_search,
        },
        ToolSpec {
            name: "departure_board",
            description: "Get real-time departures from a station or stop: \
                lines, destinations, scheduled and real-time times, tracks.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "station_id": {"type": "string", "description": "Station/stop ID (from location_search)"},
                    "date": {"type": "string", "description": "Date as DD.MM.YY (defaults to today)"},
                    "time": {"type": "string", "description": "Time as HH:MM (defaults to now)"}
                },
                "required": ["station_id"]
            }),
            handler: departure_board,
        },
        ToolSpec {
            name: "nearby_stops",
            description: "Find public transport stops near a GPS coordinate, nearest first.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "latitude": {"type": "number", "description": "Latitude, e.g. 55.6761"},
                    "longitude": {"type": "number", "description": "Longitude, e.g. 12.5683"},
                    "max_radius": {"type": "integer", "minimum": 1, "default": 500,
                                   "description": "Search radius in meters (capped at 10000)"},
                    "max_results": {"type": "integer", "minimum": 1, "default": 10,
                                    "description": "Maximum number of stops (capped at 50)"}
                },
                "required": ["latitude", "longitude"]
            }),
            handler: nearby_stops,
        },
        ToolSpec {
            name: "get_server_info",
            description: "Get information about this server: \
                version, environment, and capabilities.",
            input_schema: json!({"type": "object", "properties": {}}),
            handler: get_server_info,
        },
    ]
}

fn location_search(adapter: Arc<TransitAdapter>, args: Arguments) -> ToolFuture {
    async move {
        let query = args.required_str("query")?;
        adapter.location_search(&query).await
    }
    .boxed()
}

fn trip_search(adapter: Arc<TransitAdapter>, args: Arguments) -> ToolFuture {
    async move {
        let origin_id = args.required_str("origin_id")?;
        let dest_id = args.required_str("dest_id")?;
        let date = args.optional_str("date")?;
        let time = args.optional_str("time")?;
        let modes = ModeFilter {
            train: args.optional_bool("use_train")?.unwrap_or(true),
            bus: args.optional_bool("use_bus")?.unwrap_or(true),
            metro: args.optional_bool("use_metro")?.unwrap_or(true),
            ferry: args.optional_bool("use_ferry")?.unwrap_or(true),
        };
        adapter
            .trip_search(&origin_id, &dest_id, date.as_deref(), time.as_deref(), modes)
            .await
    }
    .boxed()
}

fn departure_board(adapter: Arc<TransitAdapter>, args: Arguments) -> ToolFuture {
    async move {
        let station_id = args.required_str("station_id")?;
        let date = args.optional_str("date")?;
        let time = args.optional_str("time")?;
        adapter
            .departure_board(&station_id, date.as_deref(), time.as_deref())
            .await
    }
    .boxed()
}

fn nearby_stops(adapter: Arc<TransitAdapter>, args: Arguments) -> ToolFuture {
    async move {
        let latitude = args.required_f64("latitude")?;
        let longitude = args.required_f64("longitude")?;
        let max_radius = args.optional_i64("max_radius")?;
        let max_results = args.optional_i64("max_results")?;
        adapter
            .nearby_stops(latitude, longitude, max_radius, max_results)
            .await
    }
    .boxed()
}

fn get_server_info(adapter: Arc<TransitAdapter>, _args: Arguments) -> ToolFuture {
    async move {
        serde_json::to_value(adapter.get_server_info())
            .map_err(|e| AdapterError::Internal(format!("serializing server info: {e}")))
    }
    .boxed()
}
