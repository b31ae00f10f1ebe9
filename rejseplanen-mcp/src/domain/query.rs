//! Validated, request-scoped query records.
//!
//! Each record is built from a single call's arguments, drives exactly one
//! upstream request, and is dropped when the call returns. Construction is
//! where the local business rules live; anything more (calendar validity,
//! whether a stop exists) is left to the upstream API.

use super::{StopId, ValidationError};

/// Search radius used when the caller does not supply one (metres).
pub const DEFAULT_RADIUS_METRES: u32 = 500;

/// Largest radius the upstream API accepts (metres).
pub const MAX_RADIUS_METRES: u32 = 10_000;

/// Result count used when the caller does not supply one.
pub const DEFAULT_MAX_RESULTS: u32 = 10;

/// Largest result count forwarded upstream.
pub const MAX_RESULTS_CAP: u32 = 50;

/// Keep an optional date or time string only if it has content.
///
/// The value itself is forwarded verbatim; its format is the upstream's
/// concern.
fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(ToString::to_string)
}

/// Free-text location search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationQuery {
    input: String,
}

impl LocationQuery {
    /// Build a query from the caller's text. Blank input is rejected.
    pub fn new(query: &str) -> Result<Self, ValidationError> {
        let input = query.trim();
        if input.is_empty() {
            return Err(ValidationError::empty("query"));
        }
        Ok(Self {
            input: input.to_string(),
        })
    }

    /// The trimmed search text.
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Which transport modes a trip search may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeFilter {
    pub train: bool,
    pub bus: bool,
    pub metro: bool,
    pub ferry: bool,
}

impl Default for ModeFilter {
    fn default() -> Self {
        Self {
            train: true,
            bus: true,
            metro: true,
            ferry: true,
        }
    }
}

/// Journey search between two upstream locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripQuery {
    pub origin: StopId,
    pub destination: StopId,
    /// Date in the upstream's `DD.MM.YY` form.
    pub date: Option<String>,
    /// Time in the upstream's `HH:MM` form.
    pub time: Option<String>,
    pub modes: ModeFilter,
}

impl TripQuery {
    /// Build a trip query. Origin and destination must be non-blank.
    pub fn new(
        origin_id: &str,
        dest_id: &str,
        date: Option<&str>,
        time: Option<&str>,
        modes: ModeFilter,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            origin: StopId::parse("origin_id", origin_id)?,
            destination: StopId::parse("dest_id", dest_id)?,
            date: non_blank(date),
            time: non_blank(time),
            modes,
        })
    }
}

/// Departure board for one station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartureQuery {
    pub station: StopId,
    pub date: Option<String>,
    pub time: Option<String>,
}

impl DepartureQuery {
    /// Build a departure query. The station must be non-blank.
    pub fn new(
        station_id: &str,
        date: Option<&str>,
        time: Option<&str>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            station: StopId::parse("station_id", station_id)?,
            date: non_blank(date),
            time: non_blank(time),
        })
    }
}

/// Stops around a coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearbyQuery {
    pub latitude: f64,
    pub longitude: f64,
    /// Search radius in metres, within `1..=MAX_RADIUS_METRES`.
    pub max_radius: u32,
    /// Result count, within `1..=MAX_RESULTS_CAP`.
    pub max_results: u32,
}

impl NearbyQuery {
    /// Build a nearby-stops query.
    ///
    /// Coordinates must be finite; their range is not checked locally.
    /// Omitted limits fall back to the defaults, supplied limits must be at
    /// least 1 and are capped at the upstream maxima.
    pub fn new(
        latitude: f64,
        longitude: f64,
        max_radius: Option<i64>,
        max_results: Option<i64>,
    ) -> Result<Self, ValidationError> {
        if !latitude.is_finite() {
            return Err(ValidationError::new("latitude", "must be a finite number"));
        }
        if !longitude.is_finite() {
            return Err(ValidationError::new("longitude", "must be a finite number"));
        }

        let max_radius = match max_radius {
            None => DEFAULT_RADIUS_METRES,
            Some(r) if r < 1 => {
                return Err(ValidationError::new("max_radius", "must be at least 1 meter"));
            }
            Some(r) => r.min(i64::from(MAX_RADIUS_METRES)) as u32,
        };

        let max_results = match max_results {
            None => DEFAULT_MAX_RESULTS,
            Some(n) if n < 1 => {
                return Err(ValidationError::new("max_results", "must be at least 1"));
            }
            Some(n) => n.min(i64::from(MAX_RESULTS_CAP)) as u32,
        };

        Ok(Self {
            latitude,
            longitude,
            max_radius,
            max_results,
        })
    }
}
