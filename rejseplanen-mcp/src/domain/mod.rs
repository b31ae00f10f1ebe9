//! Domain types for the journey-planner adapter.
//!
//! Query records validate a call's arguments at construction time, so code
//! that receives them (the upstream client) can trust their shape without
//! re-checking.

mod error;
mod query;
mod station;

pub use error::ValidationError;
pub use query::{
    DEFAULT_MAX_RESULTS, DEFAULT_RADIUS_METRES, DepartureQuery, LocationQuery, MAX_RADIUS_METRES,
    MAX_RESULTS_CAP, ModeFilter, NearbyQuery, TripQuery,
};
pub use station::StopId;
