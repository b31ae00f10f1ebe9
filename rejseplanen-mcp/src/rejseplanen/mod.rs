//! Rejseplanen (Danish journey planner) API client.
//!
//! Key characteristics of the upstream:
//! - Every endpoint is a GET under one base URL, answering JSON when asked
//!   with `format=json`
//! - Stop identifiers are opaque strings such as `008600626`
//! - Coordinates are passed as `coordX` (longitude) and `coordY` (latitude)
//! - No key is currently required; `accessId` is sent if one is configured

mod client;
mod error;
mod fetch;
pub mod mock;

pub use client::{DEFAULT_BASE_URL, RejseplanenClient, RejseplanenConfig};
pub use error::UpstreamError;
pub use fetch::{DEFAULT_TIMEOUT_SECS, FetchResponse, HttpFetch, ReqwestFetch};
