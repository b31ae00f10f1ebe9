//! Rejseplanen MCP server.
//!
//! Exposes Danish public transport journey planning (location search, trip
//! search, departure boards, nearby stops) as MCP tools by proxying the
//! Rejseplanen REST API.

pub mod adapter;
pub mod config;
pub mod domain;
pub mod mcp;
pub mod rejseplanen;
pub mod tools;
pub mod web;
