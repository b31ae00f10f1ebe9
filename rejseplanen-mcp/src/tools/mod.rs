//! Explicit registration of the callable operations.
//!
//! The dispatch layer never sees `TransitAdapter` directly: it asks the
//! `ToolRegistry` for the list of tools and calls them by name with a map of
//! arguments.

mod arguments;
mod handlers;
mod registry;

pub use arguments::Arguments;
pub use registry::{ToolCallError, ToolFuture, ToolHandler, ToolRegistry, ToolSpec};

#[cfg(test)]
pub(crate) use registry::exploding_tool;
