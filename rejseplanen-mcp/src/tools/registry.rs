//! The operation registration table.

use std::sync::Arc;

use futures::future::BoxFuture;
use serde_json::Value;
use tracing::{debug, error};

use crate::adapter::{AdapterError, TransitAdapter};

use super::arguments::Arguments;
use super::handlers;

/// Future returned by a tool handler.
pub type ToolFuture = BoxFuture<'static, Result<Value, AdapterError>>;

/// Entry point of one operation.
pub type ToolHandler = fn(Arc<TransitAdapter>, Arguments) -> ToolFuture;

/// One registered operation.
#[derive(Debug, Clone)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    /// JSON Schema of the argument object
    pub input_schema: Value,
    pub handler: ToolHandler,
}

/// Error from calling a tool by name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ToolCallError {
    /// No tool with that name is registered
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    /// The tool ran and failed
    #[error(transparent)]
    Failed(#[from] AdapterError),
}

/// Ordered table of registered tools, built once at startup.
///
/// The table is fixed after construction; listing order is registration
/// order.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    adapter: Arc<TransitAdapter>,
    tools: Vec<ToolSpec>,
}

impl ToolRegistry {
    /// Create a registry holding the five transit operations.
    pub fn new(adapter: Arc<TransitAdapter>) -> Self {
        Self {
            adapter,
            tools: handlers::all(),
        }
    }

    /// Append an extra tool after the built-in ones.
    #[cfg(test)]
    pub(crate) fn with_tool(mut self, spec: ToolSpec) -> Self {
        self.tools.push(spec);
        self
    }

    /// All registered tools, in order.
    pub fn specs(&self) -> &[ToolSpec] {
        &self.tools
    }

    /// Names of all registered tools, in order.
    pub fn names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|t| t.name).collect()
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Option<&ToolSpec> {
        self.tools.iter().find(|t| t.name == name)
    }

    /// Run a tool by name.
    ///
    /// The handler runs on its own task, so a panic inside it fails this
    /// call with `AdapterError::Internal` instead of taking down the caller.
    pub async fn call(&self, name: &str, args: Arguments) -> Result<Value, ToolCallError> {
        let spec = self
            .get(name)
            .ok_or_else(|| ToolCallError::UnknownTool(name.to_string()))?;

        debug!(tool = name, "dispatching tool call");
        let task = tokio::spawn((spec.handler)(self.adapter.clone(), args));

        match task.await {
            Ok(result) => Ok(result?),
            Err(join_error) => {
                error!(tool = name, error = %join_error, "tool handler aborted");
                Err(AdapterError::Internal(format!("tool {name} aborted: {join_error}")).into())
            }
        }
    }
}

/// A tool that panics unless called with `"explode": false`.
#[cfg(test)]
pub(crate) fn exploding_tool() -> ToolSpec {
    use futures::FutureExt;

    fn explode(_adapter: Arc<TransitAdapter>, args: Arguments) -> ToolFuture {
        async move {
            if args.optional_bool("explode")?.unwrap_or(true) {
                panic!("handler exploded");
            }
            Ok(serde_json::json!({"survived": true}))
        }
        .boxed()
    }

    ToolSpec {
        name: "explode",
        description: "Panics on request.",
        input_schema: serde_json::json!({"type": "object", "properties": {}}),
        handler: explode,
    }
}
