//! Self-description returned by `get_server_info`.

use serde::Serialize;

use crate::config::ServerConfig;

/// Human-readable server name.
pub const SERVER_NAME: &str = "Rejseplanen MCP Server";

/// Crate version, baked in at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const DESCRIPTION: &str =
    "MCP server for Danish public transportation via the Rejseplanen.dk API";

const TRANSPORT: &str = "HTTP (Stateless)";

/// Echo of the configuration the server is running with.
///
/// The API key itself is never included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigEcho {
    pub port: u16,
    pub request_timeout_secs: u64,
    pub api_key_configured: bool,
}

/// Static metadata about this server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerInfo {
    pub server_name: &'static str,
    pub version: &'static str,
    pub environment: String,
    pub api_base: String,
    pub transport: &'static str,
    /// The data-fetching operations, in registration order.
    pub tools: Vec<&'static str>,
    pub description: &'static str,
    pub config: ConfigEcho,
}

impl ServerInfo {
    /// Describe a server running with `config` and exposing `tools`.
    pub fn new(config: &ServerConfig, tools: &[&'static str]) -> Self {
        Self {
            server_name: SERVER_NAME,
            version: VERSION,
            environment: config.environment.clone(),
            api_base: config.base_url.clone(),
            transport: TRANSPORT,
            tools: tools.to_vec(),
            description: DESCRIPTION,
            config: ConfigEcho {
                port: config.port,
                request_timeout_secs: config.request_timeout_secs,
                api_key_configured: config.api_key.is_some(),
            },
        }
    }
}
