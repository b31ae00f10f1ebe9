//! Process configuration.
//!
//! Read once at startup into an immutable `ServerConfig`, then handed to the
//! components that need it. Nothing reads the environment after that.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::rejseplanen::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, RejseplanenConfig};

/// Default listening port.
pub const DEFAULT_PORT: u16 = 8000;

/// Environment label used when `ENVIRONMENT` is unset.
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// Errors from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable was set to something unparseable
    #[error("invalid value for {name}: {value:?} ({reason})")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Immutable server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to listen on
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Deployment label echoed by `get_server_info`
    pub environment: String,
    /// Optional upstream access key
    pub api_key: Option<String>,
    /// Upstream base URL
    pub base_url: String,
    /// Outbound request timeout in seconds
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    ///
    /// Unset and empty variables fall back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(host) = get("HOST") {
            config.host = parse("HOST", &host)?;
        }
        if let Some(port) = get("PORT") {
            config.port = parse("PORT", &port)?;
        }
        if let Some(env) = get("ENVIRONMENT") {
            config.environment = env;
        }
        if let Some(url) = get("REJSEPLANEN_BASE_URL") {
            config.base_url = url;
        }
        if let Some(timeout) = get("REQUEST_TIMEOUT_SECS") {
            let secs: u64 = parse("REQUEST_TIMEOUT_SECS", &timeout)?;
            if secs == 0 {
                return Err(ConfigError::Invalid {
                    name: "REQUEST_TIMEOUT_SECS",
                    value: timeout,
                    reason: "must be at least 1".to_string(),
                });
            }
            config.request_timeout_secs = secs;
        }
        config.api_key = get("REJSEPLANEN_API_KEY");

        Ok(config)
    }

    /// Set the listening port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the environment label.
    pub fn with_environment(mut self, env: impl Into<String>) -> Self {
        self.environment = env.into();
        self
    }

    /// Set a custom upstream base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the outbound request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    /// Socket address to bind.
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Upstream client settings derived from this config.
    pub fn upstream(&self) -> RejseplanenConfig {
        RejseplanenConfig::new()
            .with_base_url(&self.base_url)
            .with_api_key(self.api_key.clone())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            environment: DEFAULT_ENVIRONMENT.to_string(),
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

fn parse<T>(name: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        name,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn default_config() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.port, 8000);
        assert_eq!(config.environment, "development");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.api_key, None);
        assert_eq!(config.listen_addr().to_string(), "0.0.0.0:8000");
    }

    #[test]
    fn reads_variables() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "9001"),
            ("ENVIRONMENT", "production"),
            ("REJSEPLANEN_API_KEY", "abc"),
            ("REJSEPLANEN_BASE_URL", "http://localhost:1234"),
            ("REQUEST_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();

        assert_eq!(config.listen_addr().to_string(), "127.0.0.1:9001");
        assert_eq!(config.environment, "production");
        assert_eq!(config.api_key.as_deref(), Some("abc"));
        assert_eq!(config.base_url, "http://localhost:1234");
        assert_eq!(config.request_timeout_secs, 5);
    }

    #[test]
    fn empty_values_use_defaults() {
        let config =
            ServerConfig::from_lookup(lookup(&[("PORT", ""), ("REJSEPLANEN_API_KEY", " ")]))
                .unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.api_key, None);
    }

    #[test]
    fn bad_port_is_an_error() {
        let err = ServerConfig::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        let ConfigError::Invalid { name, value, .. } = err;
        assert_eq!(name, "PORT");
        assert_eq!(value, "eighty");
    }

    #[test]
    fn bad_timeout_is_an_error() {
        assert!(ServerConfig::from_lookup(lookup(&[("REQUEST_TIMEOUT_SECS", "-1")])).is_err());
    }

    #[test]
    fn zero_timeout_is_an_error() {
        let err = ServerConfig::from_lookup(lookup(&[("REQUEST_TIMEOUT_SECS", "0")])).unwrap_err();
        let ConfigError::Invalid { name, value, reason } = err;
        assert_eq!(name, "REQUEST_TIMEOUT_SECS");
        assert_eq!(value, "0");
        assert_eq!(reason, "must be at least 1");
    }

    #[test]
    fn builder() {
        let config = ServerConfig::default()
            .with_port(1)
            .with_environment("test")
            .with_base_url("http://stub")
            .with_timeout(2);
        assert_eq!(config.port, 1);
        assert_eq!(config.environment, "test");
        assert_eq!(config.upstream().base_url, "http://stub");
        assert_eq!(config.request_timeout_secs, 2);
    }
}
