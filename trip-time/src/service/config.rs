//! Listener configuration for the trip-time service.

use tracing::warn;

/// Environment variable overriding the bind host.
pub const HOST_ENV: &str = "TRIP_TIME_HOST";

/// Environment variable overriding the bind port.
pub const PORT_ENV: &str = "TRIP_TIME_PORT";

/// Where the service listens.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Interface to bind
    pub host: String,
    /// TCP port to bind
    pub port: u16,
}

impl ServiceConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Read `TRIP_TIME_HOST` / `TRIP_TIME_PORT`, keeping defaults for
    /// anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let host = std::env::var(HOST_ENV)
            .ok()
            .filter(|h| !h.trim().is_empty())
            .unwrap_or(defaults.host);
        let port = match std::env::var(PORT_ENV) {
            Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!(%raw, "ignoring invalid {PORT_ENV}");
                defaults.port
            }),
            Err(_) => defaults.port,
        };
        Self { host, port }
    }

    /// `host:port`, as passed to the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// URL advertised in the WSDL.
    pub fn location(&self) -> String {
        format!("http://{}/", self.bind_addr())
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}
