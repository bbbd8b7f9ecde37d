// Configuration module entry point
// The listening address is compiled in; nothing is read from files or the environment

mod types;

use std::net::SocketAddr;

pub use types::{Config, ServerConfig};

use crate::error::{Error, Result};

/// Interface the listener binds to (all IPv4 interfaces)
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Fixed listening port, change it here
pub const DEFAULT_PORT: u16 = 8020;

impl Config {
    /// Build the configuration from compiled-in defaults
    pub fn load() -> Result<Self> {
        let settings = ::config::Config::builder()
            .set_default("server.host", DEFAULT_HOST)?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Configuration bound to an explicit address, used by tests to get an ephemeral port
    #[cfg(test)]
    pub fn with_addr(host: &str, port: u16) -> Self {
        Self {
            server: ServerConfig {
                host: host.to_string(),
                port,
            },
        }
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse()
            .map_err(|e: std::net::AddrParseError| Error::InvalidAddress(addr, e.to_string()))
    }
}
