// Configuration types module
// Defines the typed configuration deserialized from built-in defaults

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Config {
    pub server: ServerConfig,
}

/// Listener configuration
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface to bind, `0.0.0.0` means all IPv4 interfaces
    pub host: String,
    pub port: u16,
}
