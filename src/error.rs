//! Startup error definitions.
//!
//! Everything here is fatal: the process stops before serving. Per-request
//! failures never surface as this type, the handler turns them into status codes.

use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort the server before or while starting up.
#[derive(Debug, Error)]
pub enum Error {
    /// Built-in defaults could not be deserialized.
    #[error("configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    /// Host/port pair does not form a socket address.
    #[error("invalid listen address '{0}': {1}")]
    InvalidAddress(String, String),

    /// Port already in use, or no permission to bind it.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    /// The working directory cannot be resolved to a served root.
    #[error("cannot serve directory {path}: {source}")]
    Root {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Signal handlers could not be installed.
    #[error("failed to register signal handler: {0}")]
    Signal(#[source] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
