// Server loop module
// Owns the listening socket and serves connections one at a time until shutdown

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;

use super::connection::serve_connection;
use super::listener::create_listener;
use super::signal::ShutdownSignal;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logger;

/// A bound file server in the `Listening` state.
///
/// [`Server::serve_forever`] consumes it; when that returns the socket has
/// been released and the server is stopped.
pub struct Server {
    listener: TcpListener,
    local_addr: SocketAddr,
    root: Arc<Path>,
}

impl Server {
    /// Bind the configured address and fix the served root.
    ///
    /// Fails if the port cannot be bound or `root` cannot be resolved.
    pub fn start(config: &Config, root: &Path) -> Result<Self> {
        let root = root.canonicalize().map_err(|source| Error::Root {
            path: root.to_path_buf(),
            source,
        })?;

        let addr = config.get_socket_addr()?;
        let listener = create_listener(addr)?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| Error::Bind { addr, source })?;

        Ok(Self {
            listener,
            local_addr,
            root: Arc::from(root),
        })
    }

    /// Address actually bound (the real port when configured with port 0)
    pub const fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Accept and serve connections sequentially until `shutdown` fires.
    ///
    /// Connection N+1 is not accepted before connection N is finished. A
    /// shutdown during an in-flight connection abandons that connection.
    pub async fn serve_forever(self, shutdown: &ShutdownSignal) {
        loop {
            if shutdown.is_requested() {
                break;
            }

            tokio::select! {
                () = shutdown.wait() => break,

                accept_result = self.listener.accept() => {
                    match accept_result {
                        Ok((stream, peer_addr)) => {
                            let conn = serve_connection(stream, peer_addr, Arc::clone(&self.root));
                            tokio::select! {
                                result = conn => {
                                    if let Err(e) = result {
                                        logger::log_connection_error(&peer_addr, &e);
                                    }
                                }
                                () = shutdown.wait() => {
                                    logger::log_connection_abandoned(&peer_addr);
                                    break;
                                }
                            }
                        }
                        Err(e) => {
                            logger::log_error(&format!("Failed to accept connection: {e}"));
                        }
                    }
                }
            }
        }

        logger::log_shutdown_started();
        drop(self.listener);
        logger::log_server_stopped();
    }
}
