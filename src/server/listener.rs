// Listener module
// Creates the TCP listener for the accept loop

use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::error::{Error, Result};

/// Pending connections queued by the kernel while one is being served
const BACKLOG: i32 = 5;

/// Create a `TcpListener` bound to `addr`.
///
/// `SO_REUSEADDR` is enabled so a restart can rebind a port still in
/// `TIME_WAIT`. `SO_REUSEPORT` is not: a second server on the same port must
/// fail to start.
///
/// # Errors
///
/// * `Error::Bind` - port in use, or no permission to bind it
pub fn create_listener(addr: SocketAddr) -> Result<TcpListener> {
    bind(addr).map_err(|source| Error::Bind { addr, source })
}

fn bind(addr: SocketAddr) -> std::io::Result<TcpListener> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    socket.set_reuse_address(true)?;

    // Set non-blocking mode for async compatibility
    socket.set_nonblocking(true)?;

    socket.bind(&addr.into())?;
    socket.listen(BACKLOG)?;

    // Convert socket2::Socket to std::net::TcpListener, then to tokio::net::TcpListener
    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}
