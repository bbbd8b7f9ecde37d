// Connection handling module
// Serves a single accepted TCP connection to completion

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpStream;

use crate::handler;

/// Serve one connection with the request handler.
///
/// Keep-alive is off: the connection carries a single request and is closed
/// once the response is written, so the accept loop can move on.
///
/// # Arguments
///
/// * `stream` - The accepted TCP stream
/// * `peer_addr` - The peer's socket address, for access logging
/// * `root` - Canonical served root
pub async fn serve_connection(
    stream: TcpStream,
    peer_addr: SocketAddr,
    root: Arc<Path>,
) -> Result<(), hyper::Error> {
    let io = TokioIo::new(stream);

    let mut builder = http1::Builder::new();
    builder.keep_alive(false);
    builder.title_case_headers(true);

    builder
        .serve_connection(
            io,
            service_fn(move |req| handler::handle_request(req, Arc::clone(&root), peer_addr)),
        )
        .await
}
