//! Request dispatch
//!
//! `OPTIONS` is acknowledged without touching the filesystem, everything the
//! static file server understands goes to [`static_files::serve`], and the
//! response headers are finished in one place on the way out.

use super::{headers, static_files};
use crate::http::{self, ResponseBody};
use crate::logger::{self, AccessLogEntry};
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

/// Handle one request against the served root
///
/// The body is never read, so any body type works.
pub async fn handle_request<B>(
    req: Request<B>,
    root: Arc<Path>,
    peer_addr: SocketAddr,
) -> Result<Response<ResponseBody>, Infallible> {
    let mut response = dispatch(&req, &root).await;
    headers::finish_headers(response.headers_mut());
    log_access(&req, &response, peer_addr);
    Ok(response)
}

async fn dispatch<B>(req: &Request<B>, root: &Path) -> Response<ResponseBody> {
    match *req.method() {
        Method::OPTIONS => http::build_options_response(),
        Method::GET | Method::HEAD | Method::POST => static_files::serve(req, root).await,
        _ => {
            logger::log_warning(&format!("Unsupported method ('{}')", req.method()));
            http::build_501_response()
        }
    }
}

fn log_access<B>(req: &Request<B>, response: &Response<ResponseBody>, peer_addr: SocketAddr) {
    let uri = req
        .uri()
        .path_and_query()
        .map_or_else(|| req.uri().to_string(), ToString::to_string);
    let mut entry = AccessLogEntry::new(peer_addr.ip().to_string(), req.method().to_string(), uri);
    entry.http_version = logger::version_str(req.version()).to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes = response.body().size_hint().exact();
    logger::log_access(&entry);
}
