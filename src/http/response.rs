//! HTTP response building module
//!
//! Builders for every response the file server sends. None of them add the
//! cross-origin headers; that happens once, in the handler, after the
//! response is built.

use super::body::ResponseBody;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

/// Content-Type of generated HTML (directory listings)
pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Content-Type of generated error pages
pub const ERROR_CONTENT_TYPE: &str = "text/html;charset=utf-8";

/// Build 200 response carrying a file's bytes
///
/// For HEAD the body is dropped but `Content-Length` still reports the file size.
pub fn build_file_response(data: Bytes, content_type: &str, is_head: bool) -> Response<ResponseBody> {
    let content_length = data.len();
    let body = if is_head { Bytes::new() } else { data };

    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .body(ResponseBody::new(body))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(ResponseBody::empty())
        })
}

/// Build 200 response for a generated HTML page
pub fn build_html_response(content: String, is_head: bool) -> Response<ResponseBody> {
    build_file_response(Bytes::from(content), HTML_CONTENT_TYPE, is_head)
}

/// Build OPTIONS response (preflight acknowledgement)
///
/// Always 200 with an empty body, whatever was asked for.
pub fn build_options_response() -> Response<ResponseBody> {
    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Length", 0)
        .body(ResponseBody::empty())
        .unwrap_or_else(|e| {
            log_build_error("OPTIONS", &e);
            Response::new(ResponseBody::empty())
        })
}

/// Build 301 redirect, used to add the trailing slash to directory paths
pub fn build_redirect_response(location: &str) -> Response<ResponseBody> {
    Response::builder()
        .status(StatusCode::MOVED_PERMANENTLY)
        .header("Location", location)
        .header("Content-Length", 0)
        .body(ResponseBody::empty())
        .unwrap_or_else(|e| {
            log_build_error("301", &e);
            let mut resp = Response::new(ResponseBody::empty());
            *resp.status_mut() = StatusCode::MOVED_PERMANENTLY;
            resp
        })
}

/// Build an error response carrying a small HTML error page
pub fn build_error_response(status: StatusCode, is_head: bool) -> Response<ResponseBody> {
    let page = error_page(status);
    let content_length = page.len();
    let body = if is_head { Bytes::new() } else { Bytes::from(page) };

    Response::builder()
        .status(status)
        .header("Content-Type", ERROR_CONTENT_TYPE)
        .header("Content-Length", content_length)
        .body(ResponseBody::new(body))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            let mut resp = Response::new(ResponseBody::empty());
            *resp.status_mut() = status;
            resp
        })
}

fn error_page(status: StatusCode) -> String {
    let code = status.as_u16();
    let reason = status.canonical_reason().unwrap_or("Error");
    format!(
        "<!DOCTYPE HTML>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>Error response</title>\n\
         </head>\n\
         <body>\n\
         <h1>Error response</h1>\n\
         <p>Error code: {code}</p>\n\
         <p>Message: {reason}.</p>\n\
         </body>\n\
         </html>\n"
    )
}

pub fn build_404_response(is_head: bool) -> Response<ResponseBody> {
    build_error_response(StatusCode::NOT_FOUND, is_head)
}

pub fn build_403_response(is_head: bool) -> Response<ResponseBody> {
    build_error_response(StatusCode::FORBIDDEN, is_head)
}

/// Build 501 response for methods the file server does not implement
pub fn build_501_response() -> Response<ResponseBody> {
    build_error_response(StatusCode::NOT_IMPLEMENTED, false)
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
