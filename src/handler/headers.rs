//! Response header emission
//!
//! Runs once per response, after the body and content headers are settled.
//! The cross-origin headers always go last, in a fixed order.

use chrono::{DateTime, Utc};
use hyper::header::{HeaderMap, HeaderName, HeaderValue, CONNECTION, DATE, SERVER};

/// Value of the `Server` header
pub const SERVER_NAME: &str = concat!("cors-file-server/", env!("CARGO_PKG_VERSION"));

/// Cross-origin headers appended to every response, in wire order
pub const CORS_HEADERS: [(&str, &str); 3] = [
    ("access-control-allow-origin", "*"),
    ("access-control-allow-methods", "GET, POST, OPTIONS"),
    ("access-control-allow-headers", "X-Requested-With, Content-Type"),
];

/// Finish a response's headers right before it is handed to the connection
pub fn finish_headers(headers: &mut HeaderMap) {
    headers.insert(SERVER, HeaderValue::from_static(SERVER_NAME));
    if let Ok(date) = HeaderValue::from_str(&http_date(Utc::now())) {
        headers.insert(DATE, date);
    }
    // One request per connection
    headers.insert(CONNECTION, HeaderValue::from_static("close"));
    append_cors_headers(headers);
}

/// Append the three CORS headers after everything already present
pub fn append_cors_headers(headers: &mut HeaderMap) {
    for (name, value) in CORS_HEADERS {
        headers.append(HeaderName::from_static(name), HeaderValue::from_static(value));
    }
}

/// Format a timestamp as an IMF-fixdate (`Sun, 18 Oct 2026 09:05:07 GMT`)
fn http_date(now: DateTime<Utc>) -> String {
    now.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}
