//! Access log format module
//!
//! One line per request in the classic development-server layout:
//! `127.0.0.1 - - [18/Oct/2026 10:04:51] "GET /index.html HTTP/1.1" 200 5120`

use chrono::Local;

/// Access log entry containing request/response information
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    /// Client IP address
    pub remote_addr: String,
    /// Request timestamp
    pub time: chrono::DateTime<Local>,
    /// HTTP method (GET, OPTIONS, etc.)
    pub method: String,
    /// Request URI including query string
    pub uri: String,
    /// HTTP version (1.0, 1.1)
    pub http_version: String,
    /// Response status code
    pub status: u16,
    /// Response body size in bytes, None when unknown
    pub body_bytes: Option<u64>,
}

impl AccessLogEntry {
    /// Create a new access log entry with current timestamp
    pub fn new(remote_addr: String, method: String, uri: String) -> Self {
        Self {
            remote_addr,
            time: Local::now(),
            method,
            uri,
            http_version: "1.1".to_string(),
            status: 200,
            body_bytes: None,
        }
    }

    pub fn format(&self) -> String {
        let size = self
            .body_bytes
            .map_or_else(|| "-".to_string(), |b| b.to_string());
        format!(
            "{} - - [{}] \"{} {} HTTP/{}\" {} {}",
            self.remote_addr,
            self.time.format("%d/%b/%Y %H:%M:%S"),
            self.method,
            self.uri,
            self.http_version,
            self.status,
            size,
        )
    }
}

/// Render an HTTP version the way it appears in a request line
pub fn version_str(version: hyper::Version) -> &'static str {
    match version {
        hyper::Version::HTTP_09 => "0.9",
        hyper::Version::HTTP_10 => "1.0",
        hyper::Version::HTTP_2 => "2",
        hyper::Version::HTTP_3 => "3",
        _ => "1.1",
    }
}
