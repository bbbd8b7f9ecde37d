//! Logger module
//!
//! Console logging for the file server:
//! - The URL line and shutdown notices on stdout
//! - One access line per request on stderr
//! - Warnings and errors on stderr

mod format;

pub use format::{version_str, AccessLogEntry};

use std::net::SocketAddr;
use std::path::Path;

pub fn log_server_start(addr: &SocketAddr, root: &Path) {
    println!("Serving at http://localhost:{}", addr.port());
    eprintln!("[INFO] Listening on {addr}, serving {}", root.display());
}

pub fn log_shutdown_started() {
    println!("\nShutting down server...");
}

pub fn log_server_stopped() {
    println!("Server stopped.");
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry) {
    eprintln!("{}", entry.format());
}

pub fn log_connection_error(peer_addr: &SocketAddr, err: &impl std::fmt::Debug) {
    eprintln!("[ERROR] Failed to serve connection from {peer_addr}: {err:?}");
}

pub fn log_connection_abandoned(peer_addr: &SocketAddr) {
    eprintln!("[WARN] Connection from {peer_addr} abandoned on shutdown");
}

pub fn log_error(message: &str) {
    eprintln!("[ERROR] {message}");
}

pub fn log_warning(message: &str) {
    eprintln!("[WARN] {message}");
}
