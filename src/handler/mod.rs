//! Request handler module
//!
//! Static file serving from the working directory, with cross-origin headers
//! on every response.

pub mod headers;
pub mod listing;
pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
