//! HTTP protocol layer module
//!
//! Response builders and MIME detection, independent of how paths are resolved.

pub mod body;
pub mod mime;
pub mod response;

pub use body::ResponseBody;

// Re-export commonly used builders
pub use response::{
    build_403_response, build_404_response, build_501_response, build_file_response,
    build_html_response, build_options_response, build_redirect_response,
};
