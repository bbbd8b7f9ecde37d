// Server module entry point
// Listener setup, sequential accept loop and signal-driven shutdown

pub mod connection;
pub mod listener;
pub mod signal;

// `loop` is a keyword, so the file is mounted as server_loop
#[path = "loop.rs"]
pub mod server_loop;

// Re-export commonly used types
pub use server_loop::Server;
pub use signal::ShutdownSignal;
