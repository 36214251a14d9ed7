//! The transport between the console and the engine: a plain TCP stream.
//!
//! Outbound payloads are written whole, and inbound bytes are read into a fixed buffer,
//! one read at a time, and forwarded as unframed chunks.

mod client;
mod common;
mod receive;

pub use client::connect;
pub use common::{shutdown, write_payload};
pub use receive::{receive_loop, ReceiveOutcome};

/// The size of the reusable receive buffer, in bytes
pub const READ_BUFFER_SIZE: usize = console_api::config::DEFAULT_READ_BUFFER_SIZE;

/// The grace period between shutting down a stream, and closing the handle
pub const SHUTDOWN_GRACE: std::time::Duration =
    std::time::Duration::from_millis(console_api::config::DEFAULT_SHUTDOWN_GRACE_MS);
