//! Shared API, exported to `console-stream`, `console-command`, and the `engine-console` binary.
//!
//! Everything the console says to the engine is described in this crate.

pub mod chunk;
pub mod config;
pub mod endpoint;
pub mod env;
pub mod error;
pub mod input;
pub mod message;
pub mod vocabulary;
