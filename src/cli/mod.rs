//! CLI module
//!
//! Command-line interface for listing and exporting channels.
//!
//! # Commands
//!
//! - `channels` - List channels that can be exported
//! - `export` - Write one channel's messages to a CSV or PDF file
//! - `serve` - Start HTTP server mode

mod commands;
mod runner;
mod server;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
pub use server::{router, serve, ServerConfig};
