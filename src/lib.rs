// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Message Exporter
//!
//! Exports the messages of one messaging-platform channel to a CSV file or a
//! paginated A4 PDF.
//!
//! ## Features
//!
//! - **Continuation-token pagination**: every list endpoint is drained into a
//!   single ordered sequence, bounded against runaway APIs
//! - **Sender, date and order filters**: client, internal or all senders;
//!   last 7 days, last 30 days or all time; oldest or newest first
//! - **CSV output**: one row per message with sender name, email, local
//!   timestamp and text
//! - **PDF output**: bordered message blocks flowed across numbered pages
//! - **CLI and HTTP server**: `channels`, `export` and `serve`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use message_exporter::{ExportEngine, ExportOptions, ExporterConfig, Result};
//! use message_exporter::types::ExportFormat;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ExporterConfig::load(None)?;
//!     let mut engine = ExportEngine::from_config(&config, None)?;
//!
//!     let options = ExportOptions::new("channel-id").with_format(ExportFormat::Pdf);
//!     let artifact = engine.export(&options).await?;
//!     artifact.write_to(std::path::Path::new("."))?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          ExportEngine                           │
//! │  load_directory() → Directory     export(options) → Artifact    │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────┬───────────┬───────┴───────┬───────────┬─────────────┐
//! │   API    │   HTTP    │   Paginate    │  Export   │   Output    │
//! ├──────────┼───────────┼───────────────┼───────────┼─────────────┤
//! │ Channels │ API key   │ nextToken     │ Senders   │ CSV         │
//! │ Users    │ Rate Limit│ Page bound    │ Sort      │ Layout      │
//! │ Messages │ Timeout   │ Deadline      │ Range     │ PDF         │
//! └──────────┴───────────┴───────────────┴───────────┴─────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the exporter
pub mod error;

/// Common types and option enums
pub mod types;

/// HTTP client with rate limiting
pub mod http;

/// Continuation-token pagination
pub mod pagination;

/// Platform API models and endpoints
pub mod api;

/// Lookup tables and channel naming
pub mod directory;

/// Sender selection, sorting and date filtering
pub mod export;

/// PDF page layout
pub mod layout;

/// CSV and PDF rendering
pub mod output;

/// Main execution engine
pub mod engine;

/// Configuration loading
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::ExporterConfig;
pub use engine::{ExportEngine, ExportStats};
pub use error::{Error, Result};
pub use export::ExportOptions;
pub use output::ExportArtifact;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
