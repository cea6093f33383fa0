//! CLI commands and argument parsing

use crate::types::{ExportFormat, SenderScope, SortOrder, TimeRange};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Export messaging-platform channels to CSV or PDF
#[derive(Parser, Debug)]
#[command(name = "message-exporter")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Platform API key (overrides config file and environment)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Platform API base URL (overrides config file and environment)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Session token forwarded to the platform
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List channels that can be exported
    Channels {
        /// Listing format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Pretty)]
        output: OutputFormat,
    },

    /// Export the messages of one channel
    Export {
        /// Channel id
        #[arg(short, long)]
        channel: Option<String>,

        /// File format
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,

        /// Which senders to include
        #[arg(long, value_enum, default_value_t = SenderScope::InternalAndClient)]
        sender: SenderScope,

        /// Order by last update (PDF is always newest first)
        #[arg(long, value_enum, default_value_t = SortOrder::Ascending)]
        sort: SortOrder,

        /// Date window
        #[arg(long, value_enum, default_value_t = TimeRange::LastSevenDays)]
        range: TimeRange,

        /// Output file or directory (default: current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Start HTTP server mode
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },
}

/// Listing format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one channel per line)
    Json,
    /// Human-readable output
    Pretty,
}
