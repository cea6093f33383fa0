//! Execution engine module
//!
//! Runs one export request end to end.
//!
//! # Overview
//!
//! The engine module provides:
//! - `ExportEngine` - Loads lookup tables, fetches a channel's messages,
//!   prepares them and renders the requested file
//! - `ExportStats` - What happened during the last export

mod types;

pub use types::ExportStats;

use crate::api::MessagingApi;
use crate::config::ExporterConfig;
use crate::directory::{ChannelSummary, Directory};
use crate::error::Result;
use crate::export::{prepare, ExportOptions};
use crate::layout::{DocumentPaginator, DocumentPreamble, LayoutConfig};
use crate::output::{csv_bytes, format_timestamp, message_rows, render_pdf, ExportArtifact};
use crate::pagination::{FetchLimits, PaginatedFetcher};
use crate::types::ExportFormat;
use chrono::{DateTime, Local, TimeZone, Utc};
use std::fmt::Display;
use std::time::Instant;
use tracing::{debug, info};

/// Export engine for one API client
#[derive(Debug)]
pub struct ExportEngine {
    /// Platform client
    api: MessagingApi,
    /// Pagination loop with its bounds
    fetcher: PaginatedFetcher,
    /// PDF geometry
    layout: LayoutConfig,
    /// Statistics
    stats: ExportStats,
}

impl ExportEngine {
    /// Create a new export engine
    pub fn new(api: MessagingApi, limits: FetchLimits) -> Self {
        Self {
            api,
            fetcher: PaginatedFetcher::new(limits),
            layout: LayoutConfig::default(),
            stats: ExportStats::default(),
        }
    }

    /// Build an engine from validated configuration
    pub fn from_config(config: &ExporterConfig, session_token: Option<String>) -> Result<Self> {
        config.validate()?;
        let api = MessagingApi::new(&config.api)?.with_session_token(session_token);
        Ok(Self::new(api, config.fetch.limits()).with_layout(config.layout.clone()))
    }

    /// Set PDF layout configuration
    #[must_use]
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    /// Get statistics of the last export
    pub fn stats(&self) -> &ExportStats {
        &self.stats
    }

    /// Fetch every lookup table
    pub async fn load_directory(&self) -> Result<Directory> {
        Directory::load(&self.api, &self.fetcher).await
    }

    /// Channels that can be exported, in display order
    pub async fn list_channels(&self) -> Result<Vec<ChannelSummary>> {
        let directory = self.load_directory().await?;
        Ok(directory.channel_summaries())
    }

    /// Export a channel using the current time and the local time zone
    pub async fn export(&mut self, options: &ExportOptions) -> Result<ExportArtifact> {
        self.export_at(options, Utc::now(), &Local).await
    }

    /// Export a channel as seen at `now`, formatting times in `tz`
    pub async fn export_at<Tz>(
        &mut self,
        options: &ExportOptions,
        now: DateTime<Utc>,
        tz: &Tz,
    ) -> Result<ExportArtifact>
    where
        Tz: TimeZone + Sync,
        Tz::Offset: Display,
    {
        options.validate()?;

        let start = Instant::now();
        let mut stats = ExportStats::new();
        info!(
            "Starting {:?} export for channel {}",
            options.format, options.channel_id
        );

        let directory = self.load_directory().await?;
        let (messages, fetch_state) = self
            .fetcher
            .fetch_with_state(&self.api.messages(options.channel_id.as_str()))
            .await?;
        stats.set_fetched(messages.len(), fetch_state.pages_fetched);

        let prepared = prepare(messages, &directory, options, now);
        stats.set_exported(prepared.len());
        debug!(
            "{} of {} messages selected",
            prepared.len(),
            stats.messages_fetched
        );

        let bytes = match options.format {
            ExportFormat::Csv => csv_bytes(&prepared, tz)?,
            ExportFormat::Pdf => {
                let title = directory.channel_title(&options.channel_id);
                let preamble = DocumentPreamble {
                    title: title.clone(),
                    generated_at: format_timestamp(&now, tz),
                };
                let rows = message_rows(&prepared, tz);
                let document = DocumentPaginator::new(self.layout.clone()).layout(&preamble, &rows);
                stats.set_document_pages(document.page_count());
                render_pdf(&document, &self.layout, &title)?
            }
        };

        stats.set_bytes(bytes.len());
        stats.set_duration(start.elapsed().as_millis() as u64);
        info!(
            "Exported {} messages ({} bytes) in {}ms",
            stats.messages_exported, stats.bytes_written, stats.duration_ms
        );
        self.stats = stats;

        Ok(ExportArtifact::new(options.format, bytes))
    }
}
