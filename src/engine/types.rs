//! Engine types
//!
//! Statistics collected while running an export.

use serde::Serialize;

/// Statistics from one export
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportStats {
    /// Messages fetched from the channel
    pub messages_fetched: usize,
    /// Pages requested for the channel's messages
    pub message_pages: u32,
    /// Messages written to the file after filtering
    pub messages_exported: usize,
    /// Pages in the PDF document (zero for CSV)
    pub document_pages: usize,
    /// Size of the produced file
    pub bytes_written: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl ExportStats {
    /// Create new stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the message fetch
    pub fn set_fetched(&mut self, messages: usize, pages: u32) {
        self.messages_fetched = messages;
        self.message_pages = pages;
    }

    /// Record the exported count
    pub fn set_exported(&mut self, count: usize) {
        self.messages_exported = count;
    }

    /// Record the document size
    pub fn set_document_pages(&mut self, pages: usize) {
        self.document_pages = pages;
    }

    /// Record the file size
    pub fn set_bytes(&mut self, bytes: usize) {
        self.bytes_written = bytes;
    }

    /// Set duration
    pub fn set_duration(&mut self, ms: u64) {
        self.duration_ms = ms;
    }

    /// Messages removed by the sender scope and time window
    pub fn messages_filtered(&self) -> usize {
        self.messages_fetched.saturating_sub(self.messages_exported)
    }
}
