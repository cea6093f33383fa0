//! Export request options

use crate::error::{Error, Result};
use crate::types::{ExportFormat, SenderScope, SortOrder, TimeRange};
use serde::{Deserialize, Serialize};

/// Message shown when an export is requested without a channel
pub const NO_CHANNEL_MESSAGE: &str = "Please select a channel to export messages";

/// Everything the operator chooses for one export
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    pub format: ExportFormat,
    /// Channel whose messages are exported
    pub channel_id: String,
    pub sender_scope: SenderScope,
    pub sort_order: SortOrder,
    pub time_range: TimeRange,
}

impl ExportOptions {
    /// Options for `channel_id` with every other choice at its default
    pub fn new(channel_id: impl Into<String>) -> Self {
        Self {
            channel_id: channel_id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_format(mut self, format: ExportFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_sender_scope(mut self, scope: SenderScope) -> Self {
        self.sender_scope = scope;
        self
    }

    #[must_use]
    pub fn with_sort_order(mut self, order: SortOrder) -> Self {
        self.sort_order = order;
        self
    }

    #[must_use]
    pub fn with_time_range(mut self, range: TimeRange) -> Self {
        self.time_range = range;
        self
    }

    /// Reject options that cannot produce an export
    pub fn validate(&self) -> Result<()> {
        if self.channel_id.trim().is_empty() {
            return Err(Error::config(NO_CHANNEL_MESSAGE));
        }
        Ok(())
    }

    /// Sort order actually applied; PDF documents are always newest first
    pub fn effective_sort_order(&self) -> SortOrder {
        match self.format {
            ExportFormat::Pdf => SortOrder::Descending,
            ExportFormat::Csv => self.sort_order,
        }
    }
}
