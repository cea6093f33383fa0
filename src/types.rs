//! Common types used throughout the exporter
//!
//! This module contains the user-selectable export options, the resource
//! kinds the external API exposes, and small utility traits shared across
//! modules.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Export Format
// ============================================================================

/// File format produced by an export
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum ExportFormat {
    /// Comma separated values, one row per message
    #[default]
    Csv,
    /// Paginated A4 document
    Pdf,
}

impl ExportFormat {
    /// Name of the downloaded file
    pub fn filename(self) -> &'static str {
        match self {
            ExportFormat::Csv => "messages.csv",
            ExportFormat::Pdf => "messages.pdf",
        }
    }

    /// MIME type of the downloaded file
    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Pdf => "application/pdf",
        }
    }
}

// ============================================================================
// Sender Scope
// ============================================================================

/// Which senders' messages are exported
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum SenderScope {
    /// Internal users and client users
    #[default]
    #[serde(alias = "all")]
    #[value(alias = "all")]
    InternalAndClient,
    /// Internal users only
    Internal,
    /// Client users only
    Client,
}

// ============================================================================
// Sort Order
// ============================================================================

/// Ordering of exported messages by their last-updated timestamp
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum SortOrder {
    /// Oldest first
    #[default]
    Ascending,
    /// Newest first
    Descending,
}

// ============================================================================
// Time Range
// ============================================================================

/// Date window applied to the last-updated timestamp
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum TimeRange {
    /// Messages updated within the last 7 days
    #[default]
    LastSevenDays,
    /// Messages updated within the last 30 days
    LastMonth,
    /// No date restriction
    AllTime,
}

impl TimeRange {
    /// Window length in whole days, `None` for an unbounded window
    pub fn max_age_days(self) -> Option<i64> {
        match self {
            TimeRange::LastSevenDays => Some(7),
            TimeRange::LastMonth => Some(30),
            TimeRange::AllTime => None,
        }
    }
}

// ============================================================================
// Resource Kind
// ============================================================================

/// Resources listed through the external API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    MessageChannels,
    Companies,
    Clients,
    InternalUsers,
    Messages,
}

impl ResourceKind {
    /// Endpoint path relative to the API base URL
    pub fn path(self) -> &'static str {
        match self {
            ResourceKind::MessageChannels => "/message-channels",
            ResourceKind::Companies => "/companies",
            ResourceKind::Clients => "/clients",
            ResourceKind::InternalUsers => "/internal-users",
            ResourceKind::Messages => "/messages",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceKind::MessageChannels => "message channels",
            ResourceKind::Companies => "companies",
            ResourceKind::Clients => "clients",
            ResourceKind::InternalUsers => "internal users",
            ResourceKind::Messages => "messages",
        };
        f.write_str(name)
    }
}

// ============================================================================
// Utilities
// ============================================================================

/// Extension trait for Option<String> to handle empty strings
pub trait OptionStringExt {
    /// Returns None if the string is empty
    fn none_if_empty(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_empty(self) -> Option<String> {
        self.filter(|s| !s.is_empty())
    }
}

impl OptionStringExt for String {
    fn none_if_empty(self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_format_file_details() {
        assert_eq!(ExportFormat::Csv.filename(), "messages.csv");
        assert_eq!(ExportFormat::Pdf.filename(), "messages.pdf");
        assert_eq!(ExportFormat::Csv.content_type(), "text/csv");
        assert_eq!(ExportFormat::Pdf.content_type(), "application/pdf");
    }

    #[test]
    fn test_option_serde_names() {
        let scope: SenderScope = serde_json::from_str("\"internal_and_client\"").unwrap();
        assert_eq!(scope, SenderScope::InternalAndClient);
        let scope: SenderScope = serde_json::from_str("\"all\"").unwrap();
        assert_eq!(scope, SenderScope::InternalAndClient);

        let range: TimeRange = serde_json::from_str("\"last_seven_days\"").unwrap();
        assert_eq!(range, TimeRange::LastSevenDays);

        let json = serde_json::to_string(&SortOrder::Descending).unwrap();
        assert_eq!(json, "\"descending\"");
    }

    #[test]
    fn test_time_range_days() {
        assert_eq!(TimeRange::LastSevenDays.max_age_days(), Some(7));
        assert_eq!(TimeRange::LastMonth.max_age_days(), Some(30));
        assert_eq!(TimeRange::AllTime.max_age_days(), None);
    }

    #[test]
    fn test_resource_kind_display_and_path() {
        assert_eq!(ResourceKind::InternalUsers.to_string(), "internal users");
        assert_eq!(ResourceKind::MessageChannels.path(), "/message-channels");
    }

    #[test]
    fn test_option_string_none_if_empty() {
        assert_eq!(
            Some("test".to_string()).none_if_empty(),
            Some("test".to_string())
        );
        assert_eq!(Some(String::new()).none_if_empty(), None);
        assert_eq!(None::<String>.none_if_empty(), None);
        assert_eq!(String::new().none_if_empty(), None);
    }
}
