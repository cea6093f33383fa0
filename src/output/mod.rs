//! Output module
//!
//! Serializes prepared messages into downloadable files.
//!
//! # Overview
//!
//! This module provides:
//! - CSV serialization through the `csv` crate
//! - PDF rendering of a laid-out document through `printpdf`
//! - `ExportArtifact`, the finished file with its name and content type
//! - Timestamp formatting shared by both formats

mod csv;
mod pdf;

pub use self::csv::{csv_bytes, write_csv, CSV_HEADERS};
pub use self::pdf::{message_rows, render_pdf};

use crate::error::Result;
use crate::types::ExportFormat;
use chrono::{DateTime, TimeZone, Utc};
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// `M/D/YYYY, h:mm:ss AM`
const TIMESTAMP_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Format a timestamp for display in the given time zone
pub fn format_timestamp<Tz>(timestamp: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    timestamp
        .with_timezone(tz)
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

/// A finished export file held in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    /// Wrap rendered bytes with the file details of `format`
    pub fn new(format: ExportFormat, bytes: Vec<u8>) -> Self {
        Self {
            filename: format.filename().to_string(),
            content_type: format.content_type().to_string(),
            bytes,
        }
    }

    /// Size in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Write the file
    ///
    /// When `target` is an existing directory the artifact's own filename is
    /// used inside it; otherwise `target` is the file path.
    pub fn write_to(&self, target: &Path) -> Result<PathBuf> {
        let path = if target.is_dir() {
            target.join(&self.filename)
        } else {
            target.to_path_buf()
        };
        fs::write(&path, &self.bytes)?;
        info!("Wrote {} bytes to {}", self.bytes.len(), path.display());
        Ok(path)
    }
}
