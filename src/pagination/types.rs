//! Pagination types and traits
//!
//! Defines the list-page shape returned by the platform, the capability a
//! paginated resource exposes, and the bounds applied to one fetch loop.

use crate::error::Result;
use crate::types::{OptionStringExt, ResourceKind};
use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use std::time::Duration;

/// One page of a list endpoint
///
/// `data` missing or `null` is an empty page and `null` entries inside it are
/// skipped. `next_token` absent or empty means the stream has ended.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: serde::de::DeserializeOwned"))]
pub struct ListPage<T> {
    /// Records on this page, in API order
    #[serde(default, deserialize_with = "null_as_empty")]
    pub data: Vec<T>,
    /// Continuation token for the next page
    #[serde(default, rename = "nextToken")]
    pub next_token: Option<String>,
}

impl<T> ListPage<T> {
    /// Create a final page
    pub fn last(data: Vec<T>) -> Self {
        Self {
            data,
            next_token: None,
        }
    }

    /// Create a page followed by more data
    pub fn with_next(data: Vec<T>, token: impl Into<String>) -> Self {
        Self {
            data,
            next_token: Some(token.into()),
        }
    }

    /// Split into records and the usable continuation token
    pub fn into_parts(self) -> (Vec<T>, Option<String>) {
        (self.data, self.next_token.none_if_empty())
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let records = Option::<Vec<Option<T>>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(records.into_iter().flatten().collect())
}

/// A resource that can be listed one page at a time
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Record type produced by this source
    type Item: Send;

    /// Which resource this source lists (used in errors and logs)
    fn resource(&self) -> ResourceKind;

    /// Fetch one page starting at `token` (none for the first page)
    async fn list(&self, token: Option<&str>, limit: u32) -> Result<ListPage<Self::Item>>;
}

/// Bounds applied to one fetch loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchLimits {
    /// Records requested per page
    pub page_size: u32,
    /// Maximum pages before the loop gives up
    pub max_pages: u32,
    /// Maximum accumulated records before the loop gives up
    pub max_records: Option<usize>,
    /// Deadline for the whole loop
    pub deadline: Option<Duration>,
}

impl Default for FetchLimits {
    fn default() -> Self {
        Self {
            page_size: 100,
            max_pages: 10_000,
            max_records: None,
            deadline: None,
        }
    }
}

impl FetchLimits {
    /// Set page size
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the page bound
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Set the record bound
    #[must_use]
    pub fn with_max_records(mut self, max_records: usize) -> Self {
        self.max_records = Some(max_records);
        self
    }

    /// Set the deadline
    #[must_use]
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// Tracks pagination state during one fetch loop
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    /// Pages fetched so far
    pub pages_fetched: u32,
    /// Token for the next request
    pub cursor: Option<String>,
    /// Total records fetched so far
    pub total_fetched: u64,
    /// Is pagination complete?
    pub done: bool,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fetched page
    pub fn record_page(&mut self, records: usize) {
        self.pages_fetched += 1;
        self.total_fetched += records as u64;
    }

    /// Set cursor
    pub fn set_cursor(&mut self, cursor: String) {
        self.cursor = Some(cursor);
    }

    /// Mark pagination as complete
    pub fn mark_done(&mut self) {
        self.cursor = None;
        self.done = true;
    }
}
