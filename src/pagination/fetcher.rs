//! Paginated fetch-and-aggregate loop

use super::types::{FetchLimits, PageSource, PaginationState};
use crate::error::{Error, Result};
use tracing::{debug, info};

/// Drains a [`PageSource`] into a single ordered sequence
///
/// Pages are requested strictly one after another. Records are appended in
/// the order the API returns them and are never reordered.
#[derive(Debug, Clone, Default)]
pub struct PaginatedFetcher {
    limits: FetchLimits,
}

impl PaginatedFetcher {
    /// Create a fetcher with the given bounds
    pub fn new(limits: FetchLimits) -> Self {
        Self { limits }
    }

    /// Bounds in effect
    pub fn limits(&self) -> &FetchLimits {
        &self.limits
    }

    /// Fetch every page of `source`
    pub async fn fetch_all<S>(&self, source: &S) -> Result<Vec<S::Item>>
    where
        S: PageSource + ?Sized,
    {
        let (records, _) = self.fetch_with_state(source).await?;
        Ok(records)
    }

    /// Fetch every page of `source`, also returning the final loop state
    pub async fn fetch_with_state<S>(&self, source: &S) -> Result<(Vec<S::Item>, PaginationState)>
    where
        S: PageSource + ?Sized,
    {
        match self.limits.deadline {
            Some(deadline) => tokio::time::timeout(deadline, self.drain(source))
                .await
                .map_err(|_| Error::Timeout {
                    timeout_ms: deadline.as_millis() as u64,
                })?,
            None => self.drain(source).await,
        }
    }

    async fn drain<S>(&self, source: &S) -> Result<(Vec<S::Item>, PaginationState)>
    where
        S: PageSource + ?Sized,
    {
        let resource = source.resource();
        let mut state = PaginationState::new();
        let mut records = Vec::new();

        loop {
            if state.pages_fetched >= self.limits.max_pages {
                return Err(Error::exhausted(
                    resource,
                    format!("{} pages", self.limits.max_pages),
                ));
            }

            let page = source
                .list(state.cursor.as_deref(), self.limits.page_size)
                .await
                .map_err(|e| Error::fetch(resource, state.cursor.as_deref(), e))?;

            let (data, next_token) = page.into_parts();
            let count = data.len();
            records.extend(data);
            state.record_page(count);

            debug!(
                "Fetched {} page {}: {} records",
                resource, state.pages_fetched, count
            );

            if let Some(max_records) = self.limits.max_records {
                if records.len() > max_records {
                    return Err(Error::exhausted(resource, format!("{max_records} records")));
                }
            }

            match next_token {
                Some(token) => state.set_cursor(token),
                None => {
                    state.mark_done();
                    break;
                }
            }
        }

        info!(
            "Fetched {} {} across {} pages",
            records.len(),
            resource,
            state.pages_fetched
        );
        Ok((records, state))
    }
}
