//! Pagination module
//!
//! Continuation-token pagination over the platform's list endpoints.
//!
//! # Overview
//!
//! Every list endpoint accepts a page size and an optional continuation
//! token, and answers with a page of records plus the token for the next
//! page. `PaginatedFetcher` keeps calling a `PageSource` until no token is
//! returned, bounded by `FetchLimits` so a misbehaving API cannot loop
//! forever.

mod fetcher;
mod types;

pub use fetcher::PaginatedFetcher;
pub use types::{FetchLimits, ListPage, PageSource, PaginationState};
