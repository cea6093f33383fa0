//! HTTP client module
//!
//! Provides the HTTP client used to talk to the messaging platform.
//!
//! # Features
//!
//! - **Default Headers**: API key attached to every request
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Error Classification**: Non-success statuses become `Error::HttpStatus`

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};

#[cfg(test)]
mod tests;
