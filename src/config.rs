//! Configuration for the exporter
//!
//! Settings are read from an optional YAML file, then overridden by
//! environment variables and finally by command-line flags.
//!
//! ```yaml
//! api:
//!   base_url: "https://api.copilot.com/v1"
//!   api_key_header: "X-API-KEY"
//!   timeout_seconds: 30
//!   rate_limit:
//!     requests_per_second: 10
//!     burst_size: 10
//! fetch:
//!   page_size: 100
//!   max_pages: 10000
//! layout:
//!   row_spacing: 6.0
//! ```

use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::layout::LayoutConfig;
use crate::pagination::FetchLimits;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Environment variable holding the platform API key
pub const API_KEY_ENV: &str = "MESSAGE_EXPORTER_API_KEY";

/// Environment variable overriding the API base URL
pub const BASE_URL_ENV: &str = "MESSAGE_EXPORTER_BASE_URL";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete exporter configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExporterConfig {
    /// Messaging platform API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Pagination bounds
    #[serde(default)]
    pub fetch: FetchConfig,

    /// PDF layout constants
    #[serde(default)]
    pub layout: LayoutConfig,
}

impl ExporterConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                Error::config(format!(
                    "Failed to read config file '{}': {}",
                    path.display(),
                    e
                ))
            }
        })?;
        Self::from_yaml_str(&content)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load from an optional file, then apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply environment overrides using the given lookup
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(API_KEY_ENV).filter(|v| !v.is_empty()) {
            self.api.api_key = Some(key);
        }
        if let Some(url) = lookup(BASE_URL_ENV).filter(|v| !v.is_empty()) {
            self.api.base_url = url;
        }
    }

    /// Apply command-line overrides, which win over file and environment
    pub fn apply_overrides(&mut self, api_key: Option<&str>, base_url: Option<&str>) {
        if let Some(key) = api_key.filter(|v| !v.is_empty()) {
            self.api.api_key = Some(key.to_string());
        }
        if let Some(url) = base_url.filter(|v| !v.is_empty()) {
            self.api.base_url = url.to_string();
        }
    }

    /// Validate the configuration before any request is made
    pub fn validate(&self) -> Result<()> {
        if self.api.api_key.as_deref().map_or(true, str::is_empty) {
            return Err(Error::missing_field("api.api_key"));
        }
        url::Url::parse(&self.api.base_url)?;
        if self.fetch.page_size == 0 {
            return Err(Error::invalid_value(
                "fetch.page_size",
                "page size must be greater than zero",
            ));
        }
        if self.fetch.max_pages == 0 {
            return Err(Error::invalid_value(
                "fetch.max_pages",
                "max pages must be greater than zero",
            ));
        }
        Ok(())
    }
}

// ============================================================================
// API Config
// ============================================================================

/// Messaging platform connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL for all list endpoints
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key (usually supplied through the environment)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Header carrying the API key
    #[serde(default = "default_api_key_header")]
    pub api_key_header: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Client-side rate limit; absent disables limiting
    #[serde(default = "default_rate_limit")]
    pub rate_limit: Option<RateLimiterConfig>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            api_key_header: default_api_key_header(),
            timeout_seconds: default_timeout_seconds(),
            rate_limit: default_rate_limit(),
        }
    }
}

impl ApiConfig {
    /// Build the HTTP client configuration for these settings
    pub fn http_client_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .base_url(&self.base_url)
            .timeout(Duration::from_secs(self.timeout_seconds));

        if let Some(key) = &self.api_key {
            builder = builder.header(&self.api_key_header, key);
        }

        builder = match &self.rate_limit {
            Some(limit) => builder.rate_limit(limit.clone()),
            None => builder.no_rate_limit(),
        };

        builder.build()
    }
}

fn default_base_url() -> String {
    "https://api.copilot.com/v1".to_string()
}

fn default_api_key_header() -> String {
    "X-API-KEY".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_rate_limit() -> Option<RateLimiterConfig> {
    Some(RateLimiterConfig::default())
}

// ============================================================================
// Fetch Config
// ============================================================================

/// Pagination settings shared by every list call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Records requested per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Maximum pages per resource before giving up
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,

    /// Optional maximum records per resource
    #[serde(default)]
    pub max_records: Option<usize>,

    /// Optional deadline for one resource's full fetch, in seconds
    #[serde(default)]
    pub deadline_seconds: Option<u64>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            max_pages: default_max_pages(),
            max_records: None,
            deadline_seconds: None,
        }
    }
}

impl FetchConfig {
    /// Convert into the limits used by the paginated fetcher
    pub fn limits(&self) -> FetchLimits {
        FetchLimits {
            page_size: self.page_size,
            max_pages: self.max_pages,
            max_records: self.max_records,
            deadline: self.deadline_seconds.map(Duration::from_secs),
        }
    }
}

fn default_page_size() -> u32 {
    100
}

fn default_max_pages() -> u32 {
    10_000
}
