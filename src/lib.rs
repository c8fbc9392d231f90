//! fa-grab: crawl-control hooks for an archival crawl of a gallery site
//!
//! The recursive fetch engine calls into this crate for every URL it discovers,
//! every response it receives and every document it downloads. The crate decides
//! what to fetch, how to react to failures, which follow-up URLs to queue and
//! how long to wait, while logging every username it sees along the way.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for fa-grab operations
///
/// Every variant raised from a hook is fatal to the crawl run; the engine is
/// expected to translate it into a nonzero exit.
#[derive(Debug, Error)]
pub enum GrabError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Too many tries in this session (limit {limit})")]
    AttemptCeilingExceeded { limit: u32 },

    #[error("Not logged in while fetching {url}")]
    NotLoggedIn { url: String },

    #[error("Cannot view adult material at {url}")]
    AdultContentBlocked { url: String },

    #[error("Full view not found at {url}")]
    FullViewMissing { url: String },

    #[error("Giving up on {url} after {failures} consecutive failures")]
    GaveUp { url: String, failures: u32 },

    #[error("Tracker upload to {url} failed after {attempts} attempts")]
    Tracker { url: String, attempts: u32 },

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid crawl item '{0}'")]
    InvalidItem(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid domain pattern: {0}")]
    InvalidPattern(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Missing host in URL: {0}")]
    MissingHost(String),

    #[error("Unknown listing type: {0}")]
    UnknownListingType(String),
}

/// Result type alias for fa-grab operations
pub type Result<T> = std::result::Result<T, GrabError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Action, GrabHooks};
pub use state::CrawlSessionState;
pub use crate::url::{classify_host, CandidateUrl, HostClass, ListingType};
