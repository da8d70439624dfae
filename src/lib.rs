//! Tldk-Harvest: a scraper/archiver for tailieudieuky.com
//!
//! This crate crawls the site's paginated e-book and article listings,
//! accumulates the linked file URLs, and downloads the linked Google
//! Drive/Docs files (recording Drive folders to a sidecar for separate
//! handling).

pub mod config;
pub mod crawler;
pub mod download;
pub mod output;

use thiserror::Error;

/// Main error type for Tldk-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error for {url}: {source}")]
    Fetch { url: String, source: reqwest::Error },

    #[error("Parse error for {url}: {message}")]
    Parse { url: String, message: String },

    #[error("URL is neither an ebook nor an article listing: {url}")]
    UnsupportedLink { url: String },

    #[error("Not a Google Drive/Docs URL: {url}")]
    InvalidDriveUrl { url: String },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

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
}

/// Result type alias for Tldk-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlResult, Crawler, LinkKind, ListingReference};
pub use download::{extract_file_id, DriveLinkKind};
