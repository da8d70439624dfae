//! Configuration module for Tldk-Harvest
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Every field has a built-in default, so running without a config
//! file targets the real site with the stock crawl delay.

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, DownloadConfig, SiteConfig};

// Re-export parser functions
pub use parser::{load_config, load_config_or_default};
