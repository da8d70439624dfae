use crate::config::types::{Config, CrawlerConfig, DownloadConfig, SiteConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_crawler_config(&config.crawler)?;
    validate_download_config(&config.download)?;
    Ok(())
}

/// Validates the target site configuration
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    Url::parse(&config.master_index_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid master-index-url: {}", e)))?;

    if config.ebook_segment.is_empty() {
        return Err(ConfigError::Validation(
            "ebook-segment cannot be empty".to_string(),
        ));
    }

    if config.article_segment.is_empty() {
        return Err(ConfigError::Validation(
            "article-segment cannot be empty".to_string(),
        ));
    }

    if config.ebook_segment == config.article_segment {
        return Err(ConfigError::Validation(format!(
            "ebook-segment and article-segment must differ, both are '{}'",
            config.ebook_segment
        )));
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    // page_delay_ms = 0 is allowed so tests can run without throttling

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request-timeout-secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates download stage configuration
fn validate_download_config(config: &DownloadConfig) -> Result<(), ConfigError> {
    if config.output_dir.is_empty() {
        return Err(ConfigError::Validation(
            "output-dir cannot be empty".to_string(),
        ));
    }

    if config.links_path.is_empty() {
        return Err(ConfigError::Validation(
            "links-path cannot be empty".to_string(),
        ));
    }

    if config.folders_path.is_empty() {
        return Err(ConfigError::Validation(
            "folders-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
