//! HTTP fetcher for listing pages
//!
//! All page requests go through here: building the shared client and
//! fetching a URL's HTML body. Documents are parsed by the callers with
//! `scraper` after the fetch completes, so no parsed DOM is ever held
//! across an await point.

use crate::config::CrawlerConfig;
use crate::{HarvestError, Result};
use reqwest::Client;
use std::time::Duration;

/// Builds the shared HTTP client
///
/// # Arguments
///
/// * `config` - Crawler configuration supplying the user agent and timeout
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &CrawlerConfig) -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and returns its body as text
///
/// Non-2xx statuses and network failures both surface as
/// [`HarvestError::Fetch`] carrying the requested URL.
pub async fn fetch_text(client: &Client, url: &str) -> Result<String> {
    let response = client
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|source| HarvestError::Fetch {
            url: url.to_string(),
            source,
        })?;

    response.text().await.map_err(|source| HarvestError::Fetch {
        url: url.to_string(),
        source,
    })
}
