//! Crawler module for listing discovery and link accumulation
//!
//! This module contains the crawl pipeline:
//! - HTTP fetching with a shared client
//! - URL classification into ebook/article listings
//! - Pagination resolution from the site's two control shapes
//! - Per-page link extraction behind fixed CSS selectors
//! - Overall crawl coordination

mod classify;
mod coordinator;
mod extract;
mod fetcher;
mod pagination;

pub use classify::{classify, LinkKind};
pub use coordinator::{CrawlResult, Crawler, ListingReference};
pub use extract::{extract_links, master_index_links};
pub use fetcher::{build_http_client, fetch_text};
pub use pagination::{ebook_page_url, format_page_number, resolve_page_count};

use crate::config::Config;
use crate::Result;

/// Runs a complete crawl: discovery, pagination resolution, extraction
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlResult)` - Accumulated links, possibly partial after page failures
/// * `Err(HarvestError)` - The master index itself could not be crawled
pub async fn crawl_site(config: Config) -> Result<CrawlResult> {
    let crawler = Crawler::new(config)?;
    crawler.run().await
}
