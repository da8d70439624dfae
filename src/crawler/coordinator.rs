//! Crawl orchestration
//!
//! The [`Crawler`] service drives the whole crawl: discover the listings
//! advertised on the master index, resolve each one's page count, then walk
//! every page of every listing and accumulate the outbound links. Page
//! counts resolve concurrently; page extraction within a listing is
//! strictly sequential and throttled so the source site is never hammered.

use crate::config::Config;
use crate::crawler::classify::{classify, LinkKind};
use crate::crawler::extract::{extract_links, master_index_links};
use crate::crawler::fetcher::{build_http_client, fetch_text};
use crate::crawler::pagination::resolve_page_count;
use crate::Result;
use futures::future::join_all;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

/// One discovered listing and how many pages it spans
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingReference {
    pub url: String,
    pub last_page: u32,
}

/// Links accumulated across all listings and pages, in discovery order
///
/// Duplicates are kept: the same link may legitimately appear on more
/// than one page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrawlResult {
    pub ebooks: Vec<String>,
    pub articles: Vec<String>,
}

/// Stateless crawl service holding the shared HTTP client and config
pub struct Crawler {
    client: Client,
    config: Config,
}

impl Crawler {
    /// Creates a crawler with a freshly built HTTP client
    pub fn new(config: Config) -> Result<Self> {
        let client = build_http_client(&config.crawler)?;
        Ok(Self { client, config })
    }

    /// Creates a crawler around an existing client
    pub fn with_client(client: Client, config: Config) -> Self {
        Self { client, config }
    }

    /// Discovers the listings advertised on the master index page
    ///
    /// Listing URLs are deduplicated first-wins and returned in discovery
    /// order. Page counts for all listings resolve concurrently; a listing
    /// whose resolution fails is kept with `last_page = 1` rather than
    /// dropped.
    pub async fn discover_listings(&self) -> Result<Vec<ListingReference>> {
        let index_url = &self.config.site.master_index_url;
        tracing::info!("Fetching master index: {}", index_url);

        let body = fetch_text(&self.client, index_url).await?;

        let mut seen = HashSet::new();
        let urls: Vec<String> = master_index_links(&body)
            .into_iter()
            .filter(|url| seen.insert(url.clone()))
            .collect();

        tracing::info!("Discovered {} unique listings", urls.len());

        let resolutions = urls.iter().map(|url| async move {
            match resolve_page_count(&self.client, &self.config.site, url).await {
                Ok(last_page) => last_page,
                Err(e) => {
                    tracing::warn!("Page count resolution failed for {}, assuming 1 page: {}", url, e);
                    1
                }
            }
        });
        let last_pages = join_all(resolutions).await;

        Ok(urls
            .into_iter()
            .zip(last_pages)
            .map(|(url, last_page)| ListingReference { url, last_page })
            .collect())
    }

    /// Walks every page of every listing and accumulates the links
    ///
    /// Listings are visited in the order given; pages within a listing run
    /// sequentially with the configured delay between fetches. A failed
    /// page is logged and skipped; the crawl always completes with whatever
    /// was accumulated.
    pub async fn crawl(&self, listings: &[ListingReference]) -> CrawlResult {
        let mut result = CrawlResult::default();
        let mut failed_pages = 0u32;
        let delay = Duration::from_millis(self.config.crawler.page_delay_ms);

        for listing in listings {
            let kind = classify(&listing.url, &self.config.site);
            if kind == LinkKind::Unknown {
                tracing::warn!("Skipping listing of unknown kind: {}", listing.url);
                continue;
            }

            tracing::info!("Crawling {} ({} pages)", listing.url, listing.last_page);

            for page in 1..=listing.last_page {
                match extract_links(&self.client, &self.config.site, &listing.url, page).await {
                    Ok(links) => {
                        tracing::debug!("{} page {}: {} links", listing.url, page, links.len());
                        match kind {
                            LinkKind::Ebook => result.ebooks.extend(links),
                            LinkKind::Article => result.articles.extend(links),
                            LinkKind::Unknown => unreachable!("unknown listings are skipped"),
                        }
                    }
                    Err(e) => {
                        failed_pages += 1;
                        tracing::error!(
                            "Failed to extract links from {} page {}: {}",
                            listing.url,
                            page,
                            e
                        );
                    }
                }

                if page < listing.last_page {
                    tokio::time::sleep(delay).await;
                }
            }
        }

        tracing::info!(
            "Crawl complete: {} ebook links, {} article links, {} failed pages",
            result.ebooks.len(),
            result.articles.len(),
            failed_pages
        );

        result
    }

    /// Discovers listings and crawls them in one step
    pub async fn run(&self) -> Result<CrawlResult> {
        let listings = self.discover_listings().await?;
        Ok(self.crawl(&listings).await)
    }
}
