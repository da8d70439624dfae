//! Pagination resolution for listing pages
//!
//! Ebook listings paginate through a `page=<N>` query parameter and render
//! their controls as `.page-number ul li a`; the last real page number sits
//! in the second-to-last anchor (the final one is the "next" arrow).
//! Article listings render WordPress-style `a.page-numbers` controls with a
//! `next` variant; the anchor just before the next-control carries the last
//! page number as its text.

use crate::config::SiteConfig;
use crate::crawler::classify::{classify, LinkKind};
use crate::crawler::fetcher::fetch_text;
use crate::{HarvestError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};

static PAGE_PARAM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"page=(\d+)").unwrap());

static EBOOK_PAGE_ANCHORS: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".page-number ul li a").unwrap());

static ARTICLE_NEXT_CONTROL: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a.next.page-numbers").unwrap());

/// Formats a page number the way the site's ebook pagination expects
///
/// Pages 1-9 are zero-padded to two digits ("05"); 10 and up are unpadded.
pub fn format_page_number(page: u32) -> String {
    if page < 10 {
        format!("0{}", page)
    } else {
        page.to_string()
    }
}

/// Builds the URL of one page of an ebook listing
///
/// Substitutes the listing URL's `page=<N>` query parameter with the
/// zero-padded target page. A listing URL without the parameter is
/// returned unchanged.
pub fn ebook_page_url(listing_url: &str, page: u32) -> String {
    let replacement = format!("page={}", format_page_number(page));
    PAGE_PARAM_RE.replace(listing_url, replacement.as_str()).into_owned()
}

/// Resolves how many pages a listing spans
///
/// Fetches the listing once and reads its pagination controls. Never
/// returns less than 1: a listing without controls is a single page.
///
/// # Errors
///
/// * [`HarvestError::Fetch`] - the listing page could not be fetched
/// * [`HarvestError::Parse`] - a control was present but malformed
/// * [`HarvestError::UnsupportedLink`] - the URL classifies as neither kind
pub async fn resolve_page_count(
    client: &Client,
    site: &SiteConfig,
    listing_url: &str,
) -> Result<u32> {
    match classify(listing_url, site) {
        LinkKind::Ebook => {
            let body = fetch_text(client, listing_url).await?;
            ebook_last_page(&body, listing_url)
        }
        LinkKind::Article => {
            let body = fetch_text(client, listing_url).await?;
            article_last_page(&body, listing_url)
        }
        LinkKind::Unknown => Err(HarvestError::UnsupportedLink {
            url: listing_url.to_string(),
        }),
    }
}

/// Reads the last page number from an ebook listing's pagination control
pub fn ebook_last_page(body: &str, listing_url: &str) -> Result<u32> {
    let document = Html::parse_document(body);

    let anchors: Vec<ElementRef> = document.select(&EBOOK_PAGE_ANCHORS).collect();
    if anchors.len() < 2 {
        return Ok(1);
    }

    // The true last entry is the "next" arrow, not a page number
    let last_page_anchor = anchors[anchors.len() - 2];
    let href = match last_page_anchor.value().attr("href") {
        Some(href) => href,
        None => return Ok(1),
    };

    let caps = PAGE_PARAM_RE
        .captures(href)
        .ok_or_else(|| HarvestError::Parse {
            url: listing_url.to_string(),
            message: format!("no page parameter in pagination link '{}'", href),
        })?;

    caps[1].parse::<u32>().map_err(|e| HarvestError::Parse {
        url: listing_url.to_string(),
        message: format!("invalid page number in '{}': {}", href, e),
    })
}

/// Reads the last page number from an article listing's pagination control
pub fn article_last_page(body: &str, listing_url: &str) -> Result<u32> {
    let document = Html::parse_document(body);

    let next_control = match document.select(&ARTICLE_NEXT_CONTROL).next() {
        Some(el) => el,
        None => return Ok(1),
    };

    // The control immediately preceding "next" holds the last page number;
    // anything else sitting there (a dots span, say) is malformed markup
    let last_page_control = next_control
        .prev_siblings()
        .filter_map(ElementRef::wrap)
        .next()
        .filter(is_page_numbers_anchor)
        .ok_or_else(|| HarvestError::Parse {
            url: listing_url.to_string(),
            message: "no page-numbers anchor immediately before the next-control".to_string(),
        })?;

    if last_page_control.value().attr("href").is_none() {
        return Err(HarvestError::Parse {
            url: listing_url.to_string(),
            message: "last page control has no link target".to_string(),
        });
    }

    let text: String = last_page_control.text().collect();
    text.trim().parse::<u32>().map_err(|e| HarvestError::Parse {
        url: listing_url.to_string(),
        message: format!("last page control text '{}' is not a page number: {}", text.trim(), e),
    })
}

fn is_page_numbers_anchor(element: &ElementRef) -> bool {
    element.value().name() == "a" && element.value().classes().any(|c| c == "page-numbers")
}
