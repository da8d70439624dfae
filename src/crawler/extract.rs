//! Page-scoped link extraction
//!
//! All knowledge of the site's markup shapes lives here and in
//! `pagination`: a markup change on the site means editing these selector
//! constants, not the orchestrator.

use crate::config::SiteConfig;
use crate::crawler::classify::{classify, LinkKind};
use crate::crawler::fetcher::fetch_text;
use crate::crawler::pagination::ebook_page_url;
use crate::{HarvestError, Result};
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};

/// Download anchor inside an ebook listing entry
static DOWNLOAD_BOX_ANCHORS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p.download-box > a").unwrap());

/// Featured-post anchor inside an article listing entry
static FEATURED_POST_ANCHORS: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".pagelayer-wposts-featured > a").unwrap());

/// Call-to-action button linking to a listing from the master index
/// (the page-builder's button widget class combination)
static MASTER_BUTTON_ANCHORS: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(
        ".pagelayer-btn-holder.pagelayer-ele-link.pagelayer-btn-custom.pagelayer-btn-mini.pagelayer-btn-icon-left",
    )
    .unwrap()
});

/// Extracts the outbound links from one page of a listing
///
/// For ebook listings the `page=<N>` parameter of the listing URL is
/// rewritten to the zero-padded target page before fetching. A page whose
/// expected container is absent yields an empty vec; only the fetch itself
/// can fail.
pub async fn extract_links(
    client: &Client,
    site: &SiteConfig,
    listing_url: &str,
    page: u32,
) -> Result<Vec<String>> {
    match classify(listing_url, site) {
        LinkKind::Ebook => {
            let page_url = ebook_page_url(listing_url, page);
            let body = fetch_text(client, &page_url).await?;
            Ok(collect_hrefs(&body, &DOWNLOAD_BOX_ANCHORS))
        }
        LinkKind::Article => {
            // TODO: the site serves the same article listing regardless of the
            // requested page; find the real page parameter for article
            // pagination so `page` actually advances.
            let _ = page;
            let body = fetch_text(client, listing_url).await?;
            Ok(collect_hrefs(&body, &FEATURED_POST_ANCHORS))
        }
        LinkKind::Unknown => Err(HarvestError::UnsupportedLink {
            url: listing_url.to_string(),
        }),
    }
}

/// Extracts the listing URLs advertised on the master index page
pub fn master_index_links(body: &str) -> Vec<String> {
    collect_hrefs(body, &MASTER_BUTTON_ANCHORS)
}

/// Collects `href` attributes of every match in document order
///
/// Anchors without an `href` are skipped silently.
fn collect_hrefs(body: &str, selector: &Selector) -> Vec<String> {
    let document = Html::parse_document(body);

    document
        .select(selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_download_box_hrefs_in_document_order() {
        let body = r#"
            <p class="download-box"><a href="https://drive.google.com/file/d/AAA/view">first</a></p>
            <p class="download-box"><a href="https://drive.google.com/file/d/BBB/view">second</a></p>
        "#;
        let links = collect_hrefs(body, &DOWNLOAD_BOX_ANCHORS);
        assert_eq!(
            links,
            vec![
                "https://drive.google.com/file/d/AAA/view",
                "https://drive.google.com/file/d/BBB/view"
            ]
        );
    }

    #[test]
    fn test_anchors_without_href_skipped() {
        let body = r#"
            <p class="download-box"><a>broken</a></p>
            <p class="download-box"><a href="/ok">ok</a></p>
        "#;
        assert_eq!(collect_hrefs(body, &DOWNLOAD_BOX_ANCHORS), vec!["/ok"]);
    }

    #[test]
    fn test_missing_container_yields_empty() {
        let body = "<html><body><p>nothing here</p></body></html>";
        assert!(collect_hrefs(body, &DOWNLOAD_BOX_ANCHORS).is_empty());
        assert!(collect_hrefs(body, &FEATURED_POST_ANCHORS).is_empty());
    }

    #[test]
    fn test_featured_post_hrefs() {
        let body = r#"
            <div class="pagelayer-wposts-featured"><a href="/baiviet/mot/">post</a></div>
        "#;
        assert_eq!(collect_hrefs(body, &FEATURED_POST_ANCHORS), vec!["/baiviet/mot/"]);
    }

    #[test]
    fn test_master_index_links_only_match_button_widgets() {
        let body = r#"
            <a class="pagelayer-btn-holder pagelayer-ele-link pagelayer-btn-custom pagelayer-btn-mini pagelayer-btn-icon-left"
               href="https://x.test/ebook/khoa-hoc/?page=01">Ebooks</a>
            <a href="https://x.test/elsewhere">plain link</a>
        "#;
        assert_eq!(
            master_index_links(body),
            vec!["https://x.test/ebook/khoa-hoc/?page=01"]
        );
    }
}
