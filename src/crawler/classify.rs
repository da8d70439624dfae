//! Link classification by URL path segment
//!
//! Listing URLs are categorized by literal path substrings; no fetching,
//! no failure modes. The markers are configurable but default to the
//! site's `/ebook/` and `/baiviet/` sections.

use crate::config::SiteConfig;

/// Category of a discovered listing URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Ebook,
    Article,
    Unknown,
}

/// Classifies a URL by its path segments
///
/// Checks the ebook marker before the article marker. The two segments are
/// assumed mutually exclusive on the real site; a URL carrying both is a
/// data inconsistency, logged and classified by the first match.
pub fn classify(url: &str, site: &SiteConfig) -> LinkKind {
    let is_ebook = url.contains(&site.ebook_segment);
    let is_article = url.contains(&site.article_segment);

    if is_ebook && is_article {
        tracing::warn!(
            "URL matches both ebook and article segments, treating as ebook: {}",
            url
        );
        return LinkKind::Ebook;
    }

    if is_ebook {
        LinkKind::Ebook
    } else if is_article {
        LinkKind::Article
    } else {
        LinkKind::Unknown
    }
}
