use serde::Deserialize;

/// Main configuration structure for Tldk-Harvest
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub crawler: CrawlerConfig,
    pub download: DownloadConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site: SiteConfig::default(),
            crawler: CrawlerConfig::default(),
            download: DownloadConfig::default(),
        }
    }
}

/// Target site configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Master index page enumerating all listings
    #[serde(rename = "master-index-url")]
    pub master_index_url: String,

    /// Path segment marking an ebook listing URL
    #[serde(rename = "ebook-segment")]
    pub ebook_segment: String,

    /// Path segment marking an article listing URL
    #[serde(rename = "article-segment")]
    pub article_segment: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            master_index_url: "https://tailieudieuky.com/baiviet/tai-lieu-va-ebook/".to_string(),
            ebook_segment: "/ebook/".to_string(),
            article_segment: "/baiviet/".to_string(),
        }
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Pause between consecutive page fetches within one listing (milliseconds)
    #[serde(rename = "page-delay-ms")]
    pub page_delay_ms: u64,

    /// Whole-request timeout (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// User agent sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            page_delay_ms: 500,
            request_timeout_secs: 30,
            user_agent: format!("tldk-harvest/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Download stage configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    /// Directory downloaded files are written to
    #[serde(rename = "output-dir")]
    pub output_dir: String,

    /// Path the accumulated crawl links are written to
    #[serde(rename = "links-path")]
    pub links_path: String,

    /// Sidecar recording Drive folder links for separate handling
    #[serde(rename = "folders-path")]
    pub folders_path: String,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            output_dir: "./downloads".to_string(),
            links_path: "./ebooks.json".to_string(),
            folders_path: "./folders.json".to_string(),
        }
    }
}
