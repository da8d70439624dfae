//! Tldk-Harvest main entry point
//!
//! Command-line interface for the tailieudieuky.com scraper/archiver.

use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use tldk_harvest::config::{load_config_or_default, Config};
use tldk_harvest::crawler::{crawl_site, CrawlResult};
use tldk_harvest::download::Downloader;
use tldk_harvest::output::{read_links, write_folders, write_links};
use tracing_subscriber::EnvFilter;

/// Tldk-Harvest: scrape and archive tailieudieuky.com listings
///
/// Crawls the site's master index for ebook and article listings, walks
/// every page of every listing, writes the accumulated links to a JSON
/// file, and downloads the linked Google Drive/Docs files.
#[derive(Parser, Debug)]
#[command(name = "tldk-harvest")]
#[command(version)]
#[command(about = "Scrape and archive tailieudieuky.com listings", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Crawl and write the links file, skip the download stage
    #[arg(long, conflicts_with = "download_only")]
    crawl_only: bool,

    /// Skip the crawl and download from an existing links file
    #[arg(long, conflicts_with = "crawl_only")]
    download_only: bool,

    /// Also download Drive folders as ZIP archives and extract them
    #[arg(long)]
    include_folders: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = load_config_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    let result = if cli.download_only {
        let links_path = Path::new(&config.download.links_path);
        tracing::info!("Loading links from {}", links_path.display());
        read_links(links_path)
            .with_context(|| format!("Failed to load links from {}", links_path.display()))?
    } else {
        handle_crawl(&config).await?
    };

    if !cli.crawl_only {
        handle_downloads(&config, &result, cli.include_folders).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("tldk_harvest=info,warn"),
            1 => EnvFilter::new("tldk_harvest=debug,info"),
            2 => EnvFilter::new("tldk_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles --dry-run: shows the effective configuration without crawling
fn handle_dry_run(config: &Config) {
    println!("=== Tldk-Harvest Dry Run ===\n");

    println!("Site:");
    println!("  Master index: {}", config.site.master_index_url);
    println!("  Ebook segment: {}", config.site.ebook_segment);
    println!("  Article segment: {}", config.site.article_segment);

    println!("\nCrawler:");
    println!("  Page delay: {}ms", config.crawler.page_delay_ms);
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);
    println!("  User agent: {}", config.crawler.user_agent);

    println!("\nDownload:");
    println!("  Output dir: {}", config.download.output_dir);
    println!("  Links file: {}", config.download.links_path);
    println!("  Folder sidecar: {}", config.download.folders_path);

    println!("\n✓ Configuration is valid");
}

/// Runs the crawl stage and writes the links file
async fn handle_crawl(config: &Config) -> anyhow::Result<CrawlResult> {
    tracing::info!("Starting crawl of {}", config.site.master_index_url);

    let result = crawl_site(config.clone()).await.context("Crawl failed")?;

    write_links(Path::new(&config.download.links_path), &result)
        .context("Failed to write links file")?;

    Ok(result)
}

/// Runs the download stage over the accumulated ebook links
async fn handle_downloads(
    config: &Config,
    result: &CrawlResult,
    include_folders: bool,
) -> anyhow::Result<()> {
    tracing::info!("Downloading {} ebook links", result.ebooks.len());

    let client = tldk_harvest::crawler::build_http_client(&config.crawler)
        .context("Failed to build HTTP client")?;

    let downloader = Downloader::new(client, config.download.clone());
    let report = downloader.run(&result.ebooks, include_folders).await;

    write_folders(Path::new(&config.download.folders_path), &report.folders)
        .context("Failed to write folder sidecar")?;

    Ok(())
}
