//! End-of-run JSON artifacts
//!
//! The crawl result and the Drive folder sidecar are each written once at
//! the end of a run; nothing is persisted while the crawl is in flight.

use crate::crawler::CrawlResult;
use crate::Result;
use std::path::Path;

/// Writes the accumulated crawl links as pretty JSON
pub fn write_links(path: &Path, result: &CrawlResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    std::fs::write(path, json)?;
    tracing::info!(
        "Wrote {} ebook and {} article links to {}",
        result.ebooks.len(),
        result.articles.len(),
        path.display()
    );
    Ok(())
}

/// Loads a previously written crawl result
pub fn read_links(path: &Path) -> Result<CrawlResult> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Writes the Drive folder sidecar as a pretty JSON array
pub fn write_folders(path: &Path, folders: &[String]) -> Result<()> {
    let json = serde_json::to_string_pretty(folders)?;
    std::fs::write(path, json)?;
    tracing::info!("Recorded {} folder links to {}", folders.len(), path.display());
    Ok(())
}
