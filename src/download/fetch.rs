//! HTTP download of resolved files to disk
//!
//! Filenames come from the Content-Disposition header when present
//! (quotes stripped, percent-encoding decoded); otherwise a timestamped
//! name is generated from the Drive file id.

use crate::{HarvestError, Result};
use chrono::Utc;
use reqwest::Client;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// Downloads a URL into `dir` and returns the written path
///
/// `file_id` and `fallback_ext` name the file when the response carries no
/// usable Content-Disposition header.
pub async fn download_to_dir(
    client: &Client,
    url: &str,
    file_id: &str,
    fallback_ext: &str,
    dir: &Path,
) -> Result<PathBuf> {
    let mut response = client
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|source| HarvestError::Fetch {
            url: url.to_string(),
            source,
        })?;

    let filename = response
        .headers()
        .get(reqwest::header::CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .and_then(filename_from_disposition)
        .unwrap_or_else(|| fallback_filename(file_id, fallback_ext));

    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(&filename);

    // Stream to disk chunk by chunk; folder archives can be large
    let mut file = tokio::fs::File::create(&path).await?;
    let mut bytes_written: u64 = 0;
    while let Some(chunk) = response.chunk().await.map_err(|source| HarvestError::Fetch {
        url: url.to_string(),
        source,
    })? {
        file.write_all(&chunk).await?;
        bytes_written += chunk.len() as u64;
    }
    file.flush().await?;

    tracing::info!("Downloaded {} ({} bytes)", filename, bytes_written);

    Ok(path)
}

/// Extracts and decodes the filename from a Content-Disposition value
///
/// Handles quoted and unquoted `filename=` parameters and percent-encoded
/// names. Names are flattened to their final path component so a hostile
/// header cannot escape the download directory.
pub fn filename_from_disposition(value: &str) -> Option<String> {
    let start = value.find("filename=")? + "filename=".len();
    let rest = &value[start..];
    let raw = rest.split(';').next().unwrap_or(rest).trim();
    let raw = raw.trim_matches('"');

    if raw.is_empty() {
        return None;
    }

    let decoded = urlencoding::decode(raw)
        .map(|c| c.into_owned())
        .unwrap_or_else(|_| raw.to_string());

    // Keep only the final path component
    let name = decoded
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(&decoded)
        .to_string();

    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Generates a timestamped filename from a Drive file id
pub fn fallback_filename(file_id: &str, ext: &str) -> String {
    let timestamp = Utc::now().format("%Y%m%dT%H%M%S");
    format!("file_{}_{}.{}", file_id, timestamp, ext)
}
