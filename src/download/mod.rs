//! Download stage: resolve crawled links and write files to disk
//!
//! Links run strictly sequentially, one download at a time. Drive folder
//! links are recorded to the sidecar for separate handling by default;
//! with `include_folders` they are downloaded as ZIP archives and
//! extracted next to the other files. A failed link is logged and skipped,
//! never aborting the stage.

mod archive;
mod drive;
mod fetch;

pub use archive::extract_zip;
pub use drive::{classify_drive_link, extract_file_id, DriveEndpoints, DriveLinkKind};
pub use fetch::{download_to_dir, fallback_filename, filename_from_disposition};

use crate::config::DownloadConfig;
use crate::Result;
use reqwest::Client;
use std::path::{Path, PathBuf};

/// Outcome of a download stage run
#[derive(Debug, Default)]
pub struct DownloadReport {
    /// Paths of files written to the output directory
    pub downloaded: Vec<PathBuf>,
    /// Folder links recorded for separate handling
    pub folders: Vec<String>,
    /// Number of links that failed and were skipped
    pub failures: u32,
}

/// Download stage service holding the shared client and configuration
pub struct Downloader {
    client: Client,
    config: DownloadConfig,
    endpoints: DriveEndpoints,
}

impl Downloader {
    /// Creates a downloader targeting the real Drive endpoints
    pub fn new(client: Client, config: DownloadConfig) -> Self {
        Self::with_endpoints(client, config, DriveEndpoints::default())
    }

    /// Creates a downloader with overridden Drive endpoints
    pub fn with_endpoints(
        client: Client,
        config: DownloadConfig,
        endpoints: DriveEndpoints,
    ) -> Self {
        Self {
            client,
            config,
            endpoints,
        }
    }

    /// Downloads every link in order, collecting folder links as it goes
    ///
    /// Per-link failures are logged and counted; the stage always runs to
    /// the end of the link list.
    pub async fn run(&self, links: &[String], include_folders: bool) -> DownloadReport {
        let mut report = DownloadReport::default();

        for link in links {
            match self.download_link(link, include_folders).await {
                Ok(LinkOutcome::Written(path)) => report.downloaded.push(path),
                Ok(LinkOutcome::FolderRecorded) => report.folders.push(link.clone()),
                Err(e) => {
                    report.failures += 1;
                    tracing::error!("Failed to download {}: {}", link, e);
                }
            }
        }

        tracing::info!(
            "Download stage complete: {} files, {} folders recorded, {} failures",
            report.downloaded.len(),
            report.folders.len(),
            report.failures
        );

        report
    }

    async fn download_link(&self, link: &str, include_folders: bool) -> Result<LinkOutcome> {
        let file_id = extract_file_id(link)?;
        let output_dir = Path::new(&self.config.output_dir);

        match classify_drive_link(link) {
            DriveLinkKind::Folder => {
                if include_folders {
                    let url = self.endpoints.folder_download_url(&file_id);
                    let zip_path =
                        download_to_dir(&self.client, &url, &file_id, "zip", output_dir).await?;
                    extract_zip(&zip_path, &output_dir.join(&file_id))?;
                }
                Ok(LinkOutcome::FolderRecorded)
            }
            DriveLinkKind::Document => {
                let url = self.endpoints.docs_export_url(&file_id);
                let path = download_to_dir(&self.client, &url, &file_id, "pdf", output_dir).await?;
                Ok(LinkOutcome::Written(path))
            }
            DriveLinkKind::File => {
                let url = self.endpoints.file_download_url(&file_id);
                let path = download_to_dir(&self.client, &url, &file_id, "pdf", output_dir).await?;
                Ok(LinkOutcome::Written(path))
            }
        }
    }
}

enum LinkOutcome {
    Written(PathBuf),
    FolderRecorded,
}
