//! ZIP extraction for downloaded folder archives

use crate::Result;
use std::fs::File;
use std::path::Path;
use zip::ZipArchive;

/// Extracts a ZIP archive into `dest`
///
/// Entries whose names would escape the destination directory are skipped
/// with a warning.
pub fn extract_zip(zip_path: &Path, dest: &Path) -> Result<()> {
    let file = File::open(zip_path)?;
    let mut archive = ZipArchive::new(file)?;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;

        let relative = match entry.enclosed_name() {
            Some(path) => path.to_owned(),
            None => {
                tracing::warn!("Skipping unsafe archive entry: {}", entry.name());
                continue;
            }
        };
        let out_path = dest.join(relative);

        if entry.is_dir() {
            std::fs::create_dir_all(&out_path)?;
        } else {
            if let Some(parent) = out_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let mut out_file = File::create(&out_path)?;
            std::io::copy(&mut entry, &mut out_file)?;
        }
    }

    tracing::info!("Extracted {} to {}", zip_path.display(), dest.display());

    Ok(())
}
