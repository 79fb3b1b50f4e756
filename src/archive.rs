//! Extraction of the conversation log from the export ZIP.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use tracing::info;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::ArchiveError;

/// Entry name of the conversation log inside a ChatGPT export.
pub const DEFAULT_ENTRY: &str = "conversations.json";

/// Extraction destination used when the caller gives none.
pub fn default_destination() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_ENTRY)
}

/// Extract `entry_name` from the ZIP at `zip_path`, writing its bytes
/// to `destination` (overwriting any existing file). Returns the
/// destination path.
pub fn extract_entry(
    zip_path: &Path,
    entry_name: &str,
    destination: &Path,
) -> Result<PathBuf, ArchiveError> {
    if !zip_path.exists() {
        return Err(ArchiveError::NotFound(zip_path.to_path_buf()));
    }

    let file = File::open(zip_path)?;
    let mut archive = ZipArchive::new(file).map_err(|source| ArchiveError::Invalid {
        path: zip_path.to_path_buf(),
        source,
    })?;

    let mut entry = match archive.by_name(entry_name) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => {
            return Err(ArchiveError::MissingEntry {
                entry: entry_name.to_string(),
                path: zip_path.to_path_buf(),
            });
        }
        Err(source) => {
            return Err(ArchiveError::Invalid {
                path: zip_path.to_path_buf(),
                source,
            });
        }
    };

    let mut out = File::create(destination).map_err(|source| ArchiveError::Write {
        path: destination.to_path_buf(),
        source,
    })?;
    let bytes = io::copy(&mut entry, &mut out).map_err(|source| ArchiveError::Write {
        path: destination.to_path_buf(),
        source,
    })?;

    info!(
        "extracted \"{}\" ({} bytes) to {}",
        entry_name,
        bytes,
        destination.display()
    );
    Ok(destination.to_path_buf())
}
