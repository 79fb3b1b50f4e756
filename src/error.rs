use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from opening the export archive and extracting the
/// conversation log. All of these abort the run.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// The archive path does not exist on disk.
    #[error("archive not found: {0}")]
    NotFound(PathBuf),

    /// The file exists but is not a readable ZIP archive.
    #[error("not a valid ZIP archive {path}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// The expected conversation-log entry is absent from the archive.
    #[error("entry \"{entry}\" not found in {path}")]
    MissingEntry { entry: String, path: PathBuf },

    /// The extracted bytes could not be written to the destination.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Pass-through for raw I/O errors that do not carry a path.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Errors from loading the extracted conversation log. Individual
/// malformed messages are skipped with a warning instead and never
/// surface here; these variants cover failures of the whole document.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The extracted file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The top-level document is not a valid conversation list.
    #[error("invalid export JSON: {0}")]
    Json(#[from] serde_json::Error),
}
