use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ArchiveError>;

/// Failures while reading the archive. Any of these aborts the whole
/// request; nothing is rendered from a partially loaded archive.
#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("Archive root is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid channel name: {0:?}")]
    InvalidChannel(String),

    #[error("No message history for channel {0}")]
    MissingHistory(String),
}
