pub mod error;
pub mod loaders;

use std::path::{Path, PathBuf};

use tracing::info;

pub use error::{ArchiveError, Result};
pub use loaders::load_emoji_table;

/// Read-only handle on an exported workspace directory.
///
/// Layout:
/// - `users.json`, `channels.json` at the root
/// - `<channel>/all.json`, or one `<channel>/<YYYY-MM-DD>.json` per day
/// - `<channel>/<subfolder>/<file>` for uploaded media
#[derive(Debug, Clone)]
pub struct Archive {
    root: PathBuf,
}

impl Archive {
    pub fn open(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(ArchiveError::NotADirectory(root.to_path_buf()));
        }

        info!("Archive opened at {}", root.display());
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}
