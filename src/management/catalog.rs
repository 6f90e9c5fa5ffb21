use std::{
    io::Write,
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;

use crate::{TransferError, types::TrackRecord};

/// The exported library on disk.
///
/// The file is a pretty-printed JSON array of [`TrackRecord`]s. It has one
/// writer (export) and one reader (import) per run and is always replaced as
/// a whole.
pub struct CatalogManager {
    path: PathBuf,
    tracks: Vec<TrackRecord>,
}

impl CatalogManager {
    pub fn new(path: impl Into<PathBuf>, tracks: Vec<TrackRecord>) -> Self {
        Self {
            path: path.into(),
            tracks,
        }
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self, TransferError> {
        let path = path.as_ref();
        let content = async_fs::read_to_string(path).await?;
        let tracks: Vec<TrackRecord> = serde_json::from_str(&content)
            .map_err(|e| TransferError::InvalidCatalog(format!("{}: {}", path.display(), e)))?;

        Ok(Self {
            path: path.to_path_buf(),
            tracks,
        })
    }

    /// Writes to a temporary file in the target directory and renames it over
    /// the target. The previous catalog stays intact until the new one is
    /// complete.
    pub async fn persist(&self) -> Result<(), TransferError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                async_fs::create_dir_all(parent).await?;
                parent.to_path_buf()
            }
            _ => PathBuf::from("."),
        };

        // serde_json keeps non-ASCII characters as they are
        let json = serde_json::to_string_pretty(&self.tracks)?;

        let mut temp = NamedTempFile::new_in(&dir)?;
        temp.write_all(json.as_bytes())?;
        temp.as_file().sync_all()?;
        temp.persist(&self.path).map_err(|e| TransferError::Io(e.error))?;
        Ok(())
    }

    pub fn tracks(&self) -> &[TrackRecord] {
        &self.tracks
    }

    pub fn into_tracks(self) -> Vec<TrackRecord> {
        self.tracks
    }

    pub fn count(&self) -> usize {
        self.tracks.len()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
