//! File-backed storage: one `<key>.json` file per slot.
//!
//! ## Default Location
//! - **macOS**: `~/Library/Application Support/com.storefront.cart/`
//! - **Windows**: `%APPDATA%\storefront\cart\data\`
//! - **Linux**: `~/.local/share/cart/`
//!
//! Writes go to `<key>.json.tmp` first and are renamed into place, so a crash
//! mid-write leaves the previous cart intact.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use storefront_core::validation::validate_storage_key;
use tracing::debug;

use super::KeyValueStorage;
use crate::error::{StorageError, StorageResult};

/// Slot store rooted at a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Uses `dir` for slot files. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage { dir: dir.into() }
    }

    /// Uses the platform data directory, if one can be determined.
    pub fn default_location() -> Option<Self> {
        default_data_dir().map(FileStorage::new)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        validate_storage_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

/// Platform data directory for the storefront.
pub(crate) fn default_data_dir() -> Option<PathBuf> {
    ProjectDirs::from("com", "storefront", "cart").map(|dirs| dirs.data_dir().to_path_buf())
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(key, e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).map_err(|e| StorageError::io(key, e))?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|e| StorageError::io(key, e))?;
        fs::rename(&tmp, &path).map_err(|e| StorageError::io(key, e))?;

        debug!(?path, bytes = value.len(), "Slot written");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::io(key, e)),
        }
    }
}
