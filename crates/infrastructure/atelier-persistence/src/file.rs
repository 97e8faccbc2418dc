use std::fs;
use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use directories::ProjectDirs;

use crate::api::KeyValueStore;
use crate::keys::{encode_key, validate_key};
use crate::maintenance::quarantine_corrupt_file;
use crate::StoreError;

const QUALIFIER: &str = "com";
const ORG: &str = "atelier";
const APP: &str = "storefront";

/// File-per-key substrate. Each key maps to one percent-encoded file
/// under the root; writes go through a temp file and rename so readers
/// in other processes never see a half-written entry. There is no
/// cross-process change signal, so `watch` reports unsupported.
pub struct FileKeyValueStore {
    root: Utf8PathBuf,
}

impl FileKeyValueStore {
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Platform data directory for session entries.
    pub fn default_root() -> Result<Utf8PathBuf, StoreError> {
        let proj_dirs = ProjectDirs::from(QUALIFIER, ORG, APP).ok_or(StoreError::NoDataDir)?;
        let dir = proj_dirs.data_dir().join("session");
        Utf8PathBuf::from_path_buf(dir).map_err(StoreError::NonUtf8Path)
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    fn entry_path(&self, key: &str) -> Result<Utf8PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.root.join(encode_key(key)))
    }

    fn try_get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.entry_path(key)?;
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        match String::from_utf8(bytes) {
            Ok(value) => Ok(Some(value)),
            Err(_) => {
                // Undecodable bytes never resurface: the file is moved
                // aside and the key reads as absent from here on.
                quarantine_corrupt_file(&path)?;
                Ok(None)
            }
        }
    }

    fn try_set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.entry_path(key)?;
        fs::create_dir_all(&self.root)?;
        atomic_write(&path, value.as_bytes())
    }

    fn try_remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.entry_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.try_get(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("read of key {} failed, treating as absent: {}", key, e);
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(e) = self.try_set(key, value) {
            tracing::warn!("write of key {} failed, keeping in-memory state: {}", key, e);
        }
    }

    fn remove(&self, key: &str) {
        if let Err(e) = self.try_remove(key) {
            tracing::warn!("remove of key {} failed: {}", key, e);
        }
    }
}

fn atomic_write(path: &Utf8Path, contents: &[u8]) -> Result<(), StoreError> {
    let tmp_path = Utf8PathBuf::from(format!("{path}.tmp"));

    let mut file = fs::File::create(&tmp_path)?;
    file.write_all(contents)?;
    file.sync_all()?;
    drop(file);

    match fs::rename(&tmp_path, path) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            fs::remove_file(path).ok();
            fs::rename(&tmp_path, path)?;
        }
        Err(e) => return Err(e.into()),
    }

    if let Some(parent) = path.parent() {
        if let Ok(dir) = fs::File::open(parent.as_std_path()) {
            let _ = dir.sync_all();
        }
    }

    Ok(())
}
