//! Durable key-value snapshot store.
//!
//! [`LocalStore`] holds the last-known-good copy of every synchronized
//! entity as one JSON file per key under a data directory. It is the only
//! persistence in offline mode and the write-through cache in online
//! mode. A missing or malformed file reads as "no snapshot" so the caller
//! can fall back to compiled-in defaults; it must never fail a request.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;

// ---------------------------------------------------------------------------
// Keys
// ---------------------------------------------------------------------------

/// Snapshot of the full projects list.
pub const KEY_PROJECTS: &str = "arc_projects";

/// Snapshot of the `general/about` singleton.
pub const KEY_ABOUT: &str = "arc_about";

/// Snapshot of the `general/contact` singleton.
pub const KEY_CONTACT: &str = "arc_contact";

/// Snapshot of the `general/theme` singleton.
pub const KEY_THEME: &str = "arc_theme";

/// Prefix for the per-project review keys used when no remote store is
/// configured.
pub const COMMENTS_KEY_PREFIX: &str = "comments_";

/// Key holding the offline reviews of one project.
pub fn comments_key(project_id: &str) -> String {
    format!("{COMMENTS_KEY_PREFIX}{project_id}")
}

// ---------------------------------------------------------------------------
// LocalStore
// ---------------------------------------------------------------------------

/// File-backed key-value store, one `<key>.json` per key.
#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    /// Open (creating if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Load and deserialize the value stored under `key`.
    ///
    /// Returns `None` when the key is absent or the payload does not
    /// parse; a malformed snapshot is logged and treated as absent rather
    /// than surfaced as an error.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.key_path(key);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to read local snapshot");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "Malformed local snapshot, treating as absent");
                None
            }
        }
    }

    /// Serialize `value` and overwrite the snapshot under `key`.
    ///
    /// Writes to a temporary file in the same directory and renames it
    /// into place so readers never observe a half-written snapshot.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(value)
            .map_err(|e| StoreError::Malformed(e.to_string()))?;

        let tmp = self.dir.join(format!(".{key}.tmp"));
        fs::write(&tmp, json)?;
        fs::rename(&tmp, self.key_path(key))?;
        Ok(())
    }

    /// Delete the snapshot under `key`. Removing an absent key is not an
    /// error.
    pub fn remove(&self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// All stored keys starting with `prefix`, in no particular order.
    /// Used to gather the `comments_*` keys for offline review moderation.
    pub fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to list local store directory");
                return Vec::new();
            }
        };

        entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name().into_string().ok()?;
                let key = name.strip_suffix(".json")?;
                (key.starts_with(prefix) && !key.starts_with('.')).then(|| key.to_string())
            })
            .collect()
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Directory the snapshots live in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
