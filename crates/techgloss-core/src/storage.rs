//! Local key-value storage for TechGloss.
//!
//! Everything the console persists is a string under a fixed key:
//!
//! | Key                      | Value                                  |
//! |--------------------------|----------------------------------------|
//! | `techgloss_v2_data`      | Full term list, JSON                   |
//! | `techgloss_theme`        | `"dark"` or `"light"`                  |
//! | `techgloss_lang`         | `"mn"`, `"en"` or `"jp"`               |
//! | `techgloss_last_update`  | RFC 3339 timestamp of the last change  |
//!
//! The file-backed store keeps one file per key and writes atomically
//! (temp file, then rename) with the previous value kept as a backup.
//! A read that finds the live file gone falls back to that backup.

use crate::error::{GlossError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

/// Key holding the serialized term list
pub const DATA_KEY: &str = "techgloss_v2_data";
/// Key holding the theme preference
pub const THEME_KEY: &str = "techgloss_theme";
/// Key holding the interface language
pub const LANG_KEY: &str = "techgloss_lang";
/// Key holding the last-modified timestamp
pub const UPDATE_KEY: &str = "techgloss_last_update";

/// String-keyed persistent storage.
///
/// Last write wins; there is no locking across processes.
pub trait KeyValueStore {
    /// Read a value, `None` if the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a key. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// Key-value store backed by one file per key in a directory.
///
/// ## Example
///
/// ```rust,ignore
/// use techgloss_core::storage::{FileKeyValueStore, KeyValueStore, THEME_KEY};
///
/// let storage = FileKeyValueStore::new("./data");
/// storage.set(THEME_KEY, "dark")?;
/// assert_eq!(storage.get(THEME_KEY)?.as_deref(), Some("dark"));
/// ```
pub struct FileKeyValueStore {
    /// Directory holding one file per key
    base_dir: PathBuf,
}

impl FileKeyValueStore {
    /// Create a store rooted at `base_dir`.
    ///
    /// The directory is created on the first write.
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        FileKeyValueStore {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    /// Directory this store writes to
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Path of the file holding `key`.
    pub fn key_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", sanitize_key(key)))
    }

    fn backup_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json.bak", sanitize_key(key)))
    }

    fn temp_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json.tmp", sanitize_key(key)))
    }

    /// Check if a value exists for `key`.
    pub fn exists(&self, key: &str) -> bool {
        self.key_path(key).exists()
    }

    /// Bring back the last backup of `key` when its live file is gone.
    ///
    /// Returns `None` when there is no backup either.
    fn restore_from_backup(&self, key: &str) -> Result<Option<String>> {
        let backup_path = self.backup_path(key);
        if !backup_path.exists() {
            return Ok(None);
        }

        let value = fs::read_to_string(&backup_path)
            .map_err(|e| GlossError::storage(format!("read backup {}", key), e.to_string()))?;
        warn!(key, "Live value missing, restored from backup");

        if let Err(e) = fs::copy(&backup_path, self.key_path(key)) {
            warn!(key, error = %e, "Failed to write restored value back");
        }
        Ok(Some(value))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return self.restore_from_backup(key);
        }

        fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| GlossError::storage(format!("read {}", key), e.to_string()))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let write = || -> std::io::Result<()> {
            fs::create_dir_all(&self.base_dir)?;

            let temp_path = self.temp_path(key);
            fs::write(&temp_path, value)?;

            // Keep the previous value around as a backup. Copying leaves the
            // live file in place until the rename replaces it.
            let path = self.key_path(key);
            if path.exists() {
                fs::copy(&path, self.backup_path(key))?;
            }

            fs::rename(&temp_path, &path)
        };

        write().map_err(|e| GlossError::storage(format!("write {}", key), e.to_string()))?;
        debug!(key, bytes = value.len(), "Stored value");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        for path in [self.key_path(key), self.backup_path(key)] {
            if path.exists() {
                fs::remove_file(&path)
                    .map_err(|e| GlossError::storage(format!("remove {}", key), e.to_string()))?;
            }
        }
        Ok(())
    }
}

/// In-memory key-value store, for tests and embedding.
#[derive(Default)]
pub struct MemoryKeyValueStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with a value
    pub fn with_value(self, key: &str, value: impl Into<String>) -> Self {
        self.values
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key.to_string(), value.into());
        self
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self
            .values
            .lock()
            .map_err(|e| GlossError::storage("read", e.to_string()))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| GlossError::storage("write", e.to_string()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| GlossError::storage("remove", e.to_string()))?;
        values.remove(key);
        Ok(())
    }
}

/// Keep keys usable as file names.
fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
