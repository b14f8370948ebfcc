//! Key-value preference groups.
//!
//! A preference group is a flat map of named integer entries, private to the
//! current user. [`JsonPreferences`] keeps each group in its own JSON file,
//! `<directory>/<namespace>.json`; [`MemoryPreferences`] keeps it in memory.
//!
//! Writes to a [`JsonPreferences`] group are staged: the whole group is written
//! to a sibling `.tmp` file, flushed and synced, then renamed over the real
//! file. Readers of the file see either the old group or the new one. The
//! staging file is removed whenever a write fails.

use std::collections::{BTreeMap, HashMap};
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde_json::Value;

use super::error::StorageError;

/// Preference group used when none is configured.
pub const DEFAULT_NAMESPACE: &str = "sample_theme";

/// Entry holding the theme ordinal.
pub const THEME_KEY: &str = "app_theme";

/// Where and under which names preferences are stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory holding the preference group files.
    pub directory: PathBuf,
    /// Name of the preference group.
    pub namespace: String,
    /// Entry holding the theme ordinal.
    pub key: String,
}

impl StoreConfig {
    /// Uses the default group and key inside `directory`.
    pub fn in_directory(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            ..Self::default()
        }
    }

    /// Path of the preference group file.
    pub fn group_path(&self) -> PathBuf {
        self.directory.join(format!("{}.json", self.namespace))
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            key: THEME_KEY.to_string(),
        }
    }
}

/// The per-user configuration directory for this application.
pub fn default_directory() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("themeswitch")
}

/// Durable storage for integer preferences.
pub trait PreferenceStore: Send + Sync {
    /// Returns the entry stored under `key`, or `None` if there is none.
    fn get_int(&self, key: &str) -> Result<Option<i64>, StorageError>;

    /// Stores `value` under `key`. Returns only after the value is durable.
    fn put_int(&self, key: &str, value: i64) -> Result<(), StorageError>;
}

/// A preference group backed by a JSON file.
#[derive(Debug)]
pub struct JsonPreferences {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, Value>>,
}

impl JsonPreferences {
    /// Opens the group described by `config`.
    ///
    /// A missing file is an empty group. A file that is not a JSON object is
    /// logged and treated as empty; the next write replaces it.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the file exists but cannot be read.
    pub fn open(config: &StoreConfig) -> Result<Self, StorageError> {
        Self::open_path(config.group_path())
    }

    /// Opens the group stored at `path`.
    pub fn open_path(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries = read_group(&path)?;
        log::debug!(
            "opened preference group {} ({} entries)",
            path.display(),
            entries.len()
        );
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// An empty group that writes to `path` without reading it first.
    ///
    /// Used when the existing file could not be read; the next successful
    /// write replaces it.
    pub fn empty_at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: Mutex::new(BTreeMap::new()),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn entries(&self) -> MutexGuard<'_, BTreeMap<String, Value>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PreferenceStore for JsonPreferences {
    fn get_int(&self, key: &str) -> Result<Option<i64>, StorageError> {
        let entries = self.entries();
        match entries.get(key) {
            None => Ok(None),
            Some(value) => match value.as_i64() {
                Some(n) => Ok(Some(n)),
                None => {
                    log::warn!(
                        "ignoring non-integer preference '{}' in {}: {}",
                        key,
                        self.path.display(),
                        value
                    );
                    Ok(None)
                }
            },
        }
    }

    fn put_int(&self, key: &str, value: i64) -> Result<(), StorageError> {
        // Held across the write so concurrent writers cannot interleave files.
        let mut entries = self.entries();
        let mut next = entries.clone();
        next.insert(key.to_string(), Value::from(value));
        write_group(&self.path, &next)?;
        *entries = next;
        Ok(())
    }
}

fn read_group(path: &Path) -> Result<BTreeMap<String, Value>, StorageError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
        Err(e) => return Err(StorageError::io(path, e)),
    };

    match serde_json::from_str(&contents) {
        Ok(entries) => Ok(entries),
        Err(e) => {
            log::warn!(
                "preference group {} is unreadable ({}); starting empty",
                path.display(),
                e
            );
            Ok(BTreeMap::new())
        }
    }
}

fn write_group(path: &Path, entries: &BTreeMap<String, Value>) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
    }

    let staging = staging_path(path);
    let result = write_staged(&staging, entries)
        .and_then(|()| fs::rename(&staging, path).map_err(|e| StorageError::io(path, e)));

    if result.is_err() {
        let _ = fs::remove_file(&staging);
    }
    result
}

fn write_staged(staging: &Path, entries: &BTreeMap<String, Value>) -> Result<(), StorageError> {
    let file = File::create(staging).map_err(|e| StorageError::io(staging, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, entries).map_err(|source| StorageError::Encode {
        path: staging.to_path_buf(),
        source,
    })?;
    writer.flush().map_err(|e| StorageError::io(staging, e))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| StorageError::io(staging, e))
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// A preference group that lives only in memory.
///
/// Useful for previews and tests; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    entries: Mutex<HashMap<String, i64>>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a group pre-populated with `entries`.
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, i64)>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        Self {
            entries: Mutex::new(entries),
        }
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get_int(&self, key: &str) -> Result<Option<i64>, StorageError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).copied())
    }

    fn put_int(&self, key: &str, value: i64) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value);
        Ok(())
    }
}
