//! Cache Store Module
//!
//! Main cache engine: an in-memory map mirrored to a single JSON file.
//!
//! Every mutating call updates the map and then rewrites the whole file.
//! Reads never touch disk after construction. There is no locking across
//! instances or processes: the last writer to persist wins.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info};

use crate::cache::key::validate_key;
use crate::cache::persist::{backing_file_path, load_entries, resolve_directory, save_entries};
use crate::cache::{is_truthy, CacheEntry, DEFAULT_FILENAME, DEFAULT_LIFETIME};
use crate::config::Config;
use crate::error::Result;

// == JSON File Cache ==
/// Key-value cache persisted as one JSON file.
///
/// Keyed operations reject malformed keys with [`CacheError::InvalidKey`]
/// before touching state. Mutations return `Ok(true)` when the file was
/// rewritten and `Ok(false)` when the write failed; in the latter case the
/// in-memory change is kept and disk stays stale until the next good write.
///
/// [`CacheError::InvalidKey`]: crate::error::CacheError::InvalidKey
#[derive(Debug)]
pub struct JsonFileCache {
    /// Absolute path of the backing file
    path: PathBuf,
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Lifetime in seconds for entries stored without an explicit one
    default_lifetime: u64,
}

impl JsonFileCache {
    // == Constructor ==
    /// Opens the cache stored in `filename` under `directory`.
    ///
    /// `None` for the directory selects `<temp_dir>/JsonFileCache`. The
    /// directory is created if missing. An absent, empty or corrupt file
    /// yields an empty cache.
    ///
    /// # Errors
    /// Returns `UnreadableCacheDirectory` if the directory cannot be created
    /// or read.
    pub fn open(filename: &str, directory: Option<&Path>) -> Result<Self> {
        let directory = resolve_directory(directory)?;
        let path = backing_file_path(&directory, filename);
        let entries = load_entries(&path);

        info!(
            "Opened cache file {} with {} entries",
            path.display(),
            entries.len()
        );

        Ok(Self {
            path,
            entries,
            default_lifetime: DEFAULT_LIFETIME,
        })
    }

    /// Opens `filesystem-cache.json` in the default temp directory.
    pub fn open_default() -> Result<Self> {
        Self::open(DEFAULT_FILENAME, None)
    }

    /// Opens the cache described by `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::open(&config.filename, config.directory.as_deref())?
            .with_default_lifetime(config.default_lifetime))
    }

    /// Sets the lifetime used when `set`/`touch`/`set_multiple` get `None`.
    pub fn with_default_lifetime(mut self, lifetime_secs: u64) -> Self {
        self.default_lifetime = lifetime_secs;
        self
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn default_lifetime(&self) -> u64 {
        self.default_lifetime
    }

    // == Get ==
    /// Returns the value stored under `key`, or `default` if absent.
    ///
    /// The recorded expiration is not checked.
    pub fn get(&self, key: &str, default: Value) -> Result<Value> {
        Ok(self.lookup(key)?.cloned().unwrap_or(default))
    }

    /// Returns the stored value, distinguishing absence from any stored value.
    pub fn lookup(&self, key: &str) -> Result<Option<&Value>> {
        validate_key(key)?;
        Ok(self.entries.get(key).map(|entry| &entry.value))
    }

    // == Set ==
    /// Stores `value` under `key`, expiring `lifetime` seconds from now.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - Any JSON value
    /// * `lifetime` - Lifetime in seconds (uses the default lifetime if None)
    pub fn set(&mut self, key: &str, value: Value, lifetime: Option<u64>) -> Result<bool> {
        validate_key(key)?;

        let entry = CacheEntry::new(value, lifetime.unwrap_or(self.default_lifetime));
        debug!("Set {:?} expiring at {}", key, entry.expires_at);
        self.entries.insert(key.to_string(), entry);

        Ok(self.persist())
    }

    // == Touch ==
    /// Re-stores the current value of `key` with a refreshed expiration.
    ///
    /// Falsy values (`0`, `""`, `false`, `null`, empty collections) and absent
    /// keys are left alone and report `false`.
    pub fn touch(&mut self, key: &str, lifetime: Option<u64>) -> Result<bool> {
        let value = self.get(key, Value::Null)?;
        if !is_truthy(&value) {
            return Ok(false);
        }
        self.set(key, value, lifetime)
    }

    // == Delete ==
    /// Removes `key` if present and persists.
    pub fn delete(&mut self, key: &str) -> Result<bool> {
        validate_key(key)?;

        if self.entries.remove(key).is_some() {
            debug!("Deleted {:?}", key);
        }

        Ok(self.persist())
    }

    // == Clear ==
    /// Removes every entry and persists.
    pub fn clear(&mut self) -> bool {
        debug!("Clearing {} entries", self.entries.len());
        self.entries.clear();
        self.persist()
    }

    // == Has ==
    /// Returns true if `key` holds a truthy value.
    ///
    /// A stored `0`, `""`, `false` or empty collection reports `false`. Use
    /// [`contains_key`](Self::contains_key) for plain existence.
    pub fn has(&self, key: &str) -> Result<bool> {
        Ok(self.lookup(key)?.is_some_and(is_truthy))
    }

    /// Returns true if `key` is present, whatever its value.
    pub fn contains_key(&self, key: &str) -> Result<bool> {
        Ok(self.lookup(key)?.is_some())
    }

    /// Returns the recorded expiration timestamp (Unix seconds) for `key`.
    pub fn expires_at(&self, key: &str) -> Result<Option<i64>> {
        validate_key(key)?;
        Ok(self.entries.get(key).map(|entry| entry.expires_at))
    }

    // == Bulk Operations ==
    /// Looks up every key, substituting `default` for absent ones.
    ///
    /// Fails on the first invalid key. Never touches disk.
    pub fn get_multiple<I, K>(&self, keys: I, default: Value) -> Result<HashMap<String, Value>>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let mut values = HashMap::new();
        for key in keys {
            let key = key.as_ref();
            let value = self.get(key, default.clone())?;
            values.insert(key.to_string(), value);
        }
        Ok(values)
    }

    /// Stores every pair with a shared expiration and persists once.
    ///
    /// All keys are validated before anything is stored, so an invalid key
    /// leaves the cache untouched. `ttl` of `None` uses the default lifetime.
    pub fn set_multiple<I, K>(&mut self, values: I, ttl: Option<u64>) -> Result<bool>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let pairs: Vec<(String, Value)> = values
            .into_iter()
            .map(|(key, value)| (key.into(), value))
            .collect();
        for (key, _) in &pairs {
            validate_key(key)?;
        }

        let lifetime = ttl.unwrap_or(self.default_lifetime);
        debug!("Setting {} entries", pairs.len());
        for (key, value) in pairs {
            self.entries.insert(key, CacheEntry::new(value, lifetime));
        }

        Ok(self.persist())
    }

    /// Removes every key and persists once.
    ///
    /// All keys are validated before anything is removed.
    pub fn delete_multiple<I, K>(&mut self, keys: I) -> Result<bool>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let keys: Vec<K> = keys.into_iter().collect();
        for key in &keys {
            validate_key(key.as_ref())?;
        }

        let mut removed = 0;
        for key in &keys {
            let key: &str = key.as_ref();
            if self.entries.remove(key).is_some() {
                removed += 1;
            }
        }
        debug!("Deleted {} of {} requested entries", removed, keys.len());

        Ok(self.persist())
    }

    // == Reload ==
    /// Replaces the in-memory map with the current file content.
    ///
    /// Picks up changes written by other instances. Unsaved in-memory state
    /// is discarded.
    pub fn reload(&mut self) {
        self.entries = load_entries(&self.path);
        debug!("Reloaded {} entries from {}", self.entries.len(), self.path.display());
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the stored keys in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    fn persist(&self) -> bool {
        save_entries(&self.path, &self.entries)
    }
}
