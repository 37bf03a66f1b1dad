//! Backing file handling
//!
//! Resolves the cache directory, decodes the JSON file tolerantly on load and
//! rewrites it wholesale on every save.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

use serde_json::Value;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::cache::key::is_valid_key;
use crate::cache::{CacheEntry, DEFAULT_DIRECTORY_NAME};
use crate::error::{CacheError, Result};

// == Directory Resolution ==
/// Resolves and prepares the directory holding the backing file.
///
/// `None` selects `<temp_dir>/JsonFileCache`. Relative paths are resolved
/// against the current working directory. Missing directories are created
/// recursively with mode `0755`.
pub(crate) fn resolve_directory(directory: Option<&Path>) -> Result<PathBuf> {
    let directory = match directory {
        None => env::temp_dir().join(DEFAULT_DIRECTORY_NAME),
        Some(dir) if dir.is_absolute() => dir.to_path_buf(),
        Some(dir) => {
            let cwd = env::current_dir().map_err(|source| CacheError::UnreadableCacheDirectory {
                path: dir.to_path_buf(),
                source: Some(source),
            })?;
            cwd.join(strip_current_dir(dir))
        }
    };

    let created = if directory.is_dir() {
        Ok(())
    } else {
        create_directory(&directory)
    };

    match fs::read_dir(&directory) {
        Ok(_) => Ok(directory),
        Err(read_err) => Err(CacheError::UnreadableCacheDirectory {
            source: Some(created.err().unwrap_or(read_err)),
            path: directory,
        }),
    }
}

fn strip_current_dir(dir: &Path) -> PathBuf {
    dir.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

#[cfg(unix)]
fn create_directory(directory: &Path) -> io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;

    fs::DirBuilder::new()
        .recursive(true)
        .mode(0o755)
        .create(directory)
}

#[cfg(not(unix))]
fn create_directory(directory: &Path) -> io::Result<()> {
    fs::create_dir_all(directory)
}

/// Creates the temp file that will replace `target`.
///
/// An existing backing file keeps its permissions. A new one is created with
/// mode `0644`, masked by the process umask.
#[cfg(unix)]
fn create_temp_file(directory: &Path, target: &Path) -> io::Result<NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;

    match fs::metadata(target) {
        Ok(metadata) => {
            let file = NamedTempFile::new_in(directory)?;
            file.as_file().set_permissions(metadata.permissions())?;
            Ok(file)
        }
        Err(_) => tempfile::Builder::new()
            .permissions(fs::Permissions::from_mode(0o644))
            .tempfile_in(directory),
    }
}

#[cfg(not(unix))]
fn create_temp_file(directory: &Path, _target: &Path) -> io::Result<NamedTempFile> {
    NamedTempFile::new_in(directory)
}

// Makes the rename itself survive a crash
#[cfg(unix)]
fn sync_directory(directory: &Path) -> io::Result<()> {
    fs::File::open(directory)?.sync_all()
}

#[cfg(not(unix))]
fn sync_directory(_directory: &Path) -> io::Result<()> {
    Ok(())
}

/// Joins directory and filename, dropping leading separators from the filename.
pub(crate) fn backing_file_path(directory: &Path, filename: &str) -> PathBuf {
    directory.join(filename.trim_start_matches(std::path::is_separator))
}

// == Load ==
/// Reads the backing file into a fresh entry map.
///
/// A missing or empty file yields an empty map. Content that is not a JSON
/// object is discarded with a warning. Individual entries with invalid keys
/// or a malformed shape are skipped.
pub(crate) fn load_entries(path: &Path) -> HashMap<String, CacheEntry> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return HashMap::new(),
        Err(err) => {
            warn!("Could not read cache file {}: {}", path.display(), err);
            return HashMap::new();
        }
    };

    if content.trim().is_empty() {
        return HashMap::new();
    }

    let root = match serde_json::from_str::<Value>(&content) {
        Ok(Value::Object(root)) => root,
        Ok(_) => {
            warn!("Cache file {} is not a JSON object, starting empty", path.display());
            return HashMap::new();
        }
        Err(err) => {
            warn!("Cache file {} is corrupt ({}), starting empty", path.display(), err);
            return HashMap::new();
        }
    };

    let mut entries = HashMap::with_capacity(root.len());
    for (key, raw) in root {
        if !is_valid_key(&key) {
            warn!("Dropping entry with invalid key {:?} from {}", key, path.display());
            continue;
        }
        match serde_json::from_value::<CacheEntry>(raw) {
            Ok(entry) => {
                entries.insert(key, entry);
            }
            Err(err) => warn!("Dropping malformed entry {:?}: {}", key, err),
        }
    }
    entries
}

// == Save ==
/// Overwrites the backing file with the full entry map.
///
/// Returns true iff a non-empty payload was written. The payload goes to a
/// temporary file in the same directory which is then renamed over `path`,
/// so readers see either the old or the new content.
pub(crate) fn save_entries(path: &Path, entries: &HashMap<String, CacheEntry>) -> bool {
    match write_atomically(path, entries) {
        Ok(0) => false,
        Ok(written) => {
            debug!("Persisted {} entries ({} bytes) to {}", entries.len(), written, path.display());
            true
        }
        Err(err) => {
            warn!("Failed to persist cache to {}: {}", path.display(), err);
            false
        }
    }
}

fn write_atomically(path: &Path, entries: &HashMap<String, CacheEntry>) -> io::Result<usize> {
    let payload = serde_json::to_vec(entries)?;
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = create_temp_file(directory, path)?;
    file.write_all(&payload)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|err| err.error)?;

    if let Err(err) = sync_directory(directory) {
        warn!("Could not sync directory {}: {}", directory.display(), err);
    }
    Ok(payload.len())
}
