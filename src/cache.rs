use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::SystemTime;

use log::debug;

use crate::error::{ReportError, Result};
use crate::loader;
use crate::model::Dataset;

#[derive(Debug)]
struct Entry {
    modified: Option<SystemTime>,
    dataset: Arc<Dataset>,
}

/// Process-wide store of loaded datasets, keyed by canonical path.
///
/// An entry is reused while the file's modification time is unchanged.
/// Loading happens outside the lock; when two callers race on the same file
/// both load it and the last insert wins, which is fine because a load of an
/// unchanged file always yields the same rows.
#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: RwLock<HashMap<PathBuf, Entry>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached dataset for `path`, loading it on first use or when
    /// the file changed on disk.
    pub fn get_or_load(&self, path: &Path) -> Result<Arc<Dataset>> {
        let key = canonical(path)?;
        let modified = modified(&key);

        if let Some(entry) = self.read().get(&key) {
            if entry.modified.is_some() && entry.modified == modified {
                debug!("cache hit for {}", key.display());
                return Ok(Arc::clone(&entry.dataset));
            }
        }

        debug!("cache miss for {}", key.display());
        self.load_into(key, modified)
    }

    /// Load `path` unconditionally and replace whatever was cached.
    pub fn reload(&self, path: &Path) -> Result<Arc<Dataset>> {
        let key = canonical(path)?;
        let modified = modified(&key);
        self.load_into(key, modified)
    }

    /// Drop the entry for `path`. Returns whether one was present.
    pub fn invalidate(&self, path: &Path) -> bool {
        let key = canonical(path).unwrap_or_else(|_| path.to_path_buf());
        let removed = self.write().remove(&key).is_some();
        if removed {
            debug!("invalidated {}", key.display());
        }
        removed
    }

    pub fn clear(&self) {
        self.write().clear();
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn load_into(&self, key: PathBuf, modified: Option<SystemTime>) -> Result<Arc<Dataset>> {
        let dataset = Arc::new(loader::load(&key)?);
        self.write().insert(
            key,
            Entry {
                modified,
                dataset: Arc::clone(&dataset),
            },
        );
        Ok(dataset)
    }

    // A poisoned lock only means another reader panicked; the map itself is
    // never left half-written.
    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<PathBuf, Entry>> {
        self.entries.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<PathBuf, Entry>> {
        self.entries.write().unwrap_or_else(|e| e.into_inner())
    }
}

fn canonical(path: &Path) -> Result<PathBuf> {
    path.canonicalize().map_err(|e| ReportError::format(path, e))
}

fn modified(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}
