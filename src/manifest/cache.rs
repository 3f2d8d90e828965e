//! Read-through cache of parsed manifests keyed by manifest path.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use tracing::{debug, warn};

use super::loader::{Manifest, load_manifest};

/// Process-lifetime manifest cache.
///
/// A manifest is parsed on the first lookup of its path and reused afterwards, even if
/// the file changes on disk. Paths that do not exist are never cached, so a manifest
/// written later is picked up by the next lookup. Malformed manifests are cached as empty.
#[derive(Debug, Default)]
pub struct ManifestCache {
    entries: Mutex<HashMap<PathBuf, Arc<Manifest>>>,
    loads: AtomicUsize,
}

impl ManifestCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache shared by every resolver that does not own one.
    pub fn global() -> &'static ManifestCache {
        static GLOBAL: OnceLock<ManifestCache> = OnceLock::new();
        GLOBAL.get_or_init(ManifestCache::new)
    }

    /// Return the manifest stored at `path`, parsing it on first access.
    ///
    /// Returns `None` when no manifest file exists at `path`.
    pub fn get(&self, path: &Path) -> Option<Arc<Manifest>> {
        if !path.is_file() {
            debug!(manifest = %path.display(), "manifest not found");
            return None;
        }

        let mut entries = self.lock();
        if let Some(manifest) = entries.get(path) {
            return Some(Arc::clone(manifest));
        }

        let manifest = match load_manifest(path) {
            Ok(manifest) => manifest,
            Err(err) if err.is_not_found() => {
                debug!(manifest = %path.display(), "manifest disappeared before it could be read");
                return None;
            }
            Err(err) => {
                warn!("{err}; treating manifest as empty");
                Manifest::default()
            }
        };
        self.loads.fetch_add(1, Ordering::Relaxed);
        debug!(manifest = %path.display(), entries = manifest.len(), "cached manifest");

        let manifest = Arc::new(manifest);
        entries.insert(path.to_path_buf(), Arc::clone(&manifest));
        Some(manifest)
    }

    /// Number of manifest files parsed by this cache.
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }

    /// Number of cached manifests.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` when nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<PathBuf, Arc<Manifest>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn parses_each_manifest_once() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("mix-manifest.json");
        fs::write(&path, r#"{"/js/app.js": "/js/app.js?id=1"}"#).unwrap();

        let cache = ManifestCache::new();
        let first = cache.get(&path).unwrap();
        fs::write(&path, r#"{"/js/app.js": "/js/app.js?id=2"}"#).unwrap();
        let second = cache.get(&path).unwrap();

        assert_eq!(cache.loads(), 1);
        assert_eq!(cache.len(), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.get("/js/app.js"), Some("/js/app.js?id=1"));
    }

    #[test]
    fn missing_manifests_are_not_cached() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("mix-manifest.json");

        let cache = ManifestCache::new();
        assert!(cache.get(&path).is_none());
        assert!(cache.is_empty());

        fs::write(&path, r#"{"/a.js": "/a.js?id=1"}"#).unwrap();
        let manifest = cache.get(&path).unwrap();
        assert_eq!(manifest.get("/a.js"), Some("/a.js?id=1"));
    }

    #[test]
    fn malformed_manifests_are_cached_as_empty() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("mix-manifest.json");
        fs::write(&path, "{ broken").unwrap();

        let cache = ManifestCache::new();
        assert!(cache.get(&path).unwrap().is_empty());
        assert!(cache.get(&path).unwrap().is_empty());
        assert_eq!(cache.loads(), 1);
    }

    #[test]
    fn keeps_distinct_paths_apart() {
        let temp = tempdir().unwrap();
        let parent = temp.path().join("parent.json");
        let child = temp.path().join("child.json");
        fs::write(&parent, r#"{"/a.js": "/a.js?id=parent"}"#).unwrap();
        fs::write(&child, r#"{"/a.js": "/a.js?id=child"}"#).unwrap();

        let cache = ManifestCache::new();
        assert_eq!(cache.get(&parent).unwrap().get("/a.js"), Some("/a.js?id=parent"));
        assert_eq!(cache.get(&child).unwrap().get("/a.js"), Some("/a.js?id=child"));
        assert_eq!(cache.loads(), 2);
    }
}
