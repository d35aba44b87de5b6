//! Single-user preference persistence. The card only stores one value, the
//! refresh interval, but the store is keyed so the file format can grow.

use crate::Result;

use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

pub trait PreferenceStore: Send + Sync + 'static {
    fn load(&self, key: &str) -> Option<String>;

    fn store(&self, key: &str, value: &str) -> Result<()>;
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for Box<T> {
    fn load(&self, key: &str) -> Option<String> {
        (**self).load(key)
    }

    fn store(&self, key: &str, value: &str) -> Result<()> {
        (**self).store(key, value)
    }
}

/// A flat JSON object of string values, rewritten in full on every store.
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("presence-card").join("preferences.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> HashMap<String, String> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "No readable preferences file");
                return HashMap::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            debug!(path = %self.path.display(), error = %e, "Ignoring malformed preferences file");
            HashMap::new()
        })
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn load(&self, key: &str) -> Option<String> {
        self.read_all().remove(key)
    }

    fn store(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.read_all();
        values.insert(key.to_owned(), value.to_owned());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&self.path, serde_json::to_vec_pretty(&values)?)?;
        Ok(())
    }
}

/// Clones share the same values.
#[derive(Clone, Default)]
pub struct MemoryPreferenceStore {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryPreferenceStore {
    pub fn with(key: &str, value: &str) -> Self {
        let store = Self::default();
        store.values.lock().insert(key.to_owned(), value.to_owned());
        store
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self, key: &str) -> Option<String> {
        self.values.lock().get(key).cloned()
    }

    fn store(&self, key: &str, value: &str) -> Result<()> {
        self.values.lock().insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilePreferenceStore::new(dir.path().join("nested").join("prefs.json"));

        assert_eq!(store.load("interval_millis"), None);

        store.store("interval_millis", "10000").unwrap();
        store.store("other", "x").unwrap();

        let reopened = FilePreferenceStore::new(store.path());
        assert_eq!(reopened.load("interval_millis").as_deref(), Some("10000"));
        assert_eq!(reopened.load("other").as_deref(), Some("x"));
    }

    #[test]
    fn test_malformed_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "{ not json").unwrap();

        let store = FilePreferenceStore::new(&path);
        assert_eq!(store.load("interval_millis"), None);

        store.store("interval_millis", "3000").unwrap();
        assert_eq!(store.load("interval_millis").as_deref(), Some("3000"));
    }

    #[test]
    fn test_memory_clones_share_values() {
        let store = MemoryPreferenceStore::default();
        let clone = store.clone();

        clone.store("interval_millis", "3000").unwrap();
        assert_eq!(store.load("interval_millis").as_deref(), Some("3000"));
    }
}
