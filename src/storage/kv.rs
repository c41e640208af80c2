use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Data directory not found")]
    DataDirNotFound,

    #[error("Store lock poisoned")]
    Poisoned,
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Durable string key → text value store.
///
/// Values are opaque to the store; callers own serialization.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// Keys become file names, so only a conservative character set is allowed.
fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
        && !key.starts_with('.');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

/// File-backed store: one `<key>.json` file per key under `<base>/kv/`.
pub struct FileKvStore {
    base_path: PathBuf,
}

impl FileKvStore {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Get the default data directory
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("iotprep"))
            .ok_or(StorageError::DataDirNotFound)
    }

    fn kv_dir(&self) -> PathBuf {
        self.base_path.join("kv")
    }

    fn value_path(&self, key: &str) -> PathBuf {
        self.kv_dir().join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileKvStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        let path = self.value_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&path)?))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        fs::create_dir_all(self.kv_dir())?;
        fs::write(self.value_path(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        validate_key(key)?;
        let path = self.value_path(key);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}

/// Process-local store, used by tests and `--ephemeral` runs.
#[derive(Default)]
pub struct MemoryKvStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKvStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        let values = self.values.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        let mut values = self.values.lock().map_err(|_| StorageError::Poisoned)?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        validate_key(key)?;
        let mut values = self.values.lock().map_err(|_| StorageError::Poisoned)?;
        values.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (FileKvStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKvStore::new(temp_dir.path().to_path_buf());
        (store, temp_dir)
    }

    #[test]
    fn test_get_missing_key() {
        let (store, _temp) = create_test_store();
        assert_eq!(store.get("nothing_here").unwrap(), None);
    }

    #[test]
    fn test_set_overwrites() {
        let (store, _temp) = create_test_store();
        store.set("sheet", "[1]").unwrap();
        store.set("sheet", "[2]").unwrap();
        assert_eq!(store.get("sheet").unwrap().as_deref(), Some("[2]"));
    }

    #[test]
    fn test_remove() {
        let (store, _temp) = create_test_store();
        store.set("sheet", "[]").unwrap();
        store.remove("sheet").unwrap();
        assert_eq!(store.get("sheet").unwrap(), None);

        // Removing again is fine
        store.remove("sheet").unwrap();
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let (store, _temp) = create_test_store();
        assert!(matches!(
            store.set("../escape", "x"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(matches!(store.get(""), Err(StorageError::InvalidKey(_))));
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryKvStore::new();
        store.set("a", "1").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
        store.remove("a").unwrap();
        assert_eq!(store.get("a").unwrap(), None);
    }
}
