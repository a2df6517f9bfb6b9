// Storage backends for the cache slots.
// A slot is a string value under a string key; payload and timestamp live in
// separate slots, coordinated by the service layer.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::{Result, SettingsError};

use super::paths::{default_cache_dir, sanitize_key};

/// String-keyed slot storage.
///
/// Implementations are not required to coordinate multi-slot writes; the
/// service serializes paired slot access itself.
pub trait Storage: Send + Sync {
    /// Read a slot, if present.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a slot.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a slot. Removing an absent slot is a no-op.
    fn remove(&self, key: &str) -> Result<()>;
}

/// In-memory storage for tests and single-session use.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.slots.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.lock().remove(key);
        Ok(())
    }
}

/// File-backed storage: one file per slot under a root directory.
#[derive(Debug)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Create storage rooted at the given directory. The directory is created
    /// on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create storage under the platform cache directory.
    pub fn default_location() -> Result<Self> {
        let dir = default_cache_dir()
            .ok_or_else(|| SettingsError::Other("no cache directory available".to_string()))?;
        Ok(Self::new(dir))
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.root.join(sanitize_key(key))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.slot_path(key)).ok()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.root)?;

        // Write atomically via temp file
        let path = self.slot_path(key);
        let temp_path = self.root.join(format!("{}.tmp", sanitize_key(key)));
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(value.as_bytes())?;
        file.sync_all()?;
        fs::rename(&temp_path, &path)?;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.slot_path(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_memory_roundtrip() {
        let storage = MemoryStorage::new();

        assert!(storage.get("key").is_none());

        storage.set("key", "value").unwrap();
        assert_eq!(storage.get("key").as_deref(), Some("value"));

        storage.set("key", "replaced").unwrap();
        assert_eq!(storage.get("key").as_deref(), Some("replaced"));

        storage.remove("key").unwrap();
        assert!(storage.get("key").is_none());
    }

    #[test]
    fn test_memory_remove_absent_is_noop() {
        let storage = MemoryStorage::new();
        storage.remove("never-set").unwrap();
    }

    #[test]
    fn test_file_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        assert!(storage.get("caravan.settings").is_none());

        storage.set("caravan.settings", r#"{"logo":"a.png"}"#).unwrap();
        assert_eq!(
            storage.get("caravan.settings").as_deref(),
            Some(r#"{"logo":"a.png"}"#)
        );

        storage.remove("caravan.settings").unwrap();
        assert!(storage.get("caravan.settings").is_none());
    }

    #[test]
    fn test_file_remove_absent_is_noop() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        storage.remove("caravan.settings").unwrap();
    }

    #[test]
    fn test_file_write_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        storage.set("caravan.settings", "{}").unwrap();

        let names: Vec<_> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["caravan.settings".to_string()]);
    }

    #[test]
    fn test_file_keys_are_sanitized() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        storage.set("odd/key", "value").unwrap();

        assert_eq!(storage.get("odd/key").as_deref(), Some("value"));
        assert!(temp_dir.path().join("odd_key").exists());
    }

    #[test]
    fn test_file_root_created_on_first_write() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path().join("nested").join("cache"));

        storage.set("caravan.settings", "{}").unwrap();

        assert_eq!(storage.get("caravan.settings").as_deref(), Some("{}"));
    }
}
