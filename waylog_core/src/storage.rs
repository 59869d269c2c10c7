//! Durable key-value string storage.
//!
//! The [`StringStore`] trait is the opaque storage boundary: get a
//! string, set a string, remove a key. [`FileStore`] is the production
//! backend, mapping each key to a JSON document under a data directory
//! with file locking and atomic replacement on write.

use crate::{Error, Result};
use fs2::FileExt;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// Opaque get/set-string storage boundary
pub trait StringStore {
    /// Read the value stored under `key`, `None` if absent
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value stored under `key`
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`; removing an absent key is not an error
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// File-backed store, one file per key under a data directory
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StringStore for FileStore {
    /// An unreadable key file (unopenable, unlockable, or not valid
    /// UTF-8) is reported as absent with a warning; a damaged value
    /// must never take the application down.
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let file = match File::open(&path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!("Unable to open {:?}: {}. Treating as absent.", path, e);
                return Ok(None);
            }
        };

        // Shared lock for reading
        if let Err(e) = file.lock_shared() {
            tracing::warn!("Unable to lock {:?}: {}. Treating as absent.", path, e);
            return Ok(None);
        }

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        if let Err(e) = reader.read_to_string(&mut contents) {
            let _ = file.unlock();
            tracing::warn!("Failed to read {:?}: {}. Treating as absent.", path, e);
            return Ok(None);
        }
        file.unlock()?;

        Ok(Some(contents))
    }

    /// Writes go through a temp file in the same directory, get synced,
    /// and replace the key file by atomic rename. A crash mid-write
    /// leaves the previous value intact.
    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;

        let temp = NamedTempFile::new_in(&self.dir)?;
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            writer.write_all(value.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(self.key_path(key))
            .map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Wrote key {:?} under {:?}", key, self.dir);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        match std::fs::remove_file(self.key_path(key)) {
            Ok(()) => {
                tracing::debug!("Removed key {:?} under {:?}", key, self.dir);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store for tests and headless runs
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StringStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_set_get_remove() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(temp_dir.path());

        assert_eq!(store.get("workouts").unwrap(), None);

        store.set("workouts", "[1,2,3]").unwrap();
        assert_eq!(store.get("workouts").unwrap().as_deref(), Some("[1,2,3]"));

        store.remove("workouts").unwrap();
        assert_eq!(store.get("workouts").unwrap(), None);
    }

    #[test]
    fn test_file_store_overwrites() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(temp_dir.path());

        store.set("workouts", "old").unwrap();
        store.set("workouts", "new").unwrap();
        assert_eq!(store.get("workouts").unwrap().as_deref(), Some("new"));
    }

    #[test]
    fn test_file_store_treats_non_utf8_value_as_absent() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(temp_dir.path());
        std::fs::write(temp_dir.path().join("workouts.json"), [0xff, 0xfe, 0xfd]).unwrap();

        assert_eq!(store.get("workouts").unwrap(), None);
    }

    #[test]
    fn test_file_store_remove_absent_key_is_ok() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(temp_dir.path());
        assert!(store.remove("nothing").is_ok());
    }

    #[test]
    fn test_file_store_leaves_no_stray_temp_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(temp_dir.path());
        store.set("workouts", "{}").unwrap();

        let extras: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name() != "workouts.json")
            .collect();
        assert!(
            extras.is_empty(),
            "Expected only workouts.json, found extras: {:?}",
            extras
        );
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("workouts").unwrap(), None);
        store.set("workouts", "[]").unwrap();
        assert_eq!(store.get("workouts").unwrap().as_deref(), Some("[]"));
        store.remove("workouts").unwrap();
        assert_eq!(store.get("workouts").unwrap(), None);
    }
}
