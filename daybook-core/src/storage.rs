//! Key-value storage backends for persisted slots.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{DaybookError, DaybookResult};

/// A string key-value store. Every `save` replaces the whole value.
pub trait Storage {
    /// Read the value under `key`, or `None` if nothing was ever saved.
    fn load(&self, key: &str) -> DaybookResult<Option<String>>;

    fn save(&mut self, key: &str, value: &str) -> DaybookResult<()>;
}

/// In-memory storage, mostly useful in tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
    writes: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with a single slot.
    pub fn with_slot(key: &str, value: &str) -> Self {
        let mut slots = HashMap::new();
        slots.insert(key.to_string(), value.to_string());
        MemoryStorage { slots, writes: 0 }
    }

    /// Number of `save` calls so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Storage for MemoryStorage {
    fn load(&self, key: &str) -> DaybookResult<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> DaybookResult<()> {
        self.slots.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// File-backed storage: each key lives in `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Storage for FileStorage {
    fn load(&self, key: &str) -> DaybookResult<Option<String>> {
        let path = self.slot_path(key);

        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DaybookError::Storage(format!(
                "Could not read {}: {e}",
                path.display()
            ))),
        }
    }

    fn save(&mut self, key: &str, value: &str) -> DaybookResult<()> {
        std::fs::create_dir_all(&self.dir)?;

        let path = self.slot_path(key);
        let temp = self.dir.join(format!("{}.json.tmp", key));

        // Write to a temp file first so readers never see a partial value
        std::fs::write(&temp, value)?;
        std::fs::rename(&temp, &path).map_err(|e| {
            DaybookError::Storage(format!("Could not replace {}: {e}", path.display()))
        })?;

        Ok(())
    }
}
