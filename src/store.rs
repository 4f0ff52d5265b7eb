//! Durable key-value capability behind the identity store.
//!
//! Backends are deliberately tiny: the only thing ever stored is the
//! anonymous id, so each one keeps a flat string-to-string map.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::errors::StorageError;

/// String key-value storage that survives reloads of the host.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// Process-local store, used by tests and as a last resort.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StorageError> {
        self.entries
            .lock()
            .map_err(|_| StorageError::Unavailable("memory store lock poisoned".to_string()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(feature = "native")]
pub use file::FileStore;

#[cfg(feature = "native")]
mod file {
    use std::collections::BTreeMap;
    use std::path::{Path, PathBuf};

    use tracing::debug;

    use super::KeyValueStore;
    use crate::errors::StorageError;

    /// A single JSON object on disk, rewritten in full on every `set`.
    #[derive(Debug, Clone)]
    pub struct FileStore {
        path: PathBuf,
    }

    impl FileStore {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
            let raw = match std::fs::read_to_string(&self.path) {
                Ok(raw) => raw,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
                Err(e) => return Err(StorageError::io(&self.path, e)),
            };
            if raw.trim().is_empty() {
                return Ok(BTreeMap::new());
            }
            serde_json::from_str(&raw).map_err(|source| StorageError::Corrupt {
                path: self.path.clone(),
                source,
            })
        }
    }

    impl KeyValueStore for FileStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Ok(self.load()?.remove(key))
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            let mut entries = self.load()?;
            entries.insert(key.to_string(), value.to_string());

            if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
            }
            let json = serde_json::to_string_pretty(&entries).map_err(|source| {
                StorageError::Corrupt { path: self.path.clone(), source }
            })?;
            std::fs::write(&self.path, json).map_err(|e| StorageError::io(&self.path, e))?;

            debug!(path = %self.path.display(), key, "stored value");
            Ok(())
        }
    }
}
