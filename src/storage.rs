//! Local key/value storage.
//!
//! Plays the role of browser local storage: one file per key under the
//! platform data directory on native builds, an in-memory map on wasm.

#[cfg(target_arch = "wasm32")]
use once_cell::sync::Lazy;
#[cfg(target_arch = "wasm32")]
use std::collections::HashMap;
#[cfg(target_arch = "wasm32")]
use std::sync::Mutex;

#[cfg(not(target_arch = "wasm32"))]
use std::{fs, io, path::PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[cfg(not(target_arch = "wasm32"))]
    #[error("storage I/O failed for {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("storage lock poisoned")]
    Poisoned,
}

#[cfg(target_arch = "wasm32")]
static MEMORY_STORAGE: Lazy<Mutex<HashMap<String, String>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// A storage namespace. `LocalStorage::default()` is the app-wide one.
#[derive(Clone, Debug)]
pub struct LocalStorage {
    #[cfg(not(target_arch = "wasm32"))]
    root: PathBuf,
    #[cfg(target_arch = "wasm32")]
    prefix: String,
}

impl Default for LocalStorage {
    fn default() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        {
            let root = dirs::data_local_dir()
                .map(|dir| dir.join("demistify").join("storage"))
                .unwrap_or_else(|| PathBuf::from("cache").join("storage"));
            Self { root }
        }
        #[cfg(target_arch = "wasm32")]
        {
            Self {
                prefix: String::new(),
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl LocalStorage {
    /// Storage rooted at an explicit directory.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(sanitize_key(key))
    }

    pub fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.key_path(key)).ok()
    }

    pub fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root).map_err(|source| StorageError::Io {
            path: self.root.clone(),
            source,
        })?;
        let path = self.key_path(key);
        fs::write(&path, value).map_err(|source| StorageError::Io { path, source })
    }

    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.key_path(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    pub fn at(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    fn scoped(&self, key: &str) -> String {
        format!("{}{}", self.prefix, sanitize_key(key))
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let storage = MEMORY_STORAGE.lock().ok()?;
        storage.get(&self.scoped(key)).cloned()
    }

    pub fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut storage = MEMORY_STORAGE.lock().map_err(|_| StorageError::Poisoned)?;
        storage.insert(self.scoped(key), value.to_string());
        Ok(())
    }

    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut storage = MEMORY_STORAGE.lock().map_err(|_| StorageError::Poisoned)?;
        storage.remove(&self.scoped(key));
        Ok(())
    }
}

/// Keys become file names, so keep them to a safe alphabet.
fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .take(64)
        .collect()
}
