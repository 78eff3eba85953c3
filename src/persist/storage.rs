//! Durable key-value backends.
//!
//! [`FileStorage`] keeps one file per key under a root directory (by default
//! `~/.local/share/clientstore/storage/`). [`MemoryStorage`] is a shared map
//! used by tests and ephemeral sessions; it can be switched into a failing
//! mode to exercise error paths.

use crate::persist::error::StorageError;
use futures::future::{BoxFuture, FutureExt};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// String-keyed durable storage with asynchronous access.
pub trait Storage: Send + Sync {
    fn get_item<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Option<String>, StorageError>>;

    fn set_item<'a>(&'a self, key: &'a str, value: String) -> BoxFuture<'a, Result<(), StorageError>>;

    fn remove_item<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<(), StorageError>>;
}

pub fn default_storage_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("clientstore")
        .join("storage")
}

/// Stores each key as `<root>/<escaped key>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Keys map to distinct file names: ASCII alphanumerics, `-` and `.` are
    /// kept, every other byte becomes `_xx` (lowercase hex).
    fn path_for(&self, key: &str) -> PathBuf {
        let mut safe_key = String::with_capacity(key.len());
        for byte in key.bytes() {
            if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'.' {
                safe_key.push(byte as char);
            } else {
                safe_key.push_str(&format!("_{:02x}", byte));
            }
        }
        self.root.join(format!("{}.json", safe_key))
    }
}

fn io_error(key: &str, source: io::Error) -> StorageError {
    StorageError::Io {
        key: key.to_string(),
        source,
    }
}

impl Storage for FileStorage {
    fn get_item<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Option<String>, StorageError>> {
        async move {
            match tokio::fs::read_to_string(self.path_for(key)).await {
                Ok(contents) => Ok(Some(contents)),
                Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
                Err(e) => Err(io_error(key, e)),
            }
        }
        .boxed()
    }

    fn set_item<'a>(&'a self, key: &'a str, value: String) -> BoxFuture<'a, Result<(), StorageError>> {
        async move {
            tokio::fs::create_dir_all(&self.root)
                .await
                .map_err(|e| io_error(key, e))?;
            // Readers never see a half-written record.
            let path = self.path_for(key);
            let tmp = path.with_extension("json.tmp");
            tokio::fs::write(&tmp, value)
                .await
                .map_err(|e| io_error(key, e))?;
            tokio::fs::rename(&tmp, &path)
                .await
                .map_err(|e| io_error(key, e))
        }
        .boxed()
    }

    fn remove_item<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<(), StorageError>> {
        async move {
            match tokio::fs::remove_file(self.path_for(key)).await {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(io_error(key, e)),
            }
        }
        .boxed()
    }
}

/// In-process storage. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
    unavailable: Arc<AtomicBool>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with [`StorageError::Unavailable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Synchronous peek at a stored value.
    pub fn snapshot(&self, key: &str) -> Option<String> {
        self.items.lock().ok()?.get(key).cloned()
    }

    fn with_items<T>(
        &self,
        f: impl FnOnce(&mut HashMap<String, String>) -> T,
    ) -> Result<T, StorageError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("memory storage switched off".into()));
        }
        let mut items = self
            .items
            .lock()
            .map_err(|_| StorageError::Unavailable("memory storage lock poisoned".into()))?;
        Ok(f(&mut items))
    }
}

impl Storage for MemoryStorage {
    fn get_item<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Option<String>, StorageError>> {
        let result = self.with_items(|items| items.get(key).cloned());
        futures::future::ready(result).boxed()
    }

    fn set_item<'a>(&'a self, key: &'a str, value: String) -> BoxFuture<'a, Result<(), StorageError>> {
        let result = self.with_items(|items| {
            items.insert(key.to_string(), value);
        });
        futures::future::ready(result).boxed()
    }

    fn remove_item<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<(), StorageError>> {
        let result = self.with_items(|items| {
            items.remove(key);
        });
        futures::future::ready(result).boxed()
    }
}
