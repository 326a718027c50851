//! Key-value storage backends: RocksDB on disk, or an in-memory map

use crate::config::{StorageBackend, StorageConfig};
use crate::errors::{AppResult, StorageError};
use rocksdb::{Options, DB};
use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, RwLock},
};

/// Minimal durable key-value interface the player store persists through
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &[u8]) -> AppResult<Option<Vec<u8>>>;
    fn put(&self, key: &[u8], value: &[u8]) -> AppResult<()>;
    fn delete(&self, key: &[u8]) -> AppResult<()>;
}

/// RocksDB-backed storage
#[derive(Clone)]
pub struct RocksStorage {
    db: Arc<DB>,
}

impl RocksStorage {
    pub fn open<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        // one small record, rewritten on every change
        opts.set_write_buffer_size(4 * 1024 * 1024);
        opts.set_compression_type(rocksdb::DBCompressionType::Lz4);

        let db = DB::open(&opts, path.as_ref()).map_err(|e| {
            StorageError::DatabaseOpenFailed(format!("{}: {}", path.as_ref().display(), e))
        })?;
        Ok(Self { db: Arc::new(db) })
    }
}

impl KeyValueStore for RocksStorage {
    fn get(&self, key: &[u8]) -> AppResult<Option<Vec<u8>>> {
        self.db
            .get(key)
            .map_err(|e| StorageError::ReadFailed(e.to_string()).into())
    }

    fn put(&self, key: &[u8], value: &[u8]) -> AppResult<()> {
        self.db
            .put(key, value)
            .map_err(|e| StorageError::WriteFailed(e.to_string()).into())
    }

    fn delete(&self, key: &[u8]) -> AppResult<()> {
        self.db
            .delete(key)
            .map_err(|e| StorageError::WriteFailed(e.to_string()).into())
    }
}

/// Volatile storage. Clones share the same map.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<RwLock<HashMap<Vec<u8>, Vec<u8>>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned(what: &str) -> StorageError {
    StorageError::ReadFailed(format!("memory storage lock poisoned during {}", what))
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &[u8]) -> AppResult<Option<Vec<u8>>> {
        let entries = self.entries.read().map_err(|_| poisoned("get"))?;
        Ok(entries.get(key).cloned())
    }

    fn put(&self, key: &[u8], value: &[u8]) -> AppResult<()> {
        let mut entries = self.entries.write().map_err(|_| poisoned("put"))?;
        entries.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &[u8]) -> AppResult<()> {
        let mut entries = self.entries.write().map_err(|_| poisoned("delete"))?;
        entries.remove(key);
        Ok(())
    }
}

/// Open the backend named by the configuration
pub fn open_storage(config: &StorageConfig) -> AppResult<Arc<dyn KeyValueStore>> {
    match config.backend {
        StorageBackend::Rocksdb => {
            std::fs::create_dir_all(&config.data_directory)?;
            tracing::debug!(path = %config.data_directory, "Opening RocksDB storage");
            Ok(Arc::new(RocksStorage::open(&config.data_directory)?))
        }
        StorageBackend::Memory => Ok(Arc::new(MemoryStorage::new())),
    }
}
