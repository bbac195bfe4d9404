//! Durable key/value storage boundary.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use thiserror::Error;

/// Storage key for the opaque bearer token. Absent when logged out.
pub const AUTH_TOKEN_KEY: &str = "authToken";

/// Storage key for the serialized identity JSON. Absent when logged out.
pub const USER_KEY: &str = "user";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

/// Origin-scoped durable key/value store, shared across tabs of the origin
/// and surviving page reloads.
///
/// Implementations wrap whatever the platform provides. Keys and values are
/// plain strings; serialization happens above this boundary.
pub trait StorageBackend: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory backend.
///
/// Cloned handles share one underlying map, which models several tabs of the
/// same origin over one store. Used by tests and headless runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| StorageError::Unavailable("storage lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| StorageError::Unavailable("storage lock poisoned".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| StorageError::Unavailable("storage lock poisoned".to_string()))?;
        entries.remove(key);
        Ok(())
    }
}
