//! Key-value persistence
//!
//! Everything the game keeps between runs (leaderboard, settings) is a single
//! JSON string stored under a fixed key. Backends:
//! - `MemoryStorage`: in-process map (tests, ephemeral sessions)
//! - `FileStorage`: one file per key in a data directory

use std::collections::HashMap;

use thiserror::Error;

mod file;

pub use file::FileStorage;

/// Storage backend failure
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("invalid storage key {0:?}")]
    InvalidKey(String),
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A flat string key-value store
pub trait Storage {
    /// Read the value stored under `key` (None if absent)
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the value stored under `key`
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory storage
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
