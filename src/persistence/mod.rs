//! Key/value persistence for the high score
//!
//! Features:
//! - `KvStore` trait: integer values under string keys, with a time-to-live
//! - Cookie-backed store on the web (`cookie`)
//! - In-memory store for native runs and tests

pub mod cookie;

use std::collections::HashMap;

use thiserror::Error;

pub use cookie::{format_cookie, parse_cookie, parse_leading_int};
#[cfg(target_arch = "wasm32")]
pub use cookie::CookieStore;

/// Storage failures. None of these interrupt play.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage backend unavailable")]
    Unavailable,
    #[error("stored value for `{key}` is not an integer: {value:?}")]
    Malformed { key: String, value: String },
    #[error("storage rejected write for `{key}`")]
    WriteRejected { key: String },
}

/// Integer key/value store
pub trait KvStore {
    /// Read a value; `Ok(None)` when the key was never written (or expired)
    fn get(&self, key: &str) -> Result<Option<u64>, StorageError>;

    /// Write a value that expires after `ttl_days`
    fn set(&mut self, key: &str, value: u64, ttl_days: u32) -> Result<(), StorageError>;

    /// Read a value, treating missing keys and failures as 0
    fn get_or_zero(&self, key: &str) -> u64 {
        match self.get(key) {
            Ok(value) => value.unwrap_or(0),
            Err(e) => {
                log::warn!("Failed to read `{}`: {}", key, e);
                0
            }
        }
    }
}

/// Process-local store (native builds and tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, (u64, u32)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// TTL recorded for a key (days)
    pub fn ttl_days(&self, key: &str) -> Option<u32> {
        self.entries.get(key).map(|&(_, ttl)| ttl)
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<u64>, StorageError> {
        Ok(self.entries.get(key).map(|&(value, _)| value))
    }

    fn set(&mut self, key: &str, value: u64, ttl_days: u32) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), (value, ttl_days));
        Ok(())
    }
}
