//! Injectable key-value storage for session and cache persistence.
//!
//! This module provides:
//! - `StorageBackend`: the storage capability trait
//! - `MemoryStore`: in-memory backend for tests and ephemeral use
//! - `FileStore`: JSON document persisted under the cache directory
//! - `KeychainStore`: OS keychain backend via keyring
//!
//! `set_many`/`remove_many` are the unit-write operations: the file backend
//! lands all entries in a single document write, so a multi-key record
//! (e.g. the four session keys) is never observed half-written.

pub mod file;
pub mod keychain;
pub mod memory;

pub use file::FileStore;
pub use keychain::KeychainStore;
pub use memory::MemoryStore;

use anyhow::Result;

/// Key-value storage capability.
///
/// Values are strings; structured values are JSON-serialized before storage
/// and JSON-parsed on read by the callers.
pub trait StorageBackend: Send + Sync {
    /// Look up a value, `None` if the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store a single value, overwriting any prior one.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a key. Removing an absent key succeeds silently.
    fn remove(&self, key: &str) -> Result<()>;

    /// Store several entries as one logical unit.
    fn set_many(&self, entries: &[(&str, &str)]) -> Result<()>;

    /// Remove several keys as one logical unit.
    fn remove_many(&self, keys: &[&str]) -> Result<()>;
}
