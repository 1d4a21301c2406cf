//! `DraftStore` trait — the local key-value storage the form writes to.

use async_trait::async_trait;

use crate::error::StorageError;

/// Durable string key-value storage, the local-storage equivalent.
///
/// Values are stored raw; parsing them is the caller's concern so that a
/// corrupt record can be told apart from a storage failure.
#[async_trait]
pub trait DraftStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Insert or replace the value stored under `key`.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Returns whether anything was removed.
    async fn remove(&self, key: &str) -> Result<bool, StorageError>;
}
