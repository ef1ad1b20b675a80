//! Read-only object storage used by the listing aggregator.
//!
//! Keys are `/`-separated paths inside a bucket, the way S3 lays them out.

mod local;
#[cfg(test)]
mod memory;

pub use local::LocalObjectStore;
#[cfg(test)]
pub use memory::MemoryObjectStore;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::errors::ServerError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("object not found: {bucket}/{key}")]
    NotFound { bucket: String, key: String },
    #[error("invalid object key: {0}")]
    InvalidKey(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StoreError> for ServerError {
    fn from(e: StoreError) -> Self {
        ServerError::Storage(e.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectMeta {
    pub key: String,
    pub last_modified: DateTime<Utc>,
}

pub trait ObjectStore: Send + Sync {
    fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StoreError>;

    fn list(&self, bucket: &str, prefix: &str) -> Result<Vec<ObjectMeta>, StoreError>;
}

/// The most recently modified object under `prefix`, if any.
pub fn latest_object(
    store: &dyn ObjectStore,
    bucket: &str,
    prefix: &str,
) -> Result<Option<ObjectMeta>, StoreError> {
    let mut objects = store.list(bucket, prefix)?;
    // Stable sort: among equal timestamps the last listed key wins.
    objects.sort_by_key(|o| o.last_modified);
    Ok(objects.pop())
}
