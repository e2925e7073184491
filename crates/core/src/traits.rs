//! ObjectStore trait definition
//!
//! This trait defines the narrow client interface object paths need from a
//! remote object-storage service. It keeps dpath-core decoupled from any
//! specific SDK; authentication, pooling and retry policy belong to the
//! implementation.

use async_trait::async_trait;

use crate::error::Result;

/// Whole-object operations against an object-storage service
///
/// This trait is implemented by the GCS adapter and can be mocked for testing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Download the full body of an object
    ///
    /// Returns `Error::NotFound` if no object exists under `key`.
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>>;

    /// Upload `data` as the full body of an object, creating or overwriting it
    async fn put_object(&self, bucket: &str, key: &str, data: Vec<u8>) -> Result<()>;

    /// Check whether an object exists under exactly this key
    async fn object_exists(&self, bucket: &str, key: &str) -> Result<bool>;
}
