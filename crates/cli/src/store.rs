//! Object store connected on first use
//!
//! Commands that only touch local paths never build the GCS client, so a
//! broken `[storage]` section cannot fail them.

use async_trait::async_trait;
use tokio::sync::OnceCell;

use dpath_core::{ObjectStore, Result, StorageConfig};
use dpath_gcs::GcsClient;

/// `ObjectStore` that creates its `GcsClient` on the first object request
#[derive(Debug)]
pub struct LazyGcsStore {
    config: StorageConfig,
    client: OnceCell<GcsClient>,
}

impl LazyGcsStore {
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            client: OnceCell::new(),
        }
    }

    /// Whether the client has been created yet
    pub fn is_connected(&self) -> bool {
        self.client.initialized()
    }

    async fn client(&self) -> Result<&GcsClient> {
        self.client
            .get_or_try_init(|| GcsClient::new(&self.config))
            .await
    }
}

#[async_trait]
impl ObjectStore for LazyGcsStore {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        self.client().await?.get_object(bucket, key).await
    }

    async fn put_object(&self, bucket: &str, key: &str, data: Vec<u8>) -> Result<()> {
        self.client().await?.put_object(bucket, key, data).await
    }

    async fn object_exists(&self, bucket: &str, key: &str) -> Result<bool> {
        self.client().await?.object_exists(bucket, key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dpath_core::Error;

    fn broken_config() -> StorageConfig {
        StorageConfig {
            endpoint: "ftp://example.com".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_does_not_connect() {
        let store = LazyGcsStore::new(broken_config());
        assert!(!store.is_connected());
    }

    #[tokio::test]
    async fn test_config_error_surfaces_on_first_request() {
        let store = LazyGcsStore::new(broken_config());

        let err = store.object_exists("my-bucket", "k").await.unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(!store.is_connected());
    }
}
