//! Object-storage paths
//!
//! Object stores have a flat key namespace; hierarchy is simulated by
//! slash-delimited keys. An `ObjectPath` keeps its key in that canonical form:
//! segments joined with `/`, no leading slash, no empty segments.

use std::fmt;
use std::sync::Arc;

use crate::encoding::TextEncoding;
use crate::error::{Error, Result};
use crate::traits::ObjectStore;
use crate::uri::{GCS_SCHEME, has_gcs_scheme, parse_gcs_uri};

/// A `(bucket, key)` location in an object store, bound to the client that serves it
#[derive(Clone)]
pub struct ObjectPath {
    bucket: String,
    key: String,
    store: Arc<dyn ObjectStore>,
}

impl ObjectPath {
    /// Create an object path
    ///
    /// The key is split on `/` and `\` like [`ObjectPath::join`] splits its
    /// segment, and empty components are dropped. Fails if `bucket` is empty.
    pub fn new(
        bucket: impl Into<String>,
        key: impl AsRef<str>,
        store: Arc<dyn ObjectStore>,
    ) -> Result<Self> {
        let bucket = bucket.into();
        if bucket.is_empty() {
            return Err(Error::Validation("Bucket name cannot be empty".into()));
        }

        let key = key
            .as_ref()
            .split(['/', '\\'])
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("/");

        Ok(Self { bucket, key, store })
    }

    /// True only for `gs://` strings that satisfy the bucket/key grammar
    pub fn is_valid_path_string(path: &str) -> bool {
        has_gcs_scheme(path) && parse_gcs_uri(path).is_ok()
    }

    /// Bucket name
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Object key (empty for the bucket root)
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Append a segment to the key
    ///
    /// The segment is split like a native path (`/` and `\` both separate,
    /// `.` and empty components vanish) and the result is serialized back to
    /// slash-delimited form. A segment starting with a separator replaces the
    /// key, as an absolute component does in a native join.
    pub fn join(&self, segment: &str) -> Self {
        let base = if segment.starts_with(['/', '\\']) {
            ""
        } else {
            self.key.as_str()
        };

        let key = base
            .split('/')
            .chain(segment.split(['/', '\\']))
            .filter(|s| !s.is_empty() && *s != ".")
            .collect::<Vec<_>>()
            .join("/");

        Self {
            bucket: self.bucket.clone(),
            key,
            store: Arc::clone(&self.store),
        }
    }

    /// True for the bucket root, which has no object of its own
    fn is_bucket_root(&self) -> bool {
        self.key.is_empty()
    }

    /// Check whether an object exists under exactly this key
    ///
    /// The bucket root never holds an object.
    pub async fn exists(&self) -> Result<bool> {
        if self.is_bucket_root() {
            return Ok(false);
        }
        let exists = self.store.object_exists(&self.bucket, &self.key).await?;
        tracing::debug!(bucket = %self.bucket, key = %self.key, exists, "checked object");
        Ok(exists)
    }

    /// No-op: object stores have no directories, any key can be written directly
    pub async fn ensure_container(&self) -> Result<()> {
        tracing::debug!(bucket = %self.bucket, key = %self.key, "no container needed for object");
        Ok(())
    }

    /// Download the whole object and decode it
    pub async fn read_text_with(&self, encoding: TextEncoding) -> Result<String> {
        if self.is_bucket_root() {
            return Err(Error::NotFound(self.to_string()));
        }
        let bytes = self.store.get_object(&self.bucket, &self.key).await?;
        tracing::debug!(
            bucket = %self.bucket,
            key = %self.key,
            bytes = bytes.len(),
            %encoding,
            "downloaded object"
        );
        encoding.decode(&bytes)
    }

    /// Encode `content` and upload it, creating or overwriting the object
    pub async fn write_text_with(&self, content: &str, encoding: TextEncoding) -> Result<()> {
        if self.is_bucket_root() {
            return Err(Error::Validation(format!(
                "{self}. Cannot write to a bucket root, join an object name first"
            )));
        }
        let bytes = encoding.encode(content)?;
        let len = bytes.len();
        self.store.put_object(&self.bucket, &self.key, bytes).await?;
        tracing::debug!(
            bucket = %self.bucket,
            key = %self.key,
            bytes = len,
            %encoding,
            "uploaded object"
        );
        Ok(())
    }
}

impl PartialEq for ObjectPath {
    fn eq(&self, other: &Self) -> bool {
        self.bucket == other.bucket && self.key == other.key
    }
}

impl Eq for ObjectPath {}

impl fmt::Debug for ObjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectPath")
            .field("bucket", &self.bucket)
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for ObjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{GCS_SCHEME}{}/{}", self.bucket, self.key)
    }
}
