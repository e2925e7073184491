//! Path handles over local filesystems and object storage
//!
//! A [`PathHandle`] is either a local filesystem path or a `(bucket, key)`
//! object location. Both expose the same operations (join, exists,
//! ensure_container, read_text, write_text), so callers never branch on the
//! backend. Handles are built by [`PathFactory`], which classifies raw input.

mod factory;
mod local;
mod object;

use std::fmt;

pub use factory::{PathFactory, PathInput};
pub use local::LocalPath;
pub use object::ObjectPath;

use crate::encoding::TextEncoding;
use crate::error::Result;
use crate::uri::has_gcs_scheme;

/// An immutable location on one of the two supported backends
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathHandle {
    /// Local filesystem path
    Local(LocalPath),
    /// Object-storage location
    Object(ObjectPath),
}

impl PathHandle {
    /// Check if this is a local path
    pub fn is_local(&self) -> bool {
        matches!(self, PathHandle::Local(_))
    }

    /// Check if this is an object-storage path
    pub fn is_object(&self) -> bool {
        matches!(self, PathHandle::Object(_))
    }

    /// Get the local path if this is a local path
    pub fn as_local(&self) -> Option<&LocalPath> {
        match self {
            PathHandle::Local(p) => Some(p),
            PathHandle::Object(_) => None,
        }
    }

    /// Get the object path if this is an object-storage path
    pub fn as_object(&self) -> Option<&ObjectPath> {
        match self {
            PathHandle::Object(p) => Some(p),
            PathHandle::Local(_) => None,
        }
    }

    /// Append one segment, returning a new handle of the same variant
    pub fn join(&self, segment: &str) -> Self {
        match self {
            PathHandle::Local(p) => PathHandle::Local(p.join(segment)),
            PathHandle::Object(p) => PathHandle::Object(p.join(segment)),
        }
    }

    /// Check whether the file or object currently exists
    pub async fn exists(&self) -> Result<bool> {
        match self {
            PathHandle::Local(p) => p.exists().await,
            PathHandle::Object(p) => p.exists().await,
        }
    }

    /// Make sure this location can hold children (`mkdir -p`)
    ///
    /// Idempotent. A no-op for object storage.
    pub async fn ensure_container(&self) -> Result<()> {
        match self {
            PathHandle::Local(p) => p.ensure_container().await,
            PathHandle::Object(p) => p.ensure_container().await,
        }
    }

    /// Read the whole content as UTF-8 text
    pub async fn read_text(&self) -> Result<String> {
        self.read_text_with(TextEncoding::default()).await
    }

    /// Read the whole content and decode it with `encoding`
    pub async fn read_text_with(&self, encoding: TextEncoding) -> Result<String> {
        match self {
            PathHandle::Local(p) => p.read_text_with(encoding).await,
            PathHandle::Object(p) => p.read_text_with(encoding).await,
        }
    }

    /// Write `content` as UTF-8, creating or overwriting
    pub async fn write_text(&self, content: &str) -> Result<()> {
        self.write_text_with(content, TextEncoding::default()).await
    }

    /// Write `content` encoded with `encoding`, creating or overwriting
    pub async fn write_text_with(&self, content: &str, encoding: TextEncoding) -> Result<()> {
        match self {
            PathHandle::Local(p) => p.write_text_with(content, encoding).await,
            PathHandle::Object(p) => p.write_text_with(content, encoding).await,
        }
    }
}

impl fmt::Display for PathHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathHandle::Local(p) => fmt::Display::fmt(p, f),
            PathHandle::Object(p) => fmt::Display::fmt(p, f),
        }
    }
}

/// Check whether a string is acceptable as either kind of path
///
/// Strings carrying the `gs://` scheme must satisfy the bucket/key grammar;
/// everything else is a valid local path. Never fails.
pub fn is_valid_path_string(path: &str) -> bool {
    if has_gcs_scheme(path) {
        ObjectPath::is_valid_path_string(path)
    } else {
        LocalPath::is_valid_path_string(path)
    }
}
