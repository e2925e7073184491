//! Local filesystem paths

use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::encoding::TextEncoding;
use crate::error::{Error, Result};

/// A path on the local filesystem
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocalPath {
    path: PathBuf,
}

impl LocalPath {
    /// Wrap a native path without normalizing it
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Every string is an acceptable local path
    pub fn is_valid_path_string(_path: &str) -> bool {
        true
    }

    /// Get the wrapped native path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a segment with a native path join
    pub fn join(&self, segment: impl AsRef<Path>) -> Self {
        Self {
            path: self.path.join(segment),
        }
    }

    /// Check whether anything exists at this path
    pub async fn exists(&self) -> Result<bool> {
        let exists = tokio::fs::try_exists(&self.path).await?;
        tracing::debug!(path = %self.path.display(), exists, "checked local path");
        Ok(exists)
    }

    /// Create this directory and any missing ancestors (`mkdir -p`)
    pub async fn ensure_container(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.path).await?;
        tracing::debug!(path = %self.path.display(), "ensured local directory");
        Ok(())
    }

    /// Read the whole file and decode it
    pub async fn read_text_with(&self, encoding: TextEncoding) -> Result<String> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                Error::NotFound(self.path.display().to_string())
            } else {
                Error::Io(e)
            }
        })?;
        tracing::debug!(
            path = %self.path.display(),
            bytes = bytes.len(),
            %encoding,
            "read local file"
        );
        encoding.decode(&bytes)
    }

    /// Encode `content` and write it, creating or truncating the file
    ///
    /// Parent directories must already exist.
    pub async fn write_text_with(&self, content: &str, encoding: TextEncoding) -> Result<()> {
        let bytes = encoding.encode(content)?;
        let len = bytes.len();
        tokio::fs::write(&self.path, bytes).await?;
        tracing::debug!(path = %self.path.display(), bytes = len, %encoding, "wrote local file");
        Ok(())
    }
}

impl fmt::Display for LocalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}
