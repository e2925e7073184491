//! Classification of raw path input into handles

use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{LocalPath, ObjectPath, PathHandle};
use crate::error::Result;
use crate::traits::ObjectStore;
use crate::uri::{has_gcs_scheme, parse_gcs_uri};

/// Raw input accepted by [`PathFactory::create`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathInput<'a> {
    /// A value already typed as a native path; never parsed
    Local(Cow<'a, Path>),
    /// An opaque string to classify
    Text(Cow<'a, str>),
}

impl<'a> From<&'a Path> for PathInput<'a> {
    fn from(path: &'a Path) -> Self {
        PathInput::Local(Cow::Borrowed(path))
    }
}

impl<'a> From<&'a PathBuf> for PathInput<'a> {
    fn from(path: &'a PathBuf) -> Self {
        PathInput::Local(Cow::Borrowed(path.as_path()))
    }
}

impl From<PathBuf> for PathInput<'_> {
    fn from(path: PathBuf) -> Self {
        PathInput::Local(Cow::Owned(path))
    }
}

impl<'a> From<&'a str> for PathInput<'a> {
    fn from(path: &'a str) -> Self {
        PathInput::Text(Cow::Borrowed(path))
    }
}

impl<'a> From<&'a String> for PathInput<'a> {
    fn from(path: &'a String) -> Self {
        PathInput::Text(Cow::Borrowed(path.as_str()))
    }
}

impl From<String> for PathInput<'_> {
    fn from(path: String) -> Self {
        PathInput::Text(Cow::Owned(path))
    }
}

/// Builds [`PathHandle`]s, binding object paths to a shared store client
#[derive(Clone)]
pub struct PathFactory {
    store: Arc<dyn ObjectStore>,
}

impl PathFactory {
    /// Create a factory whose object paths talk to `store`
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    /// Classify `input` and build the matching handle
    ///
    /// Order matters: typed local paths are taken as-is, then strings with the
    /// `gs://` scheme must parse as bucket/key (or fail with
    /// `Error::Validation`), and anything else is a local path. Performs no I/O.
    pub fn create<'a>(&self, input: impl Into<PathInput<'a>>) -> Result<PathHandle> {
        match input.into() {
            PathInput::Local(path) => Ok(PathHandle::Local(LocalPath::new(path.into_owned()))),
            PathInput::Text(text) if has_gcs_scheme(&text) => {
                let (bucket, key) = parse_gcs_uri(&text)?;
                tracing::debug!(%bucket, %key, "classified object path");
                let object = ObjectPath::new(bucket, key, Arc::clone(&self.store))?;
                Ok(PathHandle::Object(object))
            }
            PathInput::Text(text) => Ok(PathHandle::Local(LocalPath::new(text.into_owned()))),
        }
    }
}

impl fmt::Debug for PathFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathFactory").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::traits::MockObjectStore;

    fn factory() -> PathFactory {
        // No expectations: classification must never call the store.
        PathFactory::new(Arc::new(MockObjectStore::new()))
    }

    #[test]
    fn test_create_local_from_string() {
        let handle = factory().create("/tmp/workdir/report.txt").unwrap();
        assert!(handle.is_local());
        assert_eq!(
            handle.as_local().unwrap().path(),
            Path::new("/tmp/workdir/report.txt")
        );
    }

    #[test]
    fn test_create_object_from_uri() {
        let handle = factory().create("gs://my-bucket/runs/1/out.json").unwrap();
        let object = handle.as_object().unwrap();
        assert_eq!(object.bucket(), "my-bucket");
        assert_eq!(object.key(), "runs/1/out.json");
    }

    #[test]
    fn test_create_object_backslash_key_matches_join() {
        let f = factory();
        let parsed = f.create("gs://my-bucket/runs\\1").unwrap();
        let joined = f.create("gs://my-bucket/").unwrap().join("runs\\1");
        assert_eq!(parsed.as_object().unwrap().key(), "runs/1");
        assert_eq!(parsed, joined);
    }

    #[test]
    fn test_create_invalid_uri_fails() {
        let err = factory().create("gs://").unwrap_err();
        assert!(matches!(err, Error::Validation(ref s) if s.contains("gs://")));

        let err = factory().create(String::from("gs://UPPER/key")).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_typed_local_path_is_never_parsed() {
        // Looks like a URI, but the caller said it is a local path.
        let typed = PathBuf::from("gs://my-bucket/key");
        let handle = factory().create(&typed).unwrap();
        assert!(handle.is_local());

        let handle = factory().create(Path::new("gs://")).unwrap();
        assert!(handle.is_local());
    }

    #[test]
    fn test_other_schemes_are_local() {
        let handle = factory().create("s3://bucket/key").unwrap();
        assert!(handle.is_local());
    }

    #[test]
    fn test_relative_strings_are_local() {
        let handle = factory().create("report.txt").unwrap();
        assert_eq!(handle.as_local().unwrap().path(), Path::new("report.txt"));
    }
}
