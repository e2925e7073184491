//! Object-storage URI grammar
//!
//! Recognizes strings of the form `gs://<bucket>/<key>` and splits them into
//! bucket and key. Everything else in the crate treats this module as the
//! single authority on what a remote path looks like.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

/// URI scheme prefix that marks an object-storage path
pub const GCS_SCHEME: &str = "gs://";

/// Bucket: 3-63 chars, lowercase letters, digits, `.`, `_`, `-`, alphanumeric at both ends.
/// Key: zero or more non-empty segments without whitespace, optional trailing slash.
static GCS_URI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^gs://(?P<bucket>[a-z0-9][a-z0-9._-]{1,61}[a-z0-9])/(?P<key>(?:[^/\s]+/)*[^/\s]*)$",
    )
    .expect("GCS URI pattern is valid")
});

/// Returns true if the string carries the object-storage scheme prefix
pub fn has_gcs_scheme(path: &str) -> bool {
    path.starts_with(GCS_SCHEME)
}

/// Validate a `gs://` URI and extract `(bucket, key)`
///
/// A trailing slash on the key is dropped, so `gs://bucket/dir/` yields key `dir`.
pub fn parse_gcs_uri(path: &str) -> Result<(String, String)> {
    let caps = GCS_URI.captures(path).ok_or_else(|| {
        Error::Validation(format!(
            "{path}. Expected: gs://bucket/path/to/object"
        ))
    })?;

    let bucket = caps["bucket"].to_string();
    let key = caps["key"].trim_end_matches('/').to_string();
    Ok((bucket, key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_object_uri() {
        let (bucket, key) = parse_gcs_uri("gs://my-bucket/runs/1/out.json").unwrap();
        assert_eq!(bucket, "my-bucket");
        assert_eq!(key, "runs/1/out.json");
    }

    #[test]
    fn test_parse_bucket_root() {
        let (bucket, key) = parse_gcs_uri("gs://my-bucket/").unwrap();
        assert_eq!(bucket, "my-bucket");
        assert_eq!(key, "");
    }

    #[test]
    fn test_parse_trailing_slash() {
        let (_, key) = parse_gcs_uri("gs://my-bucket/runs/1/").unwrap();
        assert_eq!(key, "runs/1");
    }

    #[test]
    fn test_reject_malformed() {
        for bad in [
            "gs://",
            "gs://my-bucket",
            "gs://ab/key",
            "gs://Upper/key",
            "gs://-bucket/key",
            "gs://bucket-/key",
            "gs://my-bucket//double",
            "gs://my-bucket/a//b",
            "gs://my-bucket/has space",
        ] {
            let err = parse_gcs_uri(bad).unwrap_err();
            assert!(matches!(err, Error::Validation(_)), "{bad} should fail");
        }
    }

    #[test]
    fn test_error_carries_input() {
        let err = parse_gcs_uri("gs://").unwrap_err();
        assert!(err.to_string().contains("gs://"));
    }

    #[test]
    fn test_scheme_detection() {
        assert!(has_gcs_scheme("gs://bucket/key"));
        assert!(!has_gcs_scheme("/tmp/gs://x"));
        assert!(!has_gcs_scheme("s3://bucket/key"));
    }
}
