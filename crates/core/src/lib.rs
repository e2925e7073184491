//! dpath-core: Path handles over local filesystems and object storage
//!
//! This crate provides:
//! - `PathHandle`, one value type for local paths and `gs://bucket/key` objects
//! - `PathFactory`, which classifies raw input into the right handle
//! - The `ObjectStore` trait the object-storage variant talks to
//! - Text encodings and configuration management
//!
//! This crate is designed to be independent of any specific storage SDK,
//! allowing for easy testing and alternative backends.

pub mod config;
pub mod encoding;
pub mod error;
pub mod path;
pub mod traits;
pub mod uri;

pub use config::{Config, ConfigManager, StorageConfig, TimeoutConfig};
pub use encoding::TextEncoding;
pub use error::{Error, Result};
pub use path::{LocalPath, ObjectPath, PathFactory, PathHandle, PathInput, is_valid_path_string};
pub use traits::ObjectStore;
pub use uri::{GCS_SCHEME, parse_gcs_uri};
