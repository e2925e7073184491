//! Error types for dpath-core
//!
//! Provides a unified error type that can be converted to appropriate exit codes.

use thiserror::Error;

/// Result type alias for dpath-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for dpath-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// A string looks like an object-storage URI but fails the bucket/key grammar
    #[error("Invalid path: {0}")]
    Validation(String),

    /// File or object does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Content bytes are not valid in the requested encoding
    #[error("Decode error: {0}")]
    Decode(String),

    /// Text cannot be represented in the requested encoding
    #[error("Encode error: {0}")]
    Encode(String),

    /// Requested feature is not implemented
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// URL parsing error
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Authentication or permission failure reported by the object store
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Network error talking to the object store
    #[error("Network error: {0}")]
    Network(String),
}

impl Error {
    /// Get the appropriate exit code for this error
    pub const fn exit_code(&self) -> i32 {
        match self {
            Error::Validation(_) | Error::Config(_) | Error::InvalidUrl(_) => 2, // UsageError
            Error::Network(_) => 3,                                              // NetworkError
            Error::Auth(_) => 4,                                                 // AuthError
            Error::NotFound(_) => 5,                                             // NotFound
            Error::Unsupported(_) => 7, // UnsupportedFeature
            _ => 1,                     // GeneralError
        }
    }
}
