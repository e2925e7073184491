//! dpath-gcs: Google Cloud Storage adapter for dpath
//!
//! This crate provides the implementation of the ObjectStore trait
//! using the aws-sdk-s3 crate against the GCS XML API. It is the only
//! crate that directly depends on the AWS SDK.

pub mod client;

pub use client::GcsClient;
