//! Google Cloud Storage client implementation
//!
//! Talks to the GCS XML API through its S3 interoperability layer using
//! aws-sdk-s3, and implements the ObjectStore trait from dpath-core. Any
//! S3-compatible endpoint works the same way.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::config::http::HttpResponse;
use aws_sdk_s3::config::{RequestChecksumCalculation, ResponseChecksumValidation};
use aws_sdk_s3::error::{DisplayErrorContext, SdkError};
use aws_smithy_types::retry::RetryConfig;
use aws_smithy_types::timeout::TimeoutConfig as SdkTimeoutConfig;

use dpath_core::{Error, ObjectStore, Result, StorageConfig};

/// GCS client wrapper
#[derive(Debug, Clone)]
pub struct GcsClient {
    inner: aws_sdk_s3::Client,
}

impl GcsClient {
    /// Create a new client from storage configuration
    ///
    /// No request is sent here. Credentials come from the configured HMAC
    /// key pair, or from the SDK default chain when none is configured.
    pub async fn new(config: &StorageConfig) -> Result<Self> {
        config.validate()?;

        let timeout = config.timeout_config();
        let sdk_timeout = SdkTimeoutConfig::builder()
            .connect_timeout(Duration::from_millis(timeout.connect_ms))
            .operation_timeout(Duration::from_millis(timeout.operation_ms))
            .build();

        // Failures surface to the caller immediately; no retry at this layer.
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()))
            .endpoint_url(&config.endpoint)
            .retry_config(RetryConfig::disabled())
            .timeout_config(sdk_timeout);

        if let Some((access_key, secret_key)) = config.static_credentials() {
            let credentials = aws_credential_types::Credentials::new(
                access_key,
                secret_key,
                None, // session token
                None, // expiry
                "dpath-static-credentials",
            );
            loader = loader.credentials_provider(credentials);
        }

        let sdk_config = loader.load().await;

        // The GCS XML API rejects the flexible-checksum trailers newer SDKs send by default.
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.force_path_style)
            .request_checksum_calculation(RequestChecksumCalculation::WhenRequired)
            .response_checksum_validation(ResponseChecksumValidation::WhenRequired)
            .build();

        tracing::debug!(
            endpoint = %config.endpoint,
            region = %config.region,
            path_style = config.force_path_style,
            static_credentials = config.static_credentials().is_some(),
            "created object storage client"
        );

        Ok(Self {
            inner: aws_sdk_s3::Client::from_conf(s3_config),
        })
    }

    /// Get the underlying aws-sdk-s3 client
    pub fn inner(&self) -> &aws_sdk_s3::Client {
        &self.inner
    }
}

#[async_trait]
impl ObjectStore for GcsClient {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        let response = self
            .inner
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| map_sdk_error(e, bucket, key))?;

        let data = response
            .body
            .collect()
            .await
            .map_err(|e| Error::Network(e.to_string()))?
            .into_bytes()
            .to_vec();

        tracing::debug!(%bucket, %key, bytes = data.len(), "get object");
        Ok(data)
    }

    async fn put_object(&self, bucket: &str, key: &str, data: Vec<u8>) -> Result<()> {
        let size = data.len();
        let body = aws_sdk_s3::primitives::ByteStream::from(data);

        self.inner
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(body)
            .send()
            .await
            .map_err(|e| map_sdk_error(e, bucket, key))?;

        tracing::debug!(%bucket, %key, bytes = size, "put object");
        Ok(())
    }

    async fn object_exists(&self, bucket: &str, key: &str) -> Result<bool> {
        match self.inner.head_object().bucket(bucket).key(key).send().await {
            Ok(_) => Ok(true),
            Err(e) if e.as_service_error().is_some_and(|se| se.is_not_found()) => Ok(false),
            Err(e) => match map_sdk_error(e, bucket, key) {
                Error::NotFound(_) => Ok(false),
                other => Err(other),
            },
        }
    }
}

/// Convert an SDK failure into a dpath error for the object at `bucket/key`
fn map_sdk_error<E>(err: SdkError<E, HttpResponse>, bucket: &str, key: &str) -> Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    let status = err.raw_response().map(|r| r.status().as_u16());
    let detail = DisplayErrorContext(&err).to_string();
    classify(status, &detail, &format!("gs://{bucket}/{key}"))
}

/// Classify a failed request by HTTP status and error text
fn classify(status: Option<u16>, detail: &str, location: &str) -> Error {
    const NOT_FOUND: [&str; 3] = ["NoSuchKey", "NoSuchBucket", "NotFound"];
    const AUTH: [&str; 4] = [
        "AccessDenied",
        "InvalidAccessKeyId",
        "SignatureDoesNotMatch",
        "Forbidden",
    ];

    if status == Some(404) || NOT_FOUND.iter().any(|code| detail.contains(code)) {
        Error::NotFound(location.to_string())
    } else if matches!(status, Some(401 | 403)) || AUTH.iter().any(|code| detail.contains(code)) {
        Error::Auth(format!("{location}: {detail}"))
    } else {
        Error::Network(detail.to_string())
    }
}
