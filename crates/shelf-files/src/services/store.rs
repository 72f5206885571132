//! Object store abstraction with an S3/MinIO implementation

use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_sdk_s3::config::{Credentials, Region, SharedCredentialsProvider};
use aws_sdk_s3::Client;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use futures::stream::BoxStream;
use tracing::debug;

use super::config::StoreConfig;
use crate::error::FilesError;

/// One object as reported by a listing page
#[derive(Debug, Clone)]
pub struct ObjectSummary {
    /// Storage key
    pub key: String,
    /// Timestamp reported by the store, if any
    pub last_modified: Option<DateTime<Utc>>,
    /// Size in bytes reported by the store, if any
    pub size: Option<i64>,
}

/// A single page of a listing
#[derive(Debug, Clone)]
pub struct ObjectPage {
    /// Objects on this page
    pub objects: Vec<ObjectSummary>,
    /// Continuation token for the next page, absent on the last page
    pub next_token: Option<String>,
}

/// An opened object ready to stream
pub struct ObjectDownload {
    /// Content type reported by the store, if any
    pub content_type: Option<String>,
    /// Size in bytes reported by the store, if any
    pub content_length: Option<i64>,
    /// Object bytes, delivered incrementally
    pub body: BoxStream<'static, Result<Bytes, std::io::Error>>,
}

/// Access to a remote object store, one bucket per instance
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch one listing page, continuing from `token` when given
    async fn list_page(&self, token: Option<String>) -> Result<ObjectPage, FilesError>;

    /// Open a named object for reading
    async fn open(&self, key: &str) -> Result<ObjectDownload, FilesError>;
}

/// S3-backed object store (AWS S3, MinIO, RustFS)
pub struct S3ObjectStore {
    client: Client,
    bucket: String,
}

impl S3ObjectStore {
    /// Build a client for the configured endpoint
    ///
    /// Path-style addressing is forced so that MinIO-style endpoints resolve
    /// without per-bucket DNS.
    pub async fn connect(config: &StoreConfig) -> Self {
        let credentials = Credentials::new(
            &config.access_key,
            &config.secret_key,
            None,
            None,
            "shelf-files",
        );
        let region_provider = RegionProviderChain::first_try(Region::new(config.region.clone()));

        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(region_provider)
            .credentials_provider(SharedCredentialsProvider::new(credentials))
            .endpoint_url(&config.endpoint)
            .load()
            .await;

        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(true)
            .build();

        Self {
            client: Client::from_conf(s3_config),
            bucket: config.bucket.clone(),
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn list_page(&self, token: Option<String>) -> Result<ObjectPage, FilesError> {
        debug!("LIST bucket={}", self.bucket);

        let mut request = self.client.list_objects_v2().bucket(&self.bucket);

        if let Some(token) = token {
            request = request.continuation_token(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| FilesError::Store(e.to_string()))?;

        let objects = response
            .contents()
            .iter()
            .filter_map(|obj| {
                let key = obj.key()?;

                Some(ObjectSummary {
                    key: key.to_string(),
                    last_modified: obj.last_modified().and_then(|dt| {
                        DateTime::parse_from_rfc3339(&dt.to_string())
                            .ok()
                            .map(|d| d.with_timezone(&Utc))
                    }),
                    size: obj.size(),
                })
            })
            .collect();

        let next_token = if response.is_truncated().unwrap_or(false) {
            response.next_continuation_token().map(|s| s.to_string())
        } else {
            None
        };

        Ok(ObjectPage {
            objects,
            next_token,
        })
    }

    async fn open(&self, key: &str) -> Result<ObjectDownload, FilesError> {
        debug!("GET {}", key);

        let response = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                if e.to_string().contains("NoSuchKey") || e.to_string().contains("404") {
                    FilesError::NotFound(key.to_string())
                } else {
                    FilesError::Store(e.to_string())
                }
            })?;

        let content_type = response.content_type().map(|s| s.to_string());
        let content_length = response.content_length();

        // Stream the body as it arrives from the store; objects may be
        // arbitrarily large and are never buffered whole.
        let reader = response.body.into_async_read();
        let body = Box::pin(tokio_util::io::ReaderStream::new(reader));

        Ok(ObjectDownload {
            content_type,
            content_length,
            body,
        })
    }
}
