//! Store connection configuration

use serde::{Deserialize, Serialize};

/// Default region for S3-compatible stores that ignore it (MinIO, RustFS)
pub const DEFAULT_REGION: &str = "us-east-1";

/// Connection settings for the object store
///
/// Built once at startup and passed into the store client; never read from
/// process globals inside the services.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Endpoint URL of the S3-compatible store (e.g. "http://localhost:9000")
    pub endpoint: String,

    /// Region name
    pub region: String,

    /// Access key id
    pub access_key: String,

    /// Secret access key
    pub secret_key: String,

    /// Bucket holding the files served by this instance
    pub bucket: String,
}

impl StoreConfig {
    pub fn new(
        endpoint: String,
        access_key: String,
        secret_key: String,
        bucket: String,
    ) -> Self {
        Self {
            endpoint,
            region: DEFAULT_REGION.to_string(),
            access_key,
            secret_key,
            bucket,
        }
    }

    /// Override the region (MinIO/RustFS accept any value here)
    pub fn with_region(mut self, region: String) -> Self {
        self.region = region;
        self
    }
}
