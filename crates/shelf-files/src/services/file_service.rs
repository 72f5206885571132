//! File service: bucket enumeration and streaming download

use std::sync::Arc;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use futures::stream::BoxStream;
use serde::Serialize;
use tracing::debug;
use utoipa::ToSchema;

use super::metadata::{classify_type, format_size};
use super::store::ObjectStore;
use crate::error::FilesError;

/// Fallback content type for objects the store has no type for
const OCTET_STREAM: &str = "application/octet-stream";

/// One entry in a listing result
///
/// Built fresh on every enumeration; never cached across requests.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    /// Storage key of the object
    #[schema(example = "reports/q3.pdf")]
    pub name: String,
    /// Creation timestamp reported by the store; null when not reported
    #[schema(example = "2025-01-03T12:00:00Z")]
    pub created_on: Option<DateTime<Utc>>,
    /// Display size
    #[schema(example = "1.50 KB")]
    pub size: String,
    /// Category label derived from the name
    #[schema(example = "PDF")]
    #[serde(rename = "type")]
    pub kind: String,
}

/// An object resolved for download
pub struct FileDownload {
    /// Content type to send, defaulted when the store reports none
    pub content_type: String,
    /// Byte count reported by the store, if any
    pub content_length: Option<i64>,
    /// Object bytes, delivered incrementally
    pub body: BoxStream<'static, Result<Bytes, std::io::Error>>,
}

impl std::fmt::Debug for FileDownload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileDownload")
            .field("content_type", &self.content_type)
            .field("content_length", &self.content_length)
            .finish_non_exhaustive()
    }
}

/// File operations over a single configured bucket
pub struct FileService {
    store: Arc<dyn ObjectStore>,
}

impl FileService {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    /// List every object in the bucket with display metadata
    ///
    /// Drains all listing pages before returning; the result is never
    /// truncated to the first page. An empty bucket yields an empty vec.
    pub async fn list(&self) -> Result<Vec<FileRecord>, FilesError> {
        let mut records = Vec::new();
        let mut token = None;

        loop {
            let page = self.store.list_page(token).await?;

            records.extend(page.objects.into_iter().map(|obj| FileRecord {
                size: format_size(obj.size),
                kind: classify_type(&obj.key),
                name: obj.key,
                created_on: obj.last_modified,
            }));

            match page.next_token {
                Some(next) => token = Some(next),
                None => break,
            }
        }

        debug!("listed {} objects", records.len());

        Ok(records)
    }

    /// Resolve a named object to a byte stream plus content metadata
    pub async fn download(&self, name: &str) -> Result<FileDownload, FilesError> {
        let object = self.store.open(name).await?;

        debug!(
            "streaming {} ({} bytes)",
            name,
            object
                .content_length
                .map_or_else(|| "?".to_string(), |l| l.to_string())
        );

        Ok(FileDownload {
            content_type: object
                .content_type
                .unwrap_or_else(|| OCTET_STREAM.to_string()),
            content_length: object.content_length,
            body: object.body,
        })
    }
}
