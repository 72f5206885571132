//! Request and response types for the files HTTP handlers

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::services::{FileRecord, FileService};

/// Application state for file handlers
pub struct FilesAppState {
    pub file_service: Arc<FileService>,
}

/// Query parameters for a download request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct DownloadQuery {
    /// Name of the object to download
    #[schema(example = "reports/q3.pdf")]
    pub file: Option<String>,
}

/// Response for a successful listing request
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListFilesResponse {
    /// All objects in the bucket with display metadata
    pub files: Vec<FileRecord>,
}

/// Error body emitted by the listing endpoint
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListFilesErrorResponse {
    /// Generic description of the failure
    #[schema(example = "Failed to fetch files.")]
    pub error: String,
}
