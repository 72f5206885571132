//! Services for file browsing and download

mod config;
mod file_service;
pub mod metadata;
mod store;

pub use config::StoreConfig;
pub use file_service::{FileDownload, FileRecord, FileService};
pub use store::{ObjectDownload, ObjectPage, ObjectStore, ObjectSummary, S3ObjectStore};
