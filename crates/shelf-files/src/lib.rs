//! shelf-files: file browsing and download service over S3-compatible storage
//!
//! Enumerates the objects in a configured bucket with display-ready metadata
//! and streams individual objects back to HTTP callers.

pub mod error;
pub mod handlers;
pub mod services;

pub use error::FilesError;
pub use services::{FileService, ObjectStore, S3ObjectStore, StoreConfig};
