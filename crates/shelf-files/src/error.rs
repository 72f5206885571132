//! Error types for the files service

use thiserror::Error;

/// Errors that can occur while talking to the object store
#[derive(Error, Debug)]
pub enum FilesError {
    #[error("object not found: {0}")]
    NotFound(String),

    #[error("store error: {0}")]
    Store(String),
}
