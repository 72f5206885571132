//! HTTP handlers for the files service

pub mod handler;
pub mod types;

pub use handler::{configure_routes, FilesApiDoc};
pub use types::*;
