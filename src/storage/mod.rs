//! Storage module for persisting captured artifacts
//!
//! This module writes captured resources into the output directory tree and
//! owns the claimed-paths set that suppresses duplicate writes across
//! concurrent network exchanges.

mod store;

pub use store::ResourceStore;

use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Refusing unsafe relative path: {0}")]
    UnsafePath(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
