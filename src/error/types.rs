//! Error types
//!
//! Defines the error taxonomy shared by the directory and file managers.

use std::fmt;
use std::io;

/// Storage adapter errors
#[derive(Debug)]
pub enum StorageError {
    /// Malformed input rejected before any I/O
    BadRequest(String),
    /// The resolved path did not exist at the time of the check
    NotFound(String),
    /// An operation that should have produced a result produced none
    InternalServerError(String),
    /// Unclassified error propagated unchanged from the OS
    IoError(io::Error),
}

impl StorageError {
    /// True only for `NotFound`, the expected outcome of a list/remove race
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound(_))
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            StorageError::NotFound(p) => write!(f, "Not found: {}", p),
            StorageError::InternalServerError(msg) => write!(f, "Internal server error: {}", msg),
            StorageError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(error: io::Error) -> Self {
        StorageError::IoError(error)
    }
}
