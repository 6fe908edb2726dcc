//! Error handlers
//!
//! Logging and status-code mapping for hosts that expose the adapter over HTTP.

use crate::error::types::StorageError;
use log::error;

/// Log a storage error
pub fn handle_error(err: &StorageError) {
    error!("Storage error: {}", err);
}

/// Convert error to an HTTP status code
pub fn error_to_status_code(err: &StorageError) -> u16 {
    match err {
        StorageError::BadRequest(_) => 400,
        StorageError::NotFound(_) => 404,
        StorageError::InternalServerError(_) => 500,
        StorageError::IoError(_) => 500,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_status_codes() {
        assert_eq!(error_to_status_code(&StorageError::BadRequest("x".into())), 400);
        assert_eq!(error_to_status_code(&StorageError::NotFound("x".into())), 404);
        assert_eq!(
            error_to_status_code(&StorageError::InternalServerError("x".into())),
            500
        );
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        assert_eq!(error_to_status_code(&StorageError::from(io_err)), 500);
    }

    #[test]
    fn test_only_not_found_is_not_found() {
        assert!(StorageError::NotFound("gone".into()).is_not_found());
        assert!(!StorageError::BadRequest("bad".into()).is_not_found());
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        assert!(!StorageError::from(io_err).is_not_found());
    }

    #[test]
    fn test_display_includes_detail() {
        let err = StorageError::NotFound("images/a.png".into());
        assert_eq!(err.to_string(), "Not found: images/a.png");
        handle_error(&err);
    }

    #[test]
    fn test_io_source_is_exposed() {
        use std::error::Error;

        let err = StorageError::from(io::Error::new(io::ErrorKind::Other, "disk full"));
        assert_eq!(err.source().map(|e| e.to_string()), Some("disk full".to_string()));
        assert!(StorageError::BadRequest("bad".into()).source().is_none());
    }
}
