//! Path validation
//!
//! Rejects malformed input at the boundary, before any I/O, and maps public
//! locators back to logical paths.

use crate::error::StorageError;
use crate::storage::filesystem::absolute;
use std::path::{Path, PathBuf};

/// Validate a logical path (relative to the root)
pub fn validate_logical_path(path: &str) -> Result<(), StorageError> {
    if path.contains('\0') {
        return Err(StorageError::BadRequest(
            "Path must not contain NUL bytes".into(),
        ));
    }
    Ok(())
}

/// Validate a file name: one non-empty path segment
pub fn validate_file_name(name: &str) -> Result<(), StorageError> {
    if name.is_empty() {
        return Err(StorageError::BadRequest("File name cannot be empty".into()));
    }
    if name == "." || name == ".." {
        return Err(StorageError::BadRequest(format!(
            "Invalid file name: {}",
            name
        )));
    }
    if name.contains('\0') || name.chars().any(std::path::is_separator) {
        return Err(StorageError::BadRequest(format!(
            "File name must be a single path segment: {}",
            name
        )));
    }
    Ok(())
}

/// Join a logical path under `root`, refusing anything that escapes it.
///
/// `root` must already be absolute. Leading separators are ignored, so
/// `/images` and `images` name the same directory.
pub fn resolve_under_root(root: &Path, logical: &str) -> Result<PathBuf, StorageError> {
    validate_logical_path(logical)?;

    let relative = logical.trim_start_matches(std::path::is_separator);
    let resolved = absolute(&root.join(relative))?;

    if !resolved.starts_with(root) {
        return Err(StorageError::BadRequest(format!(
            "Path escapes the root directory: {}",
            logical
        )));
    }
    Ok(resolved)
}

/// Map a locator to a logical path.
///
/// A locator is either a logical path or a public URL of the form
/// `{public_host}/{root_name}/{dir}/{name}`; for URLs the host and the root
/// segment are stripped. Anything else is returned unchanged.
pub fn locator_to_logical<'a>(locator: &'a str, public_host: &str, root_name: &str) -> &'a str {
    let Some(rest) = locator.strip_prefix(public_host) else {
        return locator;
    };
    if !(rest.is_empty() || rest.starts_with('/')) {
        return locator;
    }

    let rest = rest.trim_start_matches('/');
    if rest == root_name {
        return "";
    }
    match rest.strip_prefix(root_name) {
        Some(tail) if tail.starts_with('/') => tail.trim_start_matches('/'),
        _ => rest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOST: &str = "http://localhost:3030";

    #[test]
    fn test_file_names() {
        assert!(validate_file_name("one.png").is_ok());
        assert!(validate_file_name(".bashrc").is_ok());
        assert!(validate_file_name("").is_err());
        assert!(validate_file_name("..").is_err());
        assert!(validate_file_name("a/b.png").is_err());
        assert!(validate_file_name("a\0b").is_err());
    }

    #[test]
    fn test_resolve_under_root() {
        let root = Path::new("/srv/uploads");
        assert_eq!(
            resolve_under_root(root, "images").unwrap(),
            PathBuf::from("/srv/uploads/images")
        );
        assert_eq!(
            resolve_under_root(root, "/images/./2024").unwrap(),
            PathBuf::from("/srv/uploads/images/2024")
        );
        assert_eq!(resolve_under_root(root, "").unwrap(), root);
    }

    #[test]
    fn test_resolve_rejects_escape() {
        let root = Path::new("/srv/uploads");
        let err = resolve_under_root(root, "../etc").unwrap_err();
        assert!(matches!(err, StorageError::BadRequest(_)));
        assert!(resolve_under_root(root, "images/../../uploads2").is_err());
        assert!(resolve_under_root(root, "images/../docs").is_ok());
    }

    #[test]
    fn test_locator_from_url() {
        assert_eq!(
            locator_to_logical("http://localhost:3030/uploads/images/a.png", HOST, "uploads"),
            "images/a.png"
        );
        assert_eq!(
            locator_to_logical("http://localhost:3030/uploads/a.png", HOST, "uploads"),
            "a.png"
        );
        assert_eq!(
            locator_to_logical("http://localhost:3030/uploads", HOST, "uploads"),
            ""
        );
    }

    #[test]
    fn test_locator_passthrough() {
        assert_eq!(locator_to_logical("images/a.png", HOST, "uploads"), "images/a.png");
        // Host prefix only matches on a segment boundary
        assert_eq!(
            locator_to_logical("http://localhost:30301/uploads/a", HOST, "uploads"),
            "http://localhost:30301/uploads/a"
        );
        // Root segment only stripped when it is a whole segment
        assert_eq!(
            locator_to_logical("http://localhost:3030/uploadsx/a", HOST, "uploads"),
            "uploadsx/a"
        );
    }
}
