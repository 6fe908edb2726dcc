//! Entity builder
//!
//! Turns an absolute filesystem path into its public [`ResultEntity`].
//!
//! The public address of a path is `{host}/{chunks}/{name}` where the chunks
//! are the segments from the root directory (included, by name) down to the
//! entity's parent. `dir` is the same chunk list without the root segment,
//! plus the entity's own name when it is a directory.
//!
//! The root is located in the parent path by its absolute position first,
//! then by the rightmost segment carrying the root's name. When neither is
//! found the root name alone is used as the chunk list. That fallback is what
//! addresses entries sitting directly in the root, but it also hides paths
//! outside the root: the root directory itself gets the URL
//! `{host}/{root}/{root}`, which does not map back to it.

use crate::error::StorageError;
use crate::storage::context::StorageContext;
use crate::storage::filesystem::{absolute, exists};
use crate::storage::results::ResultEntity;
use log::debug;
use std::io;
use std::path::Path;
use std::sync::Arc;
use tokio::fs;

/// Name, extension and public address of a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityLocation {
    pub name: String,
    pub ext: String,
    pub url: String,
    pub dir: String,
}

impl EntityLocation {
    /// Compute the public location of `fullpath` (absolute, normalized)
    pub fn locate(
        fullpath: &Path,
        root: &Path,
        root_name: &str,
        public_host: &str,
        is_dir: bool,
    ) -> Self {
        let name = fullpath
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let ext = if is_dir {
            String::new()
        } else {
            fullpath
                .extension()
                .map(|e| format!(".{}", e.to_string_lossy()))
                .unwrap_or_default()
        };

        let parent = fullpath.parent().unwrap_or(fullpath);
        let chunks = relative_chunks(parent, root, root_name);

        let url = format!("{}/{}/{}", public_host, chunks.join("/"), name);

        let mut dir_chunks: Vec<&str> = chunks.iter().skip(1).map(String::as_str).collect();
        if is_dir {
            dir_chunks.push(&name);
        }
        let dir = dir_chunks.join("/");

        Self {
            name,
            ext,
            url,
            dir,
        }
    }
}

/// Chunks from the root segment down to `parent`
fn relative_chunks(parent: &Path, root: &Path, root_name: &str) -> Vec<String> {
    let anchor = if parent.starts_with(root) {
        Some(root)
    } else {
        parent
            .ancestors()
            .find(|ancestor| ancestor.file_name().is_some_and(|n| n == root_name))
    };

    let mut chunks = vec![root_name.to_string()];
    if let Some(rest) = anchor.and_then(|a| parent.strip_prefix(a).ok()) {
        chunks.extend(
            rest.components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned()),
        );
    }
    chunks
}

/// A stat that fails once the path is known to exist (it vanished or became
/// unreadable in between) is never reported as `NotFound`.
fn stat_failed(path: &Path, err: io::Error) -> StorageError {
    StorageError::InternalServerError(format!("Failed to stat {}: {}", path.display(), err))
}

/// Builds entities for paths under one storage root
#[derive(Debug, Clone)]
pub struct EntityBuilder {
    context: Arc<StorageContext>,
}

impl EntityBuilder {
    pub fn new(context: Arc<StorageContext>) -> Self {
        Self { context }
    }

    /// Build the entity for `path`.
    ///
    /// Fails with `NotFound` when the path is unreachable. A stat failure
    /// after the existence check passed is an `InternalServerError`.
    pub async fn build(&self, path: &Path) -> Result<ResultEntity, StorageError> {
        let fullpath = absolute(path)?;

        if !exists(&fullpath).await {
            return Err(StorageError::NotFound(format!(
                "{} does not exist",
                fullpath.display()
            )));
        }

        let metadata = fs::metadata(&fullpath)
            .await
            .map_err(|e| stat_failed(&fullpath, e))?;

        let location = EntityLocation::locate(
            &fullpath,
            self.context.root(),
            self.context.root_name(),
            self.context.public_host(),
            metadata.is_dir(),
        );

        debug!("Built entity {} (real: {})", location.url, fullpath.display());

        Ok(ResultEntity {
            id: location.url.clone(),
            name: location.name,
            ext: location.ext,
            url: location.url,
            size: metadata.len(),
            dir: location.dir,
            created_at: metadata.created().ok(),
            updated_at: metadata.accessed().ok(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOST: &str = "http://host";

    fn locate(path: &str, is_dir: bool) -> EntityLocation {
        EntityLocation::locate(
            Path::new(path),
            Path::new("/srv/uploads"),
            "uploads",
            HOST,
            is_dir,
        )
    }

    #[test]
    fn test_directory_in_root() {
        let location = locate("/srv/uploads/images", true);
        assert_eq!(location.url, "http://host/uploads/images");
        assert_eq!(location.dir, "images");
        assert_eq!(location.ext, "");
    }

    #[test]
    fn test_file_in_root() {
        let location = locate("/srv/uploads/one.png", false);
        assert_eq!(location.url, "http://host/uploads/one.png");
        assert_eq!(location.dir, "");
        assert_eq!(location.name, "one.png");
        assert_eq!(location.ext, ".png");
    }

    #[test]
    fn test_nested_file() {
        let location = locate("/srv/uploads/images/2024/photo.tar.gz", false);
        assert_eq!(location.url, "http://host/uploads/images/2024/photo.tar.gz");
        assert_eq!(location.dir, "images/2024");
        assert_eq!(location.ext, ".gz");
    }

    #[test]
    fn test_nested_directory_includes_itself() {
        let location = locate("/srv/uploads/images/2024", true);
        assert_eq!(location.url, "http://host/uploads/images/2024");
        assert_eq!(location.dir, "images/2024");
    }

    #[test]
    fn test_directory_with_dot_has_no_ext() {
        let location = locate("/srv/uploads/v1.2", true);
        assert_eq!(location.ext, "");
        assert_eq!(location.name, "v1.2");
    }

    #[test]
    fn test_dotfile_has_no_ext() {
        assert_eq!(locate("/srv/uploads/.env", false).ext, "");
    }

    #[test]
    fn test_nested_directory_named_like_root() {
        let location = locate("/srv/uploads/uploads/a.txt", false);
        assert_eq!(location.url, "http://host/uploads/uploads/a.txt");
        assert_eq!(location.dir, "uploads");
    }

    #[test]
    fn test_outside_root_uses_rightmost_root_name() {
        let location = locate("/other/uploads/x/a.txt", false);
        assert_eq!(location.url, "http://host/uploads/x/a.txt");
        assert_eq!(location.dir, "x");
    }

    #[test]
    fn test_stat_failure_is_internal_error() {
        for kind in [io::ErrorKind::NotFound, io::ErrorKind::PermissionDenied] {
            let err = stat_failed(
                Path::new("/srv/uploads/gone.txt"),
                io::Error::new(kind, "stat failed"),
            );
            match err {
                StorageError::InternalServerError(msg) => {
                    assert!(msg.contains("/srv/uploads/gone.txt"));
                    assert!(msg.contains("stat failed"));
                }
                other => panic!("expected InternalServerError, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_root_falls_back_to_root_name() {
        let location = locate("/srv/uploads", true);
        assert_eq!(location.url, "http://host/uploads/uploads");
        assert_eq!(location.dir, "uploads");
    }
}
