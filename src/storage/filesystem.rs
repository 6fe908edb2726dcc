//! File system operations
//!
//! Thin async wrappers over the OS primitives the managers need.

use log::debug;
use std::io;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tokio::io::{AsyncRead, AsyncWriteExt};

/// Which directory entries a listing keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

impl EntryKind {
    fn matches(self, is_dir: bool) -> bool {
        match self {
            EntryKind::Directory => is_dir,
            EntryKind::File => !is_dir,
        }
    }
}

/// Resolve `path` against the working directory and fold `.`/`..` lexically.
///
/// Symlinks are not followed, so the result is stable for paths that do not
/// exist yet.
pub fn absolute(path: &Path) -> io::Result<PathBuf> {
    let joined = std::path::absolute(path)?;
    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    Ok(normalized)
}

/// Check if a path is reachable. Any access error reads as `false`.
pub async fn exists(path: &Path) -> bool {
    match absolute(path) {
        Ok(fullpath) => fs::try_exists(&fullpath).await.unwrap_or(false),
        Err(_) => false,
    }
}

/// Names of the entries in `dir` of the requested kind, sorted.
///
/// Every entry is stat'ed (following symlinks); a failing stat fails the
/// whole listing.
pub async fn list_entries(dir: &Path, kind: EntryKind) -> io::Result<Vec<String>> {
    let mut entries = fs::read_dir(dir).await?;
    let mut names = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        let metadata = fs::metadata(entry.path()).await?;
        if kind.matches(metadata.is_dir()) {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }

    names.sort();
    debug!(
        "Read {} {:?} entries from {}",
        names.len(),
        kind,
        dir.display()
    );
    Ok(names)
}

/// Copy `source` into a new file at `target` until the source is exhausted.
///
/// On error the partially written file is left in place.
pub async fn write_stream<R>(target: &Path, source: &mut R) -> io::Result<u64>
where
    R: AsyncRead + Unpin + ?Sized,
{
    let mut file = fs::File::create(target).await?;
    let written = tokio::io::copy(source, &mut file).await?;
    file.flush().await?;
    Ok(written)
}
