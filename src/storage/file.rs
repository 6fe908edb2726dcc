//! File manager
//!
//! Create, list, get and remove files beneath the storage root.

use crate::error::StorageError;
use crate::pagination::{Page, PageQuery};
use crate::storage::context::StorageContext;
use crate::storage::directory::{DirectoryManager, list_page};
use crate::storage::entity::EntityBuilder;
use crate::storage::filesystem::{self, EntryKind};
use crate::storage::results::{CreateDirectoryInput, CreateFileInput, FileQuery, ResultEntity};
use crate::storage::validation::validate_file_name;
use log::{debug, info, warn};
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncRead;

#[derive(Debug, Clone)]
pub struct FileManager {
    context: Arc<StorageContext>,
    builder: EntityBuilder,
    directories: DirectoryManager,
}

impl FileManager {
    pub fn new(context: Arc<StorageContext>) -> Self {
        Self {
            builder: EntityBuilder::new(Arc::clone(&context)),
            directories: DirectoryManager::new(Arc::clone(&context)),
            context,
        }
    }

    /// Store `input.stream` as `input.name` inside `query.path`.
    ///
    /// The destination directory is created first. The call resolves once the
    /// stream is fully written. If writing fails the error is returned as-is
    /// and whatever was already written stays on disk.
    pub async fn create<R>(
        &self,
        mut input: CreateFileInput<R>,
        query: &FileQuery,
    ) -> Result<ResultEntity, StorageError>
    where
        R: AsyncRead + Unpin,
    {
        validate_file_name(&input.name)?;
        let sub_path = query.path.as_deref().unwrap_or("");

        self.directories
            .create(CreateDirectoryInput::new(sub_path))
            .await?;

        let target = self.context.resolve(sub_path)?.join(&input.name);
        let written = filesystem::write_stream(&target, &mut input.stream).await?;

        info!(
            "Stored file {} ({} bytes, real: {})",
            input.name,
            written,
            target.display()
        );
        self.builder.build(&target).await
    }

    /// List the files (anything that is not a directory) of `query.path`
    pub async fn list(&self, query: &PageQuery) -> Result<Page<ResultEntity>, StorageError> {
        let dir = self.context.resolve(query.path_or_root())?;
        list_page(&self.context, &self.builder, &dir, EntryKind::File, query).await
    }

    /// Get a file by logical path or public URL
    pub async fn get(&self, path: &str) -> Result<ResultEntity, StorageError> {
        let fullpath = self.context.resolve_locator(path)?;
        self.builder.build(&fullpath).await
    }

    /// Remove a single file and return its last snapshot.
    ///
    /// With `prune_empty_directories` enabled, the parent directory is removed
    /// afterwards in a detached task if it is now empty. That task never
    /// affects the returned result and its failures are only logged.
    pub async fn remove(&self, path: &str) -> Result<ResultEntity, StorageError> {
        let fullpath = self.context.resolve_locator(path)?;
        let file = self.builder.build(&fullpath).await?;

        fs::remove_file(&fullpath).await?;
        info!("Deleted file {} (real: {})", file.url, fullpath.display());

        if self.context.prune_empty_directories() {
            if let Some(parent) = fullpath.parent() {
                if parent != self.context.root() && parent.starts_with(self.context.root()) {
                    tokio::spawn(prune_if_empty(parent.to_path_buf()));
                }
            }
        }

        Ok(file)
    }
}

/// Remove `dir` if it is empty. `remove_dir` refuses non-empty directories,
/// so a file written concurrently keeps its directory.
async fn prune_if_empty(dir: PathBuf) {
    match fs::remove_dir(&dir).await {
        Ok(()) => debug!("Pruned empty directory {}", dir.display()),
        Err(e) if e.kind() == ErrorKind::DirectoryNotEmpty => {
            debug!("Kept non-empty directory {}", dir.display())
        }
        Err(e) => warn!("Failed to prune directory {}: {}", dir.display(), e),
    }
}
