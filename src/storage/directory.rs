//! Directory manager
//!
//! Create, list, get and remove directories beneath the storage root.

use crate::error::StorageError;
use crate::pagination::{Page, PageQuery, paginate};
use crate::storage::context::StorageContext;
use crate::storage::entity::EntityBuilder;
use crate::storage::filesystem::{self, EntryKind};
use crate::storage::results::{CreateDirectoryInput, DirectoryQuery, ResultEntity};
use log::{debug, info};
use std::path::Path;
use std::sync::Arc;
use tokio::fs;

#[derive(Debug, Clone)]
pub struct DirectoryManager {
    context: Arc<StorageContext>,
    builder: EntityBuilder,
}

impl DirectoryManager {
    pub fn new(context: Arc<StorageContext>) -> Self {
        let builder = EntityBuilder::new(Arc::clone(&context));
        Self { context, builder }
    }

    /// Create a directory (and any missing parents). Creating an existing
    /// directory returns it unchanged.
    pub async fn create(&self, input: CreateDirectoryInput) -> Result<ResultEntity, StorageError> {
        let path = self.context.resolve(&input.name)?;

        if filesystem::exists(&path).await {
            debug!("Directory {} already exists", path.display());
            return self.builder.build(&path).await;
        }

        fs::create_dir_all(&path).await?;

        if !filesystem::exists(&path).await {
            return Err(StorageError::InternalServerError(format!(
                "Directory {} was not created",
                input.name
            )));
        }

        info!(
            "Created directory {} (real: {})",
            input.name,
            path.display()
        );
        self.builder.build(&path).await
    }

    /// List the sub-directories of `query.path`, one page at a time.
    ///
    /// Only the entries on the requested page are turned into entities.
    pub async fn list(&self, query: &PageQuery) -> Result<Page<ResultEntity>, StorageError> {
        let dir = self.context.resolve(query.path_or_root())?;
        list_page(&self.context, &self.builder, &dir, EntryKind::Directory, query).await
    }

    /// Get a directory by logical path or public URL
    pub async fn get(&self, path: &str) -> Result<ResultEntity, StorageError> {
        let fullpath = self.context.resolve_locator(path)?;

        if !filesystem::exists(&fullpath).await {
            return Err(StorageError::NotFound(format!(
                "The directory does not exist: {}",
                path
            )));
        }

        self.builder.build(&fullpath).await
    }

    /// Remove a directory and return its last snapshot.
    ///
    /// Without `bulk` a non-empty directory fails with the OS error.
    pub async fn remove(
        &self,
        path: &str,
        query: DirectoryQuery,
    ) -> Result<ResultEntity, StorageError> {
        let fullpath = self.context.resolve_locator(path)?;
        if fullpath == self.context.root() {
            return Err(StorageError::BadRequest(
                "The root directory cannot be removed".into(),
            ));
        }

        let directory = self.get(path).await?;

        if query.bulk {
            fs::remove_dir_all(&fullpath).await?;
        } else {
            fs::remove_dir(&fullpath).await?;
        }

        info!(
            "Removed directory {} (real: {}, bulk: {})",
            directory.url,
            fullpath.display(),
            query.bulk
        );
        Ok(directory)
    }
}

/// Read `dir`, keep entries of `kind`, paginate the names and build the
/// entities of the requested page.
pub(crate) async fn list_page(
    context: &StorageContext,
    builder: &EntityBuilder,
    dir: &Path,
    kind: EntryKind,
    query: &PageQuery,
) -> Result<Page<ResultEntity>, StorageError> {
    let size = context.pagination().effective_size(query.size);
    let names = filesystem::list_entries(dir, kind).await?;

    let page = paginate(names, size, query.page_number());

    let mut entities = Vec::with_capacity(page.items.len());
    for name in &page.items {
        entities.push(builder.build(&dir.join(name)).await?);
    }

    debug!(
        "Listed page {} of {} (real: {}) - {}/{} entries",
        page.page,
        query.path_or_root(),
        dir.display(),
        entities.len(),
        page.total
    );
    Ok(page.with_items(entities))
}
