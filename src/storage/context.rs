//! Resolved adapter settings shared by the managers

use crate::config::{PaginationConfig, StorageConfig};
use crate::error::StorageError;
use crate::storage::filesystem::absolute;
use crate::storage::validation::{locator_to_logical, resolve_under_root};
use std::path::{Path, PathBuf};

/// Immutable per-adapter state: the absolute root plus the public addressing
#[derive(Debug)]
pub struct StorageContext {
    root: PathBuf,
    root_name: String,
    public_host: String,
    pagination: PaginationConfig,
    prune_empty_directories: bool,
}

impl StorageContext {
    pub fn new(config: &StorageConfig) -> Result<Self, StorageError> {
        config
            .validate()
            .map_err(|e| {
                StorageError::InternalServerError(format!("Invalid configuration: {}", e))
            })?;

        let root = absolute(&config.root_path())?;
        let root_name = root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            root,
            root_name,
            public_host: config.public_host.trim_end_matches('/').to_string(),
            pagination: config.pagination,
            prune_empty_directories: config.prune_empty_directories,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Last segment of the root, the first segment of every public URL path
    pub fn root_name(&self) -> &str {
        &self.root_name
    }

    pub fn public_host(&self) -> &str {
        &self.public_host
    }

    pub fn pagination(&self) -> &PaginationConfig {
        &self.pagination
    }

    pub fn prune_empty_directories(&self) -> bool {
        self.prune_empty_directories
    }

    /// Absolute path of a logical sub-path
    pub fn resolve(&self, logical: &str) -> Result<PathBuf, StorageError> {
        resolve_under_root(&self.root, logical)
    }

    /// Absolute path of a logical sub-path or a public URL
    pub fn resolve_locator(&self, locator: &str) -> Result<PathBuf, StorageError> {
        let logical = locator_to_logical(locator, &self.public_host, &self.root_name);
        self.resolve(logical)
    }
}
