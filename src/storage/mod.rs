//! Local file system storage
//!
//! Exposes files and directories under one root as create/list/get/remove
//! operations returning URL-addressable entities.

pub mod context;
pub mod directory;
pub mod entity;
pub mod file;
pub mod filesystem;
pub mod results;
pub mod validation;

pub use context::StorageContext;
pub use directory::DirectoryManager;
pub use entity::{EntityBuilder, EntityLocation};
pub use file::FileManager;
pub use results::{CreateDirectoryInput, CreateFileInput, DirectoryQuery, FileQuery, ResultEntity};

use crate::config::StorageConfig;
use crate::error::StorageError;
use log::info;
use std::sync::Arc;

/// File and directory managers over one shared root
#[derive(Debug, Clone)]
pub struct LocalStorage {
    pub file: FileManager,
    pub directory: DirectoryManager,
}

impl LocalStorage {
    /// Build the managers without touching the file system
    pub fn new(config: &StorageConfig) -> Result<Self, StorageError> {
        let context = Arc::new(StorageContext::new(config)?);
        Ok(Self {
            file: FileManager::new(Arc::clone(&context)),
            directory: DirectoryManager::new(context),
        })
    }

    /// Build the managers and make sure the root directory exists
    pub async fn open(config: &StorageConfig) -> Result<Self, StorageError> {
        let storage = Self::new(config)?;
        storage
            .directory
            .create(CreateDirectoryInput::new(""))
            .await?;
        info!(
            "Local storage ready at {} (public host: {})",
            config.root_directory, config.public_host
        );
        Ok(storage)
    }
}
