//! RAX local storage - file system adapter
//!
//! Serves files and directories beneath a configured root as paginated,
//! URL-addressable entities.

pub mod config;
pub mod error;
pub mod pagination;
pub mod storage;

pub use crate::config::{PaginationConfig, StorageConfig};
pub use error::StorageError;
pub use pagination::{Page, PageQuery, paginate};
pub use storage::{
    CreateDirectoryInput, CreateFileInput, DirectoryManager, DirectoryQuery, FileManager,
    FileQuery, LocalStorage, ResultEntity,
};
