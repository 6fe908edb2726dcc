//! Configuration management for the local storage adapter
//!
//! The configuration is constructed once and stays immutable for the
//! adapter's lifetime; managers share it behind an `Arc`.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

const DEFAULT_PAGE_SIZE: usize = 15;
const MAX_PAGE_SIZE: usize = 50;

/// Complete adapter configuration
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Base directory every logical path is resolved beneath
    pub root_directory: String,

    /// URL prefix used to build public identifiers
    pub public_host: String,

    /// Bounds applied to every list request
    #[serde(default)]
    pub pagination: PaginationConfig,

    /// Remove a file's parent directory once it becomes empty (best effort)
    #[serde(default)]
    pub prune_empty_directories: bool,
}

/// Page size bounds
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct PaginationConfig {
    pub default_size: usize,
    pub max_size: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_size: DEFAULT_PAGE_SIZE,
            max_size: MAX_PAGE_SIZE,
        }
    }
}

impl PaginationConfig {
    /// Page size applied to a request: the requested size when it is within
    /// `max_size`, the default otherwise.
    pub fn effective_size(&self, requested: Option<usize>) -> usize {
        match requested {
            Some(size) if size <= self.max_size => size,
            _ => self.default_size,
        }
    }
}

impl StorageConfig {
    /// Build a configuration in code with default pagination
    pub fn new(root_directory: impl Into<String>, public_host: impl Into<String>) -> Self {
        let mut config = Self {
            root_directory: root_directory.into(),
            public_host: public_host.into(),
            pagination: PaginationConfig::default(),
            prune_empty_directories: false,
        };
        config.normalize();
        config
    }

    pub fn with_pagination(mut self, default_size: usize, max_size: usize) -> Self {
        self.pagination = PaginationConfig {
            default_size,
            max_size,
        };
        self
    }

    pub fn with_prune_empty_directories(mut self, enabled: bool) -> Self {
        self.prune_empty_directories = enabled;
        self
    }

    /// Load configuration from a config file with environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        // Packaged layout first, then the working directory
        let config_paths = ["rax-local-storage/config", "config"];

        let mut last_error = None;

        for config_path in &config_paths {
            match Config::builder()
                .add_source(File::with_name(config_path))
                .add_source(Environment::with_prefix("RAX_STORAGE").separator("__"))
                .build()
            {
                Ok(settings) => return Self::from_config(settings),
                Err(e) => {
                    last_error = Some(e);
                    continue;
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            ConfigError::Message(format!("No configuration found. Tried: {config_paths:?}"))
        }))
    }

    /// Deserialize and validate an already assembled `Config`
    pub fn from_config(settings: Config) -> Result<Self, ConfigError> {
        let mut config: StorageConfig = settings.try_deserialize()?;
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.root_directory.trim().is_empty() {
            return Err(ConfigError::Message(
                "root_directory cannot be empty".into(),
            ));
        }

        if self.public_host.is_empty() {
            return Err(ConfigError::Message("public_host cannot be empty".into()));
        }

        if self.pagination.default_size == 0 {
            return Err(ConfigError::Message(
                "pagination.default_size must be greater than 0".into(),
            ));
        }

        if self.pagination.max_size < self.pagination.default_size {
            return Err(ConfigError::Message(
                "pagination.max_size must not be less than pagination.default_size".into(),
            ));
        }

        Ok(())
    }

    /// Get root directory as PathBuf
    pub fn root_path(&self) -> PathBuf {
        PathBuf::from(&self.root_directory)
    }

    fn normalize(&mut self) {
        let trimmed = self.public_host.trim_end_matches('/').len();
        self.public_host.truncate(trimmed);
    }
}
