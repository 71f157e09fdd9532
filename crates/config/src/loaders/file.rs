//! File-based JSON loader

// Standard library
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

// External dependencies
use async_trait::async_trait;
use serde_json::Value;

// Internal crates
use crate::core::{ConfigError, ConfigResult, SourceLoader};

/// Loads JSON documents from the filesystem.
#[derive(Debug, Clone, Default)]
pub struct FileLoader {
    /// Base directory for relative paths
    pub base_dir: Option<PathBuf>,
}

impl FileLoader {
    /// Create a new file loader
    #[must_use]
    pub fn new() -> Self {
        Self { base_dir: None }
    }

    /// Create a new file loader with base directory
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
        }
    }

    /// Resolve path relative to base directory
    fn resolve_path(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base_dir) if path.is_relative() => base_dir.join(path),
            _ => path.to_path_buf(),
        }
    }
}

#[async_trait]
impl SourceLoader for FileLoader {
    async fn load(&self, source: &str) -> ConfigResult<Value> {
        let path = self.resolve_path(Path::new(source));

        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => ConfigError::file_not_found(&path),
                _ => ConfigError::file_read_error(&path, e.to_string()),
            })?;

        let value = serde_json::from_str(&content)
            .map_err(|e| ConfigError::parse_error(&path, format!("JSON parse error: {e}")))?;

        formguard_log::debug!(path = %path.display(), "loaded JSON source");
        Ok(value)
    }
}
