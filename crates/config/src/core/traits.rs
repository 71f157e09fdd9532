//! Core traits for the configuration system

use super::ConfigResult;
use async_trait::async_trait;
use serde_json::Value;

/// Loads a JSON document from a named source.
#[async_trait]
pub trait SourceLoader: Send + Sync {
    /// Load the document at `source`
    async fn load(&self, source: &str) -> ConfigResult<Value>;
}
