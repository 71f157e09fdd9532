//! Source loader implementations

pub(crate) mod file;

pub use file::FileLoader;

// Re-export trait from core for convenience
pub use crate::core::SourceLoader;
