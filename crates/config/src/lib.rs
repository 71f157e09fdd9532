//! # formguard-config
//!
//! Settings plumbing for formguard:
//!
//! - [`deep_merge`] / [`merged`]: fold user overrides onto default settings
//! - [`merge_messages`]: fold message templates under the default catalog
//! - [`SourceLoader`] / [`FileLoader`]: load JSON documents asynchronously
//!
//! ```rust,ignore
//! use formguard_config::{deep_merge, merge_messages};
//!
//! let mut settings = defaults.clone();
//! deep_merge(&mut settings, overrides);
//! ```

pub mod core;
pub mod loaders;
pub mod merge;

pub use crate::core::{ConfigError, ConfigResult, SourceLoader, json_type_name};
pub use loaders::FileLoader;
pub use merge::{deep_merge, merge_messages, merged};
