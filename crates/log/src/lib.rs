//! # formguard-log
//!
//! Logging facade for the formguard crates.
//!
//! Library code logs through the re-exported `tracing` macros; binaries and
//! tests pick a subscriber with one of the init functions.
//!
//! ```rust,ignore
//! let _guard = formguard_log::auto_init()?;
//! formguard_log::info!(form = "signup", "validator bound");
//! ```

mod builder;
mod config;

pub use builder::{LoggerBuilder, LoggerGuard};
pub use config::{Config, DisplayConfig, Format, Profile};

// Re-export tracing macros
pub use tracing::{debug, error, info, trace, warn};

/// Result type for logger setup.
pub type LogResult<T> = Result<T, LogError>;

/// Errors raised while installing a subscriber.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// The level filter could not be parsed.
    #[error("invalid filter '{filter}': {reason}")]
    Filter {
        /// The rejected filter directive
        filter: String,
        /// Parser message
        reason: String,
    },

    /// A global subscriber is already installed.
    #[error("a global subscriber is already installed")]
    AlreadyInitialized,
}

/// Picks a configuration from the environment, then the build profile.
///
/// `FORMGUARD_LOG` or `RUST_LOG` win; otherwise the preset for
/// [`Profile::for_build`] applies.
pub fn auto_init() -> LogResult<LoggerGuard> {
    if Config::level_in_env() {
        init_with(Config::from_env())
    } else {
        init_with(Config::for_profile(Profile::for_build()))
    }
}

/// Initialize with the default configuration.
pub fn init() -> LogResult<LoggerGuard> {
    init_with(Config::default())
}

/// Initialize with a custom configuration.
pub fn init_with(config: Config) -> LogResult<LoggerGuard> {
    LoggerBuilder::from_config(config).build()
}

/// Initialize for tests; repeated calls are no-ops.
pub fn init_test() -> LoggerGuard {
    init_with(Config::test()).unwrap_or_else(|_| LoggerGuard::noop())
}
