//! Logger builder implementation

// External dependencies
use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

// Internal crates
use crate::{
    LogError, LogResult,
    config::{Config, Format},
};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Logger builder
#[derive(Debug)]
pub struct LoggerBuilder {
    config: Config,
}

/// Guard returned by a successful init.
///
/// The global subscriber outlives the guard; holding it documents that the
/// caller owns logger setup for the process.
#[derive(Debug)]
pub struct LoggerGuard {
    installed: bool,
}

/// Applies the shared display options to a fmt layer and boxes it,
/// dropping the timer when timestamps are disabled.
macro_rules! display_layer {
    ($layer:expr, $display:expr) => {{
        let layer = $layer
            .with_ansi($display.colors)
            .with_target($display.target)
            .with_file($display.source)
            .with_line_number($display.source);
        if $display.time {
            layer.boxed()
        } else {
            layer.without_time().boxed()
        }
    }};
}

impl LoggerBuilder {
    /// Create builder from config
    #[must_use]
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    /// Build and install the global subscriber
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Filter string cannot be parsed
    /// - Another subscriber is already installed
    pub fn build(self) -> LogResult<LoggerGuard> {
        let filter = EnvFilter::try_new(&self.config.level).map_err(|e| LogError::Filter {
            filter: self.config.level.clone(),
            reason: e.to_string(),
        })?;

        let display = &self.config.display;
        let fmt_layer: BoxedLayer = match self.config.format {
            Format::Pretty => display_layer!(fmt::layer().pretty(), display),
            Format::Compact => display_layer!(fmt::layer().compact(), display),
            Format::Json => display_layer!(fmt::layer().json().flatten_event(true), display),
        };

        Registry::default()
            .with(fmt_layer)
            .with(filter)
            .try_init()
            .map_err(|_| LogError::AlreadyInitialized)?;

        Ok(LoggerGuard { installed: true })
    }
}

impl LoggerGuard {
    pub(crate) fn noop() -> Self {
        Self { installed: false }
    }

    /// Whether this guard's init call installed the subscriber.
    #[must_use]
    pub fn is_installed(&self) -> bool {
        self.installed
    }
}
