//! Errors raised while binding a validator to a form.
//!
//! Field-level failures are not errors; they are
//! [`ValidationError`](crate::foundation::ValidationError) values.

use formguard_config::ConfigError;
use thiserror::Error;

/// Malformed CSS selector.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    /// Selector (or one item of a comma list) is blank
    #[error("empty selector")]
    Empty,

    /// Character not allowed at this position
    #[error("unexpected '{ch}' at position {position}")]
    Unexpected { ch: char, position: usize },

    /// Attribute selector or quoted value never closed
    #[error("unterminated selector starting at position {position}")]
    Unterminated { position: usize },
}

/// Failure to construct a [`FormValidator`](crate::binding::FormValidator).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BindError {
    /// No form matched the selector
    #[error("no form matches '{selector}'")]
    FormNotFound { selector: String },

    /// More than one form matched the selector
    #[error("selector '{selector}' matches {count} forms, expected exactly one")]
    AmbiguousForm { selector: String, count: usize },

    /// Form selector could not be parsed
    #[error("invalid form selector: {0}")]
    Selector(#[from] SelectorError),

    /// Settings could not be resolved
    #[error("invalid settings: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for binding operations
pub type BindResult<T> = Result<T, BindError>;
