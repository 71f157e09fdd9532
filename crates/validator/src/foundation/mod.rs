//! Core validation types and traits
//!
//! - **Traits**: [`Validate`]
//! - **Errors**: [`ValidationError`], [`ValidationErrors`]
//!
//! Every predicate in [`crate::validators`] implements [`Validate`], and the
//! field evaluator reports failures as a [`ValidationError`] whose `code` is
//! the catalog key of the message that was shown.
//!
//! ```rust,ignore
//! use formguard_validator::prelude::*;
//!
//! assert!(email().is_valid("a@b.com"));
//! let err = email().validate("nope").unwrap_err();
//! assert_eq!(err.code, "email");
//! ```

pub mod error;
pub mod traits;

pub use error::{ValidationError, ValidationErrors};
pub use traits::Validate;
