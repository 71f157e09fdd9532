//! Built-in predicates
//!
//! Stateless checks over a raw field value. Every validator is total: any
//! string input yields `Ok` or `Err`, never a panic. The only fallible
//! constructor is [`Pattern`], which rejects a malformed regular expression.
//!
//! # Examples
//!
//! ```rust,ignore
//! use formguard_validator::prelude::*;
//!
//! assert!(email().is_valid("a@b.com"));
//! assert!(url().validate("http://10.0.0.1").is_err());
//! assert!(DateRange::from_bounds(Some("2024-01-01"), None).is_valid("2024-06-30"));
//! ```

pub mod content;
pub mod date;
pub mod format;

pub use content::{Digits, NotEmpty, Pattern, digits, matches_pattern, not_empty};
pub use date::{DateRange, date_range, parse_date};
pub use format::{Email, Phone, Url, email, phone, url};
