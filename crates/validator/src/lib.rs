//! # formguard-validator
//!
//! Form validation: built-in predicates, attribute-driven and declared rules,
//! message catalogs with ordinal placeholders, and a binding layer that
//! tracks a form's fields and drives error display.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use formguard_validator::prelude::*;
//! use serde_json::json;
//!
//! let form = Form::new()
//!     .with_id("signup")
//!     .with_field(Field::new("email", "email").with_id("email").required())
//!     .with_field(Field::new("text", "password").with_id("password").with_attr("minlength", "8"))
//!     .with_field(Field::new("text", "confirm"));
//!
//! let mut validator = FormValidator::builder(form)
//!     .settings(json!({
//!         "fields": [{"name": "confirm", "rules": [{"rule": "equalTo", "selector": "#password"}]}]
//!     }))
//!     .build()?;
//!
//! assert_eq!(validator.submit(), SubmitOutcome::Blocked);
//! ```
//!
//! ## Layers
//!
//! - [`validators`]: pure predicates ([`email`](validators::email),
//!   [`url`](validators::url), [`DateRange`](validators::DateRange), ...)
//! - [`engine`]: the per-field pipeline producing a [`Verdict`](engine::Verdict)
//! - [`messages`]: the [`MessageCatalog`](messages::MessageCatalog)
//! - [`binding`]: [`FormValidator`](binding::FormValidator) and its builder
//! - [`display`]: the [`ErrorDisplay`](display::ErrorDisplay) boundary

// ValidationError is returned by value from every check; boxing it would add
// an allocation to each failing field.
#![allow(clippy::result_large_err)]

pub mod binding;
pub mod display;
pub mod engine;
pub mod error;
pub mod form;
pub mod foundation;
mod macros;
pub mod messages;
pub mod prelude;
pub mod rules;
pub mod settings;
pub mod validators;
