//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use formguard_validator::prelude::*;
//!
//! let form = Form::new().with_field(Field::new("email", "email").required());
//! let mut validator = FormValidator::builder(form).build()?;
//! assert!(!validator.validate_form());
//! ```

// ============================================================================
// FOUNDATION
// ============================================================================

pub use crate::foundation::{Validate, ValidationError, ValidationErrors};

// ============================================================================
// PREDICATES
// ============================================================================

pub use crate::validators::{
    DateRange, Digits, Email, NotEmpty, Pattern, Phone, Url, date_range, digits, email,
    matches_pattern, not_empty, phone, url,
};

// ============================================================================
// FORM MODEL, RULES, SETTINGS
// ============================================================================

pub use crate::form::{Document, Element, Field, FieldId, FieldKind, Form, Selector};
pub use crate::messages::{MessageCatalog, MessageKey};
pub use crate::rules::{CustomRule, FieldRules, ParamRule, Rule};
pub use crate::settings::Settings;

// ============================================================================
// EVALUATION AND BINDING
// ============================================================================

pub use crate::binding::{FieldEvent, FormValidator, FormValidatorBuilder, SubmitOutcome};
pub use crate::display::{ErrorDisplay, ErrorNode, ErrorNodes, Placement};
pub use crate::engine::{Evaluator, Verdict};
pub use crate::error::{BindError, BindResult, SelectorError};
