//! Declared rules
//!
//! A declared rule is attached to a field by name through settings, as
//! opposed to the rules implied by the field's own attributes. It is either a
//! custom predicate (only attachable from code) or a parametric rule that can
//! also be read from JSON:
//!
//! ```json
//! {"name": "confirm", "rules": [{"rule": "equalTo", "selector": "#password"}]}
//! {"name": "bio", "rules": [{"rule": "rangelength", "min": 10, "max": 200, "message": "..."}]}
//! ```

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};

use crate::form::Field;

/// Predicate over `(value, field)`; `true` means valid.
pub type Predicate = Arc<dyn Fn(&str, &Field) -> bool + Send + Sync>;

// ============================================================================
// CUSTOM RULE
// ============================================================================

/// A user-supplied predicate with an optional failure message.
///
/// The predicate runs on the caller's stack; a panic inside it propagates.
#[derive(Clone)]
pub struct CustomRule {
    pub predicate: Predicate,
    pub message: Option<String>,
}

impl CustomRule {
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&str, &Field) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Arc::new(predicate),
            message: None,
        }
    }

    pub(crate) fn check(&self, value: &str, field: &Field) -> bool {
        (self.predicate)(value, field)
    }
}

impl fmt::Debug for CustomRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomRule")
            .field("predicate", &"<fn>")
            .field("message", &self.message)
            .finish()
    }
}

// ============================================================================
// PARAMETRIC RULE
// ============================================================================

/// Built-in parametric rules, tagged by `"rule"` in JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule")]
pub enum ParamRule {
    /// Value must equal the value of the field matched by `selector`
    #[serde(rename = "equalTo")]
    EqualTo {
        selector: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },

    /// Measured length must be at least `min`
    #[serde(rename = "minlength")]
    MinLength {
        min: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },

    /// Measured length must be at most `max`
    #[serde(rename = "maxlength")]
    MaxLength {
        max: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },

    /// Measured length must be within `[min, max]`
    #[serde(rename = "rangelength")]
    RangeLength {
        min: usize,
        max: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
}

impl ParamRule {
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::EqualTo { message, .. }
            | Self::MinLength { message, .. }
            | Self::MaxLength { message, .. }
            | Self::RangeLength { message, .. } => message.as_deref(),
        }
    }

    fn message_mut(&mut self) -> &mut Option<String> {
        match self {
            Self::EqualTo { message, .. }
            | Self::MinLength { message, .. }
            | Self::MaxLength { message, .. }
            | Self::RangeLength { message, .. } => message,
        }
    }
}

// ============================================================================
// RULE
// ============================================================================

/// A declared rule.
#[derive(Debug, Clone)]
pub enum Rule {
    Custom(CustomRule),
    Param(ParamRule),
}

impl Rule {
    /// Custom predicate rule.
    pub fn custom<F>(predicate: F) -> Self
    where
        F: Fn(&str, &Field) -> bool + Send + Sync + 'static,
    {
        Self::Custom(CustomRule::new(predicate))
    }

    #[must_use]
    pub fn equal_to(selector: impl Into<String>) -> Self {
        Self::Param(ParamRule::EqualTo {
            selector: selector.into(),
            message: None,
        })
    }

    #[must_use]
    pub fn min_length(min: usize) -> Self {
        Self::Param(ParamRule::MinLength { min, message: None })
    }

    #[must_use]
    pub fn max_length(max: usize) -> Self {
        Self::Param(ParamRule::MaxLength { max, message: None })
    }

    #[must_use]
    pub fn range_length(min: usize, max: usize) -> Self {
        Self::Param(ParamRule::RangeLength {
            min,
            max,
            message: None,
        })
    }

    /// Sets the message shown when this rule fails.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, text: impl Into<String>) -> Self {
        let slot = match &mut self {
            Self::Custom(rule) => &mut rule.message,
            Self::Param(rule) => rule.message_mut(),
        };
        *slot = Some(text.into());
        self
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Custom(rule) => rule.message.as_deref(),
            Self::Param(rule) => rule.message(),
        }
    }
}

impl From<ParamRule> for Rule {
    fn from(rule: ParamRule) -> Self {
        Self::Param(rule)
    }
}

impl From<CustomRule> for Rule {
    fn from(rule: CustomRule) -> Self {
        Self::Custom(rule)
    }
}

impl<'de> Deserialize<'de> for Rule {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        ParamRule::deserialize(deserializer).map(Self::Param)
    }
}

/// Rules declared for one field name, in evaluation order.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldRules {
    pub name: String,
    #[serde(default)]
    pub rules: Vec<Rule>,
}

impl FieldRules {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: Vec::new(),
        }
    }
}
