//! Message catalog and template resolution
//!
//! A catalog maps a message kind (`"required"`, `"minlength"`, ...) to a
//! template with ordinal placeholders such as `{0}` and `{1}`. Every
//! [`MessageKey`] always resolves: merges only ever add or replace strings
//! on top of the built-in defaults.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// MESSAGE KEY
// ============================================================================

/// Message kinds produced by the built-in checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    Required,
    Email,
    Phone,
    Url,
    File,
    Date,
    Min,
    MinLength,
    Max,
    MaxLength,
    Range,
    RangeLength,
    RegExp,
    Remote,
    EqualTo,
}

impl MessageKey {
    /// Every key, in catalog order.
    pub const ALL: [Self; 15] = [
        Self::Required,
        Self::Email,
        Self::Phone,
        Self::Url,
        Self::File,
        Self::Date,
        Self::Min,
        Self::MinLength,
        Self::Max,
        Self::MaxLength,
        Self::Range,
        Self::RangeLength,
        Self::RegExp,
        Self::Remote,
        Self::EqualTo,
    ];

    /// Catalog key for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Url => "url",
            Self::File => "file",
            Self::Date => "date",
            Self::Min => "min",
            Self::MinLength => "minlength",
            Self::Max => "max",
            Self::MaxLength => "maxlength",
            Self::Range => "range",
            Self::RangeLength => "rangelength",
            Self::RegExp => "regExp",
            Self::Remote => "remote",
            Self::EqualTo => "equalTo",
        }
    }

    /// Built-in English template.
    #[must_use]
    pub const fn default_template(self) -> &'static str {
        match self {
            Self::Required => "This field is required.",
            Self::Email => "Please enter a valid email address.",
            Self::Phone => "Please enter a valid phone number.",
            Self::Url => "Please enter a valid URL.",
            Self::File => "Please select a file.",
            Self::Date => "Please enter a valid date.",
            Self::Min => "Please enter a value greater than or equal to {0}.",
            Self::MinLength => "Please enter at least {0} characters.",
            Self::Max => "Please enter a value less than or equal to {0}.",
            Self::MaxLength => "Please enter no more than {0} characters.",
            Self::Range => "Please enter a value between {0} and {1}.",
            Self::RangeLength => "Please enter a value between {0} and {1} characters long.",
            Self::RegExp => "Please match the requested format.",
            Self::Remote => "Please fix this field.",
            Self::EqualTo => "Please enter the same value again.",
        }
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// CATALOG
// ============================================================================

/// Mapping from message kind to template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageCatalog {
    templates: IndexMap<String, String>,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self {
            templates: MessageKey::ALL
                .iter()
                .map(|key| (key.as_str().to_owned(), key.default_template().to_owned()))
                .collect(),
        }
    }
}

impl MessageCatalog {
    /// The built-in catalog as a JSON object, the base of every message merge.
    #[must_use]
    pub fn default_json() -> Map<String, Value> {
        MessageKey::ALL
            .iter()
            .map(|key| (key.as_str().to_owned(), Value::from(key.default_template())))
            .collect()
    }

    /// Builds a catalog from an override object folded under the defaults.
    #[must_use]
    pub fn from_overrides(overrides: &Value) -> Self {
        Self::from_map(formguard_config::merge_messages(&Self::default_json(), overrides))
    }

    /// Returns this catalog with `overrides` folded on top.
    ///
    /// Non-string entries in `overrides` are ignored, so nothing is ever
    /// removed.
    #[must_use]
    pub fn merged_with(&self, overrides: &Value) -> Self {
        let current = self
            .templates
            .iter()
            .map(|(k, v)| (k.clone(), Value::from(v.as_str())))
            .collect();
        Self::from_map(formguard_config::merge_messages(&current, overrides))
    }

    fn from_map(map: Map<String, Value>) -> Self {
        Self {
            templates: map
                .into_iter()
                .filter_map(|(k, v)| match v {
                    Value::String(s) => Some((k, s)),
                    _ => None,
                })
                .collect(),
        }
    }

    /// Template for a built-in key.
    #[must_use]
    pub fn template(&self, key: MessageKey) -> &str {
        self.templates
            .get(key.as_str())
            .map_or(key.default_template(), String::as_str)
    }

    /// Template for an arbitrary key, including user-added ones.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.templates.get(key).map(String::as_str)
    }

    /// Resolves `key` with ordinal arguments substituted.
    #[must_use]
    pub fn format<A: fmt::Display>(&self, key: MessageKey, args: &[A]) -> String {
        format_message(self.template(key), args)
    }

    /// Number of templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Returns true if the catalog has no templates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Iterates `(key, template)` pairs in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.templates.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Substitutes `{0}`, `{1}`, ... in `template` with `args`, in order.
///
/// Only the first occurrence of each placeholder is replaced.
///
/// ```
/// use formguard_validator::messages::format_message;
///
/// assert_eq!(
///     format_message("between {0} and {1}", &[3, 7]),
///     "between 3 and 7"
/// );
/// assert_eq!(format_message("{0} or {0}", &[1]), "1 or {0}");
/// ```
#[must_use]
pub fn format_message<A: fmt::Display>(template: &str, args: &[A]) -> String {
    args.iter()
        .enumerate()
        .fold(template.to_owned(), |message, (i, arg)| {
            message.replacen(&format!("{{{i}}}"), &arg.to_string(), 1)
        })
}
