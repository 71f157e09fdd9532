//! Effective validator settings
//!
//! Resolution order:
//!
//! 1. [`Settings::defaults_json`] is the base document.
//! 2. User overrides are deep-merged on top (`null` clears a key).
//! 3. The resulting `messages` object is re-folded under the default catalog,
//!    so every message key survives even if the override nulled it.
//! 4. The document is deserialized (camelCase keys) into [`Settings`].

use formguard_config::{ConfigError, ConfigResult, deep_merge, json_type_name};
use serde::{Deserialize, Deserializer};
use serde_json::{Value, json};

use crate::messages::MessageCatalog;
use crate::rules::{FieldRules, Rule};

pub const DEFAULT_ERROR_ELEMENT: &str = "p";

/// Settings after merging defaults and overrides.
///
/// Optional entries are `None` when an override cleared them with `null`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Selector for fields to leave untracked
    pub ignore: Option<String>,

    /// Declared rules, in declaration order
    #[serde(deserialize_with = "null_as_empty")]
    pub fields: Vec<FieldRules>,

    /// Validate on field events
    pub auto_validate: Option<bool>,

    /// Tag of generated error nodes
    pub error_element: Option<String>,

    /// Class of generated error nodes
    pub error_class: Option<String>,

    /// Class set on a field while it fails
    pub error_field_class: Option<String>,

    /// Class set on the form after a valid submission
    pub valid_form_class: Option<String>,

    /// Message templates
    pub messages: MessageCatalog,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<FieldRules>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<FieldRules>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ignore: None,
            fields: Vec::new(),
            auto_validate: Some(true),
            error_element: Some(DEFAULT_ERROR_ELEMENT.to_owned()),
            error_class: Some("error-message".to_owned()),
            error_field_class: Some("field-error".to_owned()),
            valid_form_class: Some("form-validated".to_owned()),
            messages: MessageCatalog::default(),
        }
    }
}

impl Settings {
    /// The default settings document.
    #[must_use]
    pub fn defaults_json() -> Value {
        json!({
            "ignore": null,
            "fields": [],
            "autoValidate": true,
            "errorElement": DEFAULT_ERROR_ELEMENT,
            "errorClass": "error-message",
            "errorFieldClass": "field-error",
            "validFormClass": "form-validated",
            "messages": MessageCatalog::default_json(),
        })
    }

    /// Resolves overrides against the defaults.
    ///
    /// `Value::Null` and `{}` both yield the defaults.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::TypeError`] if `overrides` is neither an object nor null
    /// - [`ConfigError::InvalidSettings`] if a recognized key has the wrong shape
    pub fn resolve(overrides: &Value) -> ConfigResult<Self> {
        if !(overrides.is_object() || overrides.is_null()) {
            return Err(ConfigError::type_error(
                "settings",
                "object",
                json_type_name(overrides),
            ));
        }

        let mut document = Self::defaults_json();
        if overrides.is_object() {
            deep_merge(&mut document, overrides.clone());
        }

        let messages = MessageCatalog::from_overrides(&document["messages"]);
        document["messages"] = serde_json::to_value(&messages)?;

        let settings: Self = serde_json::from_value(document)?;
        formguard_log::debug!(
            declared = settings.fields.len(),
            messages = settings.messages.len(),
            "settings resolved"
        );
        Ok(settings)
    }

    /// Appends a rule for `name` after any rules already declared for it.
    pub fn add_rule(&mut self, name: &str, rule: Rule) {
        if let Some(entry) = self.fields.iter_mut().find(|f| f.name == name) {
            entry.rules.push(rule);
        } else {
            let mut entry = FieldRules::new(name);
            entry.rules.push(rule);
            self.fields.push(entry);
        }
    }

    /// Declared rules for `name`, across every entry naming it.
    pub fn rules_for<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Rule> + 'a {
        self.fields
            .iter()
            .filter(move |f| f.name == name)
            .flat_map(|f| f.rules.iter())
    }

    #[must_use]
    pub fn auto_validate(&self) -> bool {
        self.auto_validate.unwrap_or(false)
    }

    #[must_use]
    pub fn error_element(&self) -> &str {
        self.error_element
            .as_deref()
            .filter(|tag| !tag.is_empty())
            .unwrap_or(DEFAULT_ERROR_ELEMENT)
    }
}
