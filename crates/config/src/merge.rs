//! Structural merging of JSON settings documents
//!
//! Two operations:
//!
//! - [`deep_merge`] folds an override document onto a base document.
//!   Objects merge key by key, arrays index by index, everything else
//!   (including `null`) in the override replaces the base value.
//! - [`merge_messages`] folds a message-template override under a catalog of
//!   defaults so that every default key survives.
//!
//! `serde_json::Value` is an owned tree, so an override can never contain a
//! reference cycle; every node is visited exactly once.

use serde_json::{Map, Value};

/// Merge `source` into `target` in place.
///
/// # Examples
///
/// ```
/// use formguard_config::deep_merge;
/// use serde_json::json;
///
/// let mut base = json!({"a": 1, "b": {"c": 2, "d": 3}});
/// deep_merge(&mut base, json!({"a": null, "b": {"c": 20}}));
/// assert_eq!(base, json!({"a": null, "b": {"c": 20, "d": 3}}));
/// ```
pub fn deep_merge(target: &mut Value, source: Value) {
    match (target, source) {
        (Value::Object(target_obj), Value::Object(source_obj)) => {
            for (key, value) in source_obj {
                if let Some(existing) = target_obj.get_mut(&key) {
                    deep_merge(existing, value);
                } else {
                    target_obj.insert(key, value);
                }
            }
        }
        (Value::Array(target_arr), Value::Array(source_arr)) => {
            for (index, value) in source_arr.into_iter().enumerate() {
                if let Some(existing) = target_arr.get_mut(index) {
                    deep_merge(existing, value);
                } else {
                    target_arr.push(value);
                }
            }
        }
        (target, source) => {
            *target = source;
        }
    }
}

/// Returns `base` with `overrides` merged on top, leaving both inputs intact.
#[must_use]
pub fn merged(base: &Value, overrides: &Value) -> Value {
    let mut result = base.clone();
    deep_merge(&mut result, overrides.clone());
    result
}

/// Folds message templates from `overrides` on top of `defaults`.
///
/// Only string entries override. A `null` or otherwise non-string entry never
/// clears a default, and a non-object `overrides` leaves the defaults as they
/// are, so every key of `defaults` is present in the result.
#[must_use]
pub fn merge_messages(defaults: &Map<String, Value>, overrides: &Value) -> Map<String, Value> {
    let mut result = defaults.clone();
    let Value::Object(overrides) = overrides else {
        return result;
    };

    for (key, value) in overrides {
        if value.is_string() {
            result.insert(key.clone(), value.clone());
        } else {
            formguard_log::trace!(key = %key, "ignoring non-string message template");
        }
    }
    result
}
