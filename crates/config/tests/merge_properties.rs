//! Property-based tests for settings merging.

use formguard_config::{deep_merge, merge_messages, merged};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::{Map, Value, json};

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(|n| json!(n)),
        "[a-z]{0,6}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-c]{1,2}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

// ============================================================================
// IDEMPOTENCE: merge(x, x) == x
// ============================================================================

proptest! {
    #[test]
    fn merging_with_itself_is_identity(value in arb_json()) {
        prop_assert_eq!(merged(&value, &value), value);
    }

    #[test]
    fn empty_object_override_is_identity(value in arb_json()) {
        let result = merged(&value, &json!({}));
        if value.is_object() {
            prop_assert_eq!(result, value);
        } else {
            prop_assert_eq!(result, json!({}));
        }
    }

    #[test]
    fn override_keys_win(base in arb_json(), key in "[a-c]{1,2}", leaf in any::<i32>()) {
        let mut target = json!({ "root": base });
        let mut patch = Map::new();
        patch.insert(key.clone(), json!(leaf));
        deep_merge(&mut target, json!({ "root": Value::Object(patch) }));
        if let Some(obj) = target["root"].as_object() {
            prop_assert_eq!(&obj[&key], &json!(leaf));
        } else {
            prop_assert!(false, "object override must produce an object");
        }
    }
}

// ============================================================================
// MESSAGE MERGE: defaults are never lost
// ============================================================================

proptest! {
    #[test]
    fn message_defaults_always_present(overrides in arb_json()) {
        let defaults = json!({"required": "This field is required.", "email": "Bad email."});
        let Value::Object(defaults) = defaults else { unreachable!() };

        let result = merge_messages(&defaults, &overrides);
        for key in defaults.keys() {
            prop_assert!(result[key].is_string());
        }
    }
}

#[test]
fn null_override_clears_only_named_key() {
    let result = merged(&json!({"a": 1, "b": 2}), &json!({"a": null}));
    assert_eq!(result, json!({"a": null, "b": 2}));
}
