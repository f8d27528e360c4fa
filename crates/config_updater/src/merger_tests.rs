//! Tests for the merge policies.

use super::*;
use serde_json::json;

// ============================================================================
// Policy Selection Tests
// ============================================================================

/// The three policies applied to the same inputs.
#[test]
fn test_policies_on_nested_mapping() {
    let existing = json!({"a": 1, "b": {"c": 2}});
    let proposed = json!({"b": {"d": 3}});

    let deep = merge(&existing, &proposed, &UpdateOptions::default());
    assert_eq!(deep, json!({"a": 1, "b": {"c": 2, "d": 3}}));

    let shallow = UpdateOptions {
        deep_merge: false,
        ..Default::default()
    };
    assert_eq!(
        merge(&existing, &proposed, &shallow),
        json!({"a": 1, "b": {"d": 3}})
    );

    let replace = UpdateOptions {
        replace_config: true,
        ..Default::default()
    };
    assert_eq!(merge(&existing, &proposed, &replace), json!({"b": {"d": 3}}));
}

// ============================================================================
// Deep Merge Tests
// ============================================================================

/// Sequences concatenate, existing items first.
#[test]
fn test_deep_merge_concatenates_sequences() {
    let existing = json!({"hosts": ["a", "b"], "nested": {"ports": [1]}});
    let proposed = json!({"hosts": ["c"], "nested": {"ports": [2, 3]}});

    let merged = deep_merge(&existing, &proposed);

    assert_eq!(
        merged,
        json!({"hosts": ["a", "b", "c"], "nested": {"ports": [1, 2, 3]}})
    );
}

/// Mismatched shapes take the proposed value.
#[test]
fn test_deep_merge_overwrites_on_type_mismatch() {
    let existing = json!({"a": {"x": 1}, "b": [1], "c": "text"});
    let proposed = json!({"a": "flat", "b": {"k": true}, "c": {"now": "nested"}});

    let merged = deep_merge(&existing, &proposed);

    assert_eq!(merged, proposed);
}

/// Existing keys keep their position; new keys are appended.
#[test]
fn test_deep_merge_preserves_key_order() {
    let existing = json!({"first": 1, "second": {"x": 1}, "third": 3});
    let proposed = json!({"new": true, "second": {"y": 2}});

    let merged = deep_merge(&existing, &proposed);

    let keys: Vec<&String> = merged.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["first", "second", "third", "new"]);
    let nested: Vec<&String> = merged["second"].as_object().unwrap().keys().collect();
    assert_eq!(nested, vec!["x", "y"]);
}

/// A null proposal overwrites the existing value.
#[test]
fn test_deep_merge_null_overwrites() {
    let merged = deep_merge(&json!({"a": {"b": 1}}), &json!({"a": null}));

    assert_eq!(merged, json!({"a": null}));
}

/// Merging into an empty document yields the proposal.
#[test]
fn test_deep_merge_into_empty_document() {
    let proposed = json!({"a": {"b": [1]}});

    assert_eq!(deep_merge(&json!({}), &proposed), proposed);
    assert_eq!(deep_merge(&json!(null), &proposed), proposed);
}

// ============================================================================
// Shallow Merge Tests
// ============================================================================

/// Nested structures are replaced, not merged.
#[test]
fn test_shallow_merge_replaces_nested_values() {
    let existing = json!({"a": {"x": 1, "y": 2}, "b": [1, 2]});
    let proposed = json!({"a": {"z": 3}, "b": [9]});

    let merged = shallow_merge(&existing, &proposed);

    assert_eq!(merged, json!({"a": {"z": 3}, "b": [9]}));
}

/// A scalar document counts as empty.
#[test]
fn test_shallow_merge_over_scalar_document() {
    let merged = shallow_merge(&json!("text"), &json!({"a": 1}));

    assert_eq!(merged, json!({"a": 1}));
}

/// A scalar proposal replaces the whole document.
#[test]
fn test_shallow_merge_with_scalar_proposal() {
    assert_eq!(shallow_merge(&json!({"a": 1}), &json!(5)), json!(5));
}
