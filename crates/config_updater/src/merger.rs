//! Combines an existing configuration with proposed values.
//!
//! The merge itself never fails. Whether the result can be written back is
//! decided afterwards by the format handler's serializer.

use serde_json::Map;

use crate::options::{MergePolicy, UpdateOptions};
use crate::StructuredValue;

#[cfg(test)]
#[path = "merger_tests.rs"]
mod tests;

/// Merges `proposed` into `existing` using the policy selected by `options`.
///
/// # Examples
///
/// ```rust
/// use config_updater::{merge, UpdateOptions};
/// use serde_json::json;
///
/// let existing = json!({"a": 1, "b": {"c": 2}});
/// let proposed = json!({"b": {"d": 3}});
///
/// let deep = merge(&existing, &proposed, &UpdateOptions::default());
/// assert_eq!(deep, json!({"a": 1, "b": {"c": 2, "d": 3}}));
///
/// let shallow = UpdateOptions { deep_merge: false, ..Default::default() };
/// assert_eq!(merge(&existing, &proposed, &shallow), json!({"a": 1, "b": {"d": 3}}));
/// ```
pub fn merge(
    existing: &StructuredValue,
    proposed: &StructuredValue,
    options: &UpdateOptions,
) -> StructuredValue {
    match options.merge_policy() {
        MergePolicy::Replace => proposed.clone(),
        MergePolicy::Deep => deep_merge(existing, proposed),
        MergePolicy::Shallow => shallow_merge(existing, proposed),
    }
}

/// Recursive merge.
///
/// Mappings merge key by key, keeping the existing key order and appending
/// new keys. Sequences concatenate with the proposed items after the existing
/// ones. Any other combination takes the proposed value.
pub fn deep_merge(existing: &StructuredValue, proposed: &StructuredValue) -> StructuredValue {
    match (existing, proposed) {
        (StructuredValue::Object(base), StructuredValue::Object(overlay)) => {
            let mut merged = base.clone();
            for (key, value) in overlay {
                let next = match base.get(key) {
                    Some(current) => deep_merge(current, value),
                    None => value.clone(),
                };
                merged.insert(key.clone(), next);
            }
            StructuredValue::Object(merged)
        }
        (StructuredValue::Array(base), StructuredValue::Array(overlay)) => {
            StructuredValue::Array(base.iter().chain(overlay).cloned().collect())
        }
        (_, overlay) => overlay.clone(),
    }
}

/// Top-level overwrite.
///
/// Each key of `proposed` replaces the existing value wholesale. A
/// non-mapping `existing` counts as an empty mapping; a non-mapping
/// `proposed` replaces everything.
pub fn shallow_merge(existing: &StructuredValue, proposed: &StructuredValue) -> StructuredValue {
    let StructuredValue::Object(overlay) = proposed else {
        return proposed.clone();
    };

    let mut merged = match existing {
        StructuredValue::Object(base) => base.clone(),
        _ => Map::new(),
    };
    for (key, value) in overlay {
        merged.insert(key.clone(), value.clone());
    }
    StructuredValue::Object(merged)
}
