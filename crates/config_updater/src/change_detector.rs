//! Decides whether a proposed partial configuration would change anything.
//!
//! The comparison is one-directional: only keys present in the proposal are
//! examined, so extra keys in the existing configuration never trigger an
//! update. Scalars compare loosely because several formats (properties, XML)
//! parse every value as text.

use crate::StructuredValue;

#[cfg(test)]
#[path = "change_detector_tests.rs"]
mod tests;

/// Returns `true` when applying `proposed` on top of `existing` would change
/// at least one value.
///
/// Nested mappings and sequences in `proposed` require a container at the
/// same place in `existing` and are compared recursively; sequences are
/// walked by index. Scalars compare with [`loosely_equal`].
///
/// # Examples
///
/// ```rust
/// use config_updater::needs_update;
/// use serde_json::json;
///
/// let existing = json!({"server": {"port": "8080", "host": "localhost"}});
///
/// assert!(!needs_update(&existing, &json!({"server": {"port": 8080}})));
/// assert!(needs_update(&existing, &json!({"server": {"port": 9090}})));
/// assert!(!needs_update(&existing, &json!({})));
/// ```
pub fn needs_update(existing: &StructuredValue, proposed: &StructuredValue) -> bool {
    match proposed {
        StructuredValue::Object(entries) => entries
            .iter()
            .any(|(key, value)| differs(child(existing, key), value)),
        StructuredValue::Array(items) => items
            .iter()
            .enumerate()
            .any(|(index, value)| differs(existing.get(index), value)),
        scalar => !loosely_equal(Some(existing), scalar),
    }
}

fn differs(existing: Option<&StructuredValue>, proposed: &StructuredValue) -> bool {
    if is_container(proposed) {
        match existing {
            Some(current) if is_container(current) => needs_update(current, proposed),
            _ => true,
        }
    } else {
        !loosely_equal(existing, proposed)
    }
}

fn child<'a>(container: &'a StructuredValue, key: &str) -> Option<&'a StructuredValue> {
    match container {
        StructuredValue::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
        other => other.get(key),
    }
}

fn is_container(value: &StructuredValue) -> bool {
    matches!(
        value,
        StructuredValue::Object(_) | StructuredValue::Array(_)
    )
}

/// Loose scalar equality.
///
/// `existing` is `None` when the key is absent, which only equals null.
/// Numbers compare numerically, numeric strings compare with numbers (an
/// empty string counts as zero), booleans compare as `1`/`0` against numbers
/// and as `true`/`false` against strings. Containers never equal scalars.
pub fn loosely_equal(existing: Option<&StructuredValue>, proposed: &StructuredValue) -> bool {
    use StructuredValue as V;

    let current = match existing {
        None | Some(V::Null) => return proposed.is_null(),
        Some(current) => current,
    };
    match (current, proposed) {
        (_, V::Null) => false,
        (V::String(a), V::String(b)) => a == b,
        (V::Bool(a), V::Bool(b)) => a == b,
        (V::Number(a), V::Number(b)) if a == b => true,
        (V::Bool(flag), V::String(text)) | (V::String(text), V::Bool(flag))
            if text.trim() == flag.to_string() =>
        {
            true
        }
        (a, b) if is_container(a) || is_container(b) => false,
        (a, b) => match (as_number(a), as_number(b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        },
    }
}

fn as_number(value: &StructuredValue) -> Option<f64> {
    match value {
        StructuredValue::Number(n) => n.as_f64(),
        StructuredValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        StructuredValue::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Some(0.0)
            } else {
                trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
            }
        }
        _ => None,
    }
}
