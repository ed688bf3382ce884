//! Recursive override merge used for panel overlays and `extraJson`.
//!
//! Entities are resolved to plain JSON before they reach the merge, so both
//! sides only ever hold [`Value`]s.

use serde_json::{Map, Value};

/// Merge `extra` into `base`, returning the merged mapping.
///
/// For each key of `extra`: when the value in `base` is a mapping and the
/// override is a mapping, the merge recurses; when the value in `base` is a
/// mapping and the override is `null`, the mapping is kept; in every other
/// case the override replaces the value. Keys only in `base` are kept, keys
/// only in `extra` are added. An absent `extra` returns `base` unchanged.
pub fn deep_update(
    mut base: Map<String, Value>,
    extra: Option<&Map<String, Value>>,
) -> Map<String, Value> {
    let Some(extra) = extra else {
        return base;
    };
    for (key, value) in extra {
        match (base.get_mut(key), value) {
            (Some(Value::Object(nested)), Value::Object(nested_extra)) => {
                let merged = deep_update(std::mem::take(nested), Some(nested_extra));
                *nested = merged;
            }
            (Some(Value::Object(_)), Value::Null) => {}
            _ => {
                base.insert(key.clone(), value.clone());
            }
        }
    }
    base
}

/// Unwrap a JSON object built with `json!`; any other value yields an empty map.
pub(crate) fn into_map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}
