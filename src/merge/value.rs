//! Deep merge for configuration values
//!
//! Nested mappings merge key-by-key with the newer side winning at equal
//! leaf paths; every non-mapping value (scalars and sequences alike)
//! overwrites wholesale.

use serde_json::Value as JsonValue;

/// Deep-merge `new` onto `existing`
pub fn merge_value_deep(existing: JsonValue, new: JsonValue) -> JsonValue {
    match (existing, new) {
        (JsonValue::Object(mut existing_map), JsonValue::Object(new_map)) => {
            for (key, new_value) in new_map {
                let merged_value = match existing_map.remove(&key) {
                    Some(existing_value) => merge_value_deep(existing_value, new_value),
                    None => new_value,
                };
                existing_map.insert(key, merged_value);
            }
            JsonValue::Object(existing_map)
        }
        // Non-mapping values (including arrays) overwrite wholesale
        (_, new) => new,
    }
}
