//! Configuration merge logic
//!
//! Merges user options onto the built-in defaults:
//! - Objects: deep-merge by key
//! - Arrays: REPLACE (last wins)
//! - Scalars: override (last wins)
//!
//! `linters` never goes through this merge; it replaces the default wholesale.

use super::value::RawValue;

/// Deep merge two raw values.
///
/// Merge semantics:
/// - Objects: deep-merge by key (recursive), base key order first
/// - Arrays: REPLACE (second wins entirely)
/// - Scalars and functions: override (second wins)
/// - Null: override (null can override any value)
pub fn deep_merge(base: RawValue, overlay: RawValue) -> RawValue {
    match (base, overlay) {
        (RawValue::Object(mut base_map), RawValue::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                let merged = match base_map.get_mut(&key) {
                    Some(slot) => {
                        let base_value = std::mem::replace(slot, RawValue::Null);
                        deep_merge(base_value, overlay_value)
                    }
                    None => overlay_value,
                };
                base_map.insert(key, merged);
            }
            RawValue::Object(base_map)
        }

        (_, overlay) => overlay,
    }
}

/// Merge multiple layers in order (first is base, last has highest precedence)
pub fn merge_layers(layers: Vec<RawValue>) -> RawValue {
    layers.into_iter().fold(RawValue::Null, deep_merge)
}
