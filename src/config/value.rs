//! Dotted-path lookup and shallow merge over config documents.
//!
//! Merge semantics are deliberately shallow: only top-level keys are
//! considered, and an overlay value replaces the base value wholesale,
//! nested collections included. A partial on-disk `site` object therefore
//! wins over the default `site` subtree rather than being combined with it.
//! Do not "fix" this into a deep merge; callers depend on the contract.

use serde_json::Value;

/// Structural lookup of a dotted path, e.g. `"workspace.journal"`.
///
/// Returns `None` as soon as any segment is absent or the walk hits a
/// non-object.
pub fn get_path<'a>(config: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = config;
    for part in path.split('.') {
        current = current.get(part)?;
    }
    Some(current)
}

/// Shallow-merge `overlay` over `base`: top-level overlay keys win wholesale.
///
/// Non-object inputs degrade gracefully: an object always wins over a
/// non-object, and two non-objects resolve to the overlay.
pub fn shallow_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                base_map.insert(key, value);
            }
            Value::Object(base_map)
        }
        (base @ Value::Object(_), _) => base,
        (_, overlay) => overlay,
    }
}
