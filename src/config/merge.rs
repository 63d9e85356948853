//! Configuration merge logic
//!
//! Layers are merged shallowly, key by key:
//! - Later layers overwrite identically-named keys (last wins)
//! - Nested objects and arrays are replaced whole, never combined
//! - Null overwrites too: a layer that names a key but has no value for it
//!   still clears the earlier value

use serde_json::{Map, Value};

/// Assign every key of `overlay` onto `base`.
///
/// An overwritten key keeps its original position; new keys are appended.
pub fn assign(base: &mut Map<String, Value>, overlay: Map<String, Value>) {
    for (key, value) in overlay {
        base.insert(key, value);
    }
}

/// Merge multiple layers in order (first is base, last has highest precedence)
pub fn merge_layers<I>(layers: I) -> Map<String, Value>
where
    I: IntoIterator<Item = Map<String, Value>>,
{
    layers.into_iter().fold(Map::new(), |mut acc, layer| {
        assign(&mut acc, layer);
        acc
    })
}
