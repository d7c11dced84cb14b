//! Prop merging.

use std::collections::BTreeMap;

use quire_content::Attrs;

/// Named inputs passed to a renderer.
pub type Props = Attrs;

/// Fold `overrides` over `base`, left to right.
///
/// A key present in a later override replaces any earlier value; keys absent
/// from every override keep the base value. Inputs are left untouched.
pub fn merge<K, V>(base: &BTreeMap<K, V>, overrides: &[&BTreeMap<K, V>]) -> BTreeMap<K, V>
where
    K: Ord + Clone,
    V: Clone,
{
    let mut combined = base.clone();
    for layer in overrides {
        for (key, value) in layer.iter() {
            combined.insert(key.clone(), value.clone());
        }
    }
    combined
}
