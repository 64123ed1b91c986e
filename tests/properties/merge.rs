//! Property tests for deep merge.

use proptest::prelude::*;

use super::strategies::node;
use strata::{clone_node, equals_deep, extend_deep, Node, Value};

/// Every leaf of `overlay` is present in `merged`; nodes recurse.
fn covers(merged: &Node, overlay: &Node) -> bool {
    overlay.entries().into_iter().all(|(key, value)| match (merged.get(&key), &value) {
        (Some(Value::Node(m)), Value::Node(o)) => covers(&m, o),
        (Some(found), _) => equals_deep(&found, &value),
        (None, _) => false,
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: The overlay always wins where it has a value.
    #[test]
    fn property_overlay_wins(base in node(), overlay in node()) {
        let merged = extend_deep(&clone_node(&base), &[&overlay]);
        prop_assert!(covers(&merged, &overlay));
    }

    /// PROPERTY: Keys only the base has survive untouched.
    #[test]
    fn property_base_only_keys_survive(base in node(), overlay in node()) {
        let merged = extend_deep(&clone_node(&base), &[&overlay]);
        for (key, value) in base.entries() {
            if !overlay.contains_key(&key) {
                prop_assert!(equals_deep(&merged.get(&key).unwrap(), &value));
            }
        }
    }

    /// PROPERTY: Merging a tree into a copy of itself changes nothing.
    #[test]
    fn property_self_merge_is_identity(base in node()) {
        let merged = extend_deep(&clone_node(&base), &[&base]);
        prop_assert!(equals_deep(&Value::from(merged), &Value::from(base)));
    }

    /// PROPERTY: Merging never modifies the source layers.
    #[test]
    fn property_sources_are_untouched(base in node(), overlay in node()) {
        let before = clone_node(&overlay);
        let merged = extend_deep(&clone_node(&base), &[&overlay]);
        let _ = merged.set("zz-new", 1);
        prop_assert!(equals_deep(&Value::from(overlay), &Value::from(before)));
    }
}
