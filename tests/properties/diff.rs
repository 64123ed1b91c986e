//! Property tests for diff.

use proptest::prelude::*;

use super::strategies::node;
use strata::{clone_node, diff_deep, equals_deep, extend_deep, Value};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: A tree has no diff against itself.
    #[test]
    fn property_self_diff_is_empty(base in node()) {
        prop_assert!(diff_deep(&base, &base).is_empty());
    }

    /// PROPERTY: Applying diff(base, changed) to base reproduces changed.
    #[test]
    fn property_diff_then_merge_reproduces(base in node(), overlay in node()) {
        let changed = extend_deep(&clone_node(&base), &[&overlay]);
        let delta = diff_deep(&base, &changed);
        let rebuilt = extend_deep(&clone_node(&base), &[&delta]);
        prop_assert!(equals_deep(&Value::from(rebuilt), &Value::from(changed)));
    }
}
