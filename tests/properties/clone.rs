//! Property tests for deep clone and freezing.

use proptest::prelude::*;

use super::strategies::node;
use strata::{clone_node, equals_deep, make_immutable, Value};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: A clone is equal to, but never the same handle as, its source.
    #[test]
    fn property_clone_is_equal_and_detached(original in node()) {
        let copy = clone_node(&original);
        prop_assert!(!copy.ptr_eq(&original));
        prop_assert!(equals_deep(&Value::from(copy.clone()), &Value::from(original.clone())));

        let _ = copy.set("zz-new", true);
        prop_assert!(!original.contains_key("zz-new"));
    }

    /// PROPERTY: Freezing is idempotent and rejects every write.
    #[test]
    fn property_freeze_is_total(original in node()) {
        let frozen = make_immutable(&make_immutable(&original));
        prop_assert!(frozen.is_frozen());
        prop_assert!(frozen.set("zz-new", 1).is_err());
        for key in frozen.keys() {
            prop_assert!(frozen.set(key, Value::Null).is_err());
        }
    }
}
