//! Property-based tests for dotted key paths.

use super::{dot, get, has, set};
use proptest::prelude::*;
use serde_json::{json, Value};

// Strategy for generating single key segments
fn segment_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,8}"
}

fn dotted_key_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(segment_strategy(), 1..5).prop_map(|parts| parts.join("."))
}

fn leaf_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[a-zA-Z0-9 ]{0,12}".prop_map(Value::from),
        prop::collection::vec(any::<u8>(), 0..4).prop_map(|items| json!(items)),
    ]
}

fn tree_strategy() -> impl Strategy<Value = Value> {
    leaf_strategy().prop_recursive(3, 32, 6, |inner| {
        prop::collection::btree_map(segment_strategy(), inner, 1..6)
            .prop_map(|map| Value::Object(map.into_iter().collect()))
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        max_shrink_iters: 10000,
        .. ProptestConfig::default()
    })]

    // set then get returns the written value, and has agrees
    #[test]
    fn set_then_get_round_trips(
        tree in tree_strategy(),
        key in dotted_key_strategy(),
        value in leaf_strategy()
    ) {
        let mut tree = tree;
        set(&mut tree, Some(&key), value.clone());
        prop_assert!(has(&tree, Some(&key)));
        prop_assert_eq!(get(&tree, Some(&key), None).unwrap(), &value);
    }

    // Every flattened pair can be read back through its dotted key
    #[test]
    fn dot_keys_resolve_in_source(tree in tree_strategy()) {
        for (key, value) in dot(&tree, "") {
            prop_assert_eq!(get(&tree, Some(&key), None).unwrap(), &value);
        }
    }

    // Rebuilding from flattened pairs gives the same flat view
    #[test]
    fn dot_then_set_preserves_flat_view(tree in tree_strategy()) {
        let mut rebuilt = json!({});
        for (key, value) in dot(&tree, "") {
            set(&mut rebuilt, Some(&key), value);
        }
        prop_assert_eq!(dot(&rebuilt, ""), dot(&tree, ""));
    }

    // Later writes win over earlier ones at the same key
    #[test]
    fn last_write_wins(
        key in dotted_key_strategy(),
        first in leaf_strategy(),
        second in leaf_strategy()
    ) {
        let mut tree = json!({});
        set(&mut tree, Some(&key), first);
        set(&mut tree, Some(&key), second.clone());
        prop_assert_eq!(get(&tree, Some(&key), None).unwrap(), &second);
    }
}
