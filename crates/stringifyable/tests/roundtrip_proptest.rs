use proptest::prelude::*;
use serde_json::Value;
use stringifyable::{
    apply_diff_patch, compute_diff, compute_diff_with, DiffOptions, Stringifyable,
};

fn arb_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-50i64..50).prop_map(Value::from),
        "[a-c~/]{0,3}".prop_map(Value::String),
    ]
}

fn arb_json_value() -> impl Strategy<Value = Value> {
    arb_leaf().prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-d]{1,2}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

proptest! {
    #[test]
    fn prop_no_op_diff_is_empty(doc in arb_json_value()) {
        let t = Stringifyable::from(doc);
        prop_assert!(compute_diff(&t, &t).diff_patch.is_empty());
    }

    #[test]
    fn prop_replay_reproduces_current(before in arb_json_value(), current in arb_json_value()) {
        let before = Stringifyable::from(before);
        let current = Stringifyable::from(current);
        let diff = compute_diff(&before, &current);
        let mut copy = before.clone();
        prop_assert!(apply_diff_patch(&mut copy, &diff.diff_patch).is_ok());
        prop_assert_eq!(copy, current);
    }

    #[test]
    fn prop_unpruned_replay_reproduces_current(before in arb_json_value(), current in arb_json_value()) {
        let before = Stringifyable::from(before);
        let current = Stringifyable::from(current);
        let diff = compute_diff_with(&before, &current, DiffOptions { prune_deleted_subtrees: false });
        let mut copy = before.clone();
        prop_assert!(apply_diff_patch(&mut copy, &diff.diff_patch).is_ok());
        prop_assert_eq!(copy, current);
    }

    #[test]
    fn prop_changes_precede_deletions(before in arb_json_value(), current in arb_json_value()) {
        let diff = compute_diff(&Stringifyable::from(before), &Stringifyable::from(current)).diff_patch;
        let first_delete = diff.iter().position(|e| e.is_delete()).unwrap_or(diff.len());
        prop_assert!(diff[first_delete..].iter().all(|e| e.is_delete()));
    }
}
