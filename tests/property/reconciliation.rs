//! Property-based tests for import reconciliation and context naming

use proptest::prelude::*;
use trainlog::registry::next_context_name;
use trainlog::training::{Exercise, TrainingDataMap, TrainingForm};
use trainlog::transfer::{reconcile, serialize};

fn arb_name() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Z]",
        (1u32..40).prop_map(|n| format!("Treino {}", n)),
    ]
}

fn arb_ids() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::btree_set(arb_name(), 0..30).prop_map(|set| set.into_iter().collect())
}

fn arb_form() -> impl Strategy<Value = TrainingForm> {
    proptest::collection::vec(
        ("[a-z]{1,8}", proptest::option::of(-40i32..40), proptest::option::of(0u32..200)),
        0..4,
    )
    .prop_map(|rows| TrainingForm {
        trains: rows
            .into_iter()
            .map(|(name, reps, weight)| Exercise {
                name,
                reps: reps.map(|r| f64::from(r) / 2.0),
                series: reps.map(f64::from),
                weight_actual: weight.map(f64::from),
                weight_before: None,
                observations: String::new(),
            })
            .collect(),
    })
}

proptest! {
    #[test]
    fn test_next_name_is_always_fresh(ids in arb_ids()) {
        let next = next_context_name(&ids);
        prop_assert!(!ids.contains(&next));
        prop_assert!(!next.trim().is_empty());
    }

    #[test]
    fn test_reconcile_keys_match_registry(
        registered in arb_ids(),
        payload_ids in arb_ids(),
        form in arb_form(),
    ) {
        let data: TrainingDataMap = payload_ids.iter().map(|id| (id.clone(), form.clone())).collect();
        let raw = serialize(&data).unwrap();

        let result = reconcile(&raw, &registered).unwrap();
        let keys: Vec<&String> = result.keys().collect();
        let mut expected: Vec<&String> = registered.iter().collect();
        expected.sort();
        prop_assert_eq!(keys, expected);

        for (ctx, form_out) in &result {
            if payload_ids.contains(ctx) {
                prop_assert_eq!(form_out, &form);
            } else {
                prop_assert!(form_out.is_empty());
            }
        }
    }

    #[test]
    fn test_export_import_round_trip(ids in arb_ids(), form in arb_form()) {
        let data: TrainingDataMap = ids.iter().map(|id| (id.clone(), form.clone())).collect();
        let raw = serialize(&data).unwrap();
        prop_assert_eq!(reconcile(&raw, &ids).unwrap(), data);
    }
}
