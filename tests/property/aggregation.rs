//! Property-based tests for dashboard aggregates

use proptest::prelude::*;
use trainlog::summary::{summarize, summarize_progress};
use trainlog::training::{Exercise, TrainingDataMap, TrainingForm};

fn arb_exercise() -> impl Strategy<Value = Exercise> {
    (
        proptest::option::of(0u32..100).prop_map(|r| r.map(|r| f64::from(r) / 2.0)),
        proptest::option::of(0u32..10).prop_map(|s| s.map(f64::from)),
        proptest::option::of(0u32..4000).prop_map(|w| w.map(|w| f64::from(w) / 4.0)),
        proptest::option::of(0u32..4000).prop_map(|w| w.map(|w| f64::from(w) / 4.0)),
    )
        .prop_map(|(reps, series, weight_actual, weight_before)| Exercise {
            name: "x".to_string(),
            reps,
            series,
            weight_actual,
            weight_before,
            observations: String::new(),
        })
}

fn arb_data() -> impl Strategy<Value = (Vec<String>, TrainingDataMap)> {
    proptest::collection::vec(proptest::collection::vec(arb_exercise(), 0..6), 0..5).prop_map(
        |forms| {
            let ids: Vec<String> = (0..forms.len())
                .map(|i| char::from(b'A' + i as u8).to_string())
                .collect();
            let data = ids
                .iter()
                .cloned()
                .zip(forms.into_iter().map(|trains| TrainingForm { trains }))
                .collect();
            (ids, data)
        },
    )
}

proptest! {
    #[test]
    fn test_totals_equal_sum_of_rows((ids, data) in arb_data()) {
        let summary = summarize(&ids, &data);
        prop_assert_eq!(summary.per_context.len(), ids.len());

        let exercises: u64 = summary.per_context.iter().map(|r| r.exercises).sum();
        let series: f64 = summary.per_context.iter().map(|r| r.series).sum();
        let reps: f64 = summary.per_context.iter().map(|r| r.reps).sum();
        let volume: f64 = summary.per_context.iter().map(|r| r.volume).sum();
        prop_assert_eq!(summary.totals.exercises, exercises);
        prop_assert!((summary.totals.series - series).abs() < 1e-9);
        prop_assert!((summary.totals.reps - reps).abs() < 1e-9);
        prop_assert!((summary.totals.volume - volume).abs() < 1e-6);
    }

    #[test]
    fn test_trend_counts_partition_entries((ids, data) in arb_data()) {
        let report = summarize_progress(&ids, &data);
        for row in &report.per_context {
            prop_assert_eq!(row.improved + row.regressed + row.unchanged, row.exercises);
        }
        let t = &report.totals;
        prop_assert_eq!(t.improved + t.regressed + t.unchanged, t.exercises);
        if t.exercises == 0 {
            prop_assert_eq!(t.avg_delta, 0.0);
        } else {
            prop_assert!((t.avg_delta * t.exercises as f64 - t.total_delta).abs() < 1e-6);
        }
    }

    #[test]
    fn test_missing_history_never_counts_as_progress(actual in proptest::option::of(0u32..400)) {
        let exercise = Exercise {
            weight_actual: actual.map(f64::from),
            weight_before: None,
            ..Exercise::empty()
        };
        prop_assert_eq!(exercise.progress_delta(), 0.0);
    }
}
