//! Dashboard aggregates over the training data map.
//!
//! Both summaries walk the registry order, visit each context exactly once,
//! and fold the per-context rows into the totals, so totals always equal the
//! sum of the rows.

use crate::training::{ContextId, Exercise, TrainingDataMap};
use serde::{Deserialize, Serialize};

/// Load figures for one context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextSummary {
    pub context: ContextId,
    pub exercises: u64,
    pub series: f64,
    pub reps: f64,
    pub volume: f64,
}

/// Load figures across all contexts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub exercises: u64,
    pub series: f64,
    pub reps: f64,
    pub volume: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub per_context: Vec<ContextSummary>,
    pub totals: Totals,
}

/// Progress figures for one context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub context: ContextId,
    pub exercises: u64,
    pub improved: u64,
    pub regressed: u64,
    pub unchanged: u64,
    pub total_delta: f64,
    pub avg_delta: f64,
}

/// Progress figures across all contexts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressTotals {
    pub exercises: u64,
    pub improved: u64,
    pub regressed: u64,
    pub unchanged: u64,
    pub total_delta: f64,
    pub avg_delta: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressReport {
    pub per_context: Vec<ProgressSummary>,
    pub totals: ProgressTotals,
}

/// Direction of one entry's progress delta
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Improved,
    Regressed,
    Unchanged,
}

impl Trend {
    pub fn of(delta: f64) -> Self {
        if delta > 0.0 {
            Trend::Improved
        } else if delta < 0.0 {
            Trend::Regressed
        } else {
            Trend::Unchanged
        }
    }
}

fn entries<'a>(data: &'a TrainingDataMap, context: &str) -> &'a [Exercise] {
    data.get(context)
        .map(|form| form.trains.as_slice())
        .unwrap_or(&[])
}

fn average(sum: f64, count: u64) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Per-context and overall exercise, series, reps and volume totals.
///
/// Contexts absent from `data` count as empty.
pub fn summarize(context_ids: &[ContextId], data: &TrainingDataMap) -> Summary {
    let per_context: Vec<ContextSummary> = context_ids
        .iter()
        .map(|ctx| {
            let trains = entries(data, ctx);
            ContextSummary {
                context: ctx.clone(),
                exercises: trains.len() as u64,
                series: trains.iter().map(|e| e.series.unwrap_or(0.0)).sum(),
                reps: trains.iter().map(|e| e.reps.unwrap_or(0.0)).sum(),
                volume: trains.iter().map(Exercise::volume).sum(),
            }
        })
        .collect();

    let totals = per_context.iter().fold(Totals::default(), |mut acc, row| {
        acc.exercises += row.exercises;
        acc.series += row.series;
        acc.reps += row.reps;
        acc.volume += row.volume;
        acc
    });

    Summary {
        per_context,
        totals,
    }
}

/// Per-context and overall weight progress.
///
/// The overall average is weighted by entry count: all deltas summed over
/// all entries, not the mean of the per-context averages.
pub fn summarize_progress(context_ids: &[ContextId], data: &TrainingDataMap) -> ProgressReport {
    let per_context: Vec<ProgressSummary> = context_ids
        .iter()
        .map(|ctx| {
            let mut row = ProgressSummary {
                context: ctx.clone(),
                exercises: 0,
                improved: 0,
                regressed: 0,
                unchanged: 0,
                total_delta: 0.0,
                avg_delta: 0.0,
            };
            for exercise in entries(data, ctx) {
                let delta = exercise.progress_delta();
                row.exercises += 1;
                row.total_delta += delta;
                match Trend::of(delta) {
                    Trend::Improved => row.improved += 1,
                    Trend::Regressed => row.regressed += 1,
                    Trend::Unchanged => row.unchanged += 1,
                }
            }
            row.avg_delta = average(row.total_delta, row.exercises);
            row
        })
        .collect();

    let mut totals = per_context
        .iter()
        .fold(ProgressTotals::default(), |mut acc, row| {
            acc.exercises += row.exercises;
            acc.improved += row.improved;
            acc.regressed += row.regressed;
            acc.unchanged += row.unchanged;
            acc.total_delta += row.total_delta;
            acc
        });
    totals.avg_delta = average(totals.total_delta, totals.exercises);

    ProgressReport {
        per_context,
        totals,
    }
}
