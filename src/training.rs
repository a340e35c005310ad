//! Training data model
//!
//! One `TrainingForm` per context holds the ordered list of logged exercises.
//! Numeric fields stay nullable so an entry can exist half-filled while it is
//! being edited; `validate` decides whether a form is fit to be saved.

use crate::error::FieldError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identifier of a training context ("A", "B", "Treino 4", ...)
pub type ContextId = String;

/// Mapping from context to its training form; the unit of export and import.
pub type TrainingDataMap = BTreeMap<ContextId, TrainingForm>;

/// One logged exercise entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub name: String,
    pub reps: Option<f64>,
    pub series: Option<f64>,
    pub weight_actual: Option<f64>,
    pub weight_before: Option<f64>,
    pub observations: String,
}

impl Exercise {
    /// Blank entry appended when the user adds an exercise.
    pub fn empty() -> Self {
        Self {
            name: String::new(),
            reps: None,
            series: None,
            weight_actual: None,
            weight_before: None,
            observations: String::new(),
        }
    }

    /// Estimated load of this entry: series × reps × actual weight, nulls as 0.
    pub fn volume(&self) -> f64 {
        self.series.unwrap_or(0.0) * self.reps.unwrap_or(0.0) * self.weight_actual.unwrap_or(0.0)
    }

    /// Actual weight minus prior weight.
    ///
    /// A missing actual weight counts as 0. A missing prior weight is replaced
    /// by the actual weight, so an entry with no history reports no change.
    pub fn progress_delta(&self) -> f64 {
        let actual = self.weight_actual.unwrap_or(0.0);
        let before = self.weight_before.unwrap_or(actual);
        actual - before
    }

    /// Check the fields required for a saved entry. `index` is the entry's
    /// position in its form and is carried into each error.
    pub fn validate(&self, index: usize) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push(FieldError {
                index,
                field: "name",
                message: "required".to_string(),
            });
        }
        for (field, value, non_negative) in [
            ("reps", self.reps, true),
            ("series", self.series, true),
            ("weightActual", self.weight_actual, false),
            ("weightBefore", self.weight_before, false),
        ] {
            let message = match value {
                None => "required",
                Some(v) if !v.is_finite() => "must be a finite number",
                Some(v) if non_negative && v < 0.0 => "must not be negative",
                Some(_) => continue,
            };
            errors.push(FieldError {
                index,
                field,
                message: message.to_string(),
            });
        }
        errors
    }
}

impl Default for Exercise {
    fn default() -> Self {
        Self::empty()
    }
}

/// Persisted exercise list of one context
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingForm {
    pub trains: Vec<Exercise>,
}

impl TrainingForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an empty exercise and return its index.
    pub fn add_exercise(&mut self) -> usize {
        self.trains.push(Exercise::empty());
        self.trains.len() - 1
    }

    /// Remove the entry at `index`, keeping the order of the rest.
    pub fn remove_exercise(&mut self, index: usize) -> Option<Exercise> {
        if index < self.trains.len() {
            Some(self.trains.remove(index))
        } else {
            None
        }
    }

    pub fn is_empty(&self) -> bool {
        self.trains.is_empty()
    }

    pub fn len(&self) -> usize {
        self.trains.len()
    }

    /// Validate every entry; an empty form is valid.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let errors: Vec<FieldError> = self
            .trains
            .iter()
            .enumerate()
            .flat_map(|(i, exercise)| exercise.validate(i))
            .collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Data map with an empty form for each of `context_ids`.
pub fn empty_data(context_ids: &[ContextId]) -> TrainingDataMap {
    context_ids
        .iter()
        .map(|id| (id.clone(), TrainingForm::new()))
        .collect()
}
