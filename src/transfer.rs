//! Export and import of the full training data map as JSON.
//!
//! Export always writes the envelope `{ "generatedAt": ..., "trains": {...} }`.
//! Import accepts that envelope or a bare `{ "<context>": { "trains": [...] } }`
//! map, and reconciles it against the registry: every registered context is
//! present in the result, unknown contexts are dropped, and missing fields of
//! an entry, or fields of the wrong JSON type, take their empty defaults.

use crate::error::TransferError;
use crate::training::{empty_data, ContextId, Exercise, TrainingDataMap, TrainingForm};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// Export payload
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportEnvelope<'a> {
    generated_at: String,
    trains: &'a TrainingDataMap,
}

/// Accepted import shapes.
///
/// An object whose `trains` member is itself an object is an envelope; any
/// other object is taken as a bare context map.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ImportPayload {
    Envelope { trains: Map<String, Value> },
    BareMap(Map<String, Value>),
}

impl ImportPayload {
    fn into_source(self) -> Map<String, Value> {
        match self {
            ImportPayload::Envelope { trains } => trains,
            ImportPayload::BareMap(map) => map,
        }
    }
}

/// Entry as found in an import payload.
///
/// Every field may be absent, null or of the wrong JSON type; anything that
/// is not usable as-is reads as absent.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ImportedExercise {
    #[serde(deserialize_with = "lenient_text")]
    name: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    reps: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    series: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    weight_actual: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    weight_before: Option<f64>,
    #[serde(deserialize_with = "lenient_text")]
    observations: Option<String>,
}

fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(Value::deserialize(deserializer)?.as_f64())
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        _ => None,
    })
}

impl ImportedExercise {
    /// Read one entry; a non-object entry becomes an empty exercise.
    fn read(item: &Value) -> Self {
        if !item.is_object() {
            return Self::default();
        }
        Self::deserialize(item).unwrap_or_default()
    }
}

impl From<ImportedExercise> for Exercise {
    fn from(item: ImportedExercise) -> Self {
        Exercise {
            name: item.name.unwrap_or_default(),
            reps: item.reps,
            series: item.series,
            weight_actual: item.weight_actual,
            weight_before: item.weight_before,
            observations: item.observations.unwrap_or_default(),
        }
    }
}

/// Serialize `data` into the indented export envelope stamped with now.
pub fn serialize(data: &TrainingDataMap) -> Result<String, TransferError> {
    serialize_at(data, Utc::now())
}

/// Serialize `data` into the export envelope stamped with `generated_at`.
pub fn serialize_at(
    data: &TrainingDataMap,
    generated_at: DateTime<Utc>,
) -> Result<String, TransferError> {
    let envelope = ExportEnvelope {
        generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        trains: data,
    };
    serde_json::to_string_pretty(&envelope).map_err(|e| TransferError::Encode(e.to_string()))
}

/// Parse `raw_text` and reconcile it against `context_ids`.
///
/// The result holds exactly one form per registered context. Nothing is
/// written anywhere; persisting the map is up to the caller.
pub fn reconcile(raw_text: &str, context_ids: &[ContextId]) -> Result<TrainingDataMap, TransferError> {
    let value: Value = serde_json::from_str(raw_text)
        .map_err(|e| TransferError::InvalidPayload(e.to_string()))?;
    if !value.is_object() {
        return Err(TransferError::InvalidPayload(
            "expected a JSON object".to_string(),
        ));
    }
    let payload = ImportPayload::deserialize(value).map_err(|_| {
        TransferError::InvalidPayload("expected a JSON object".to_string())
    })?;
    let source = payload.into_source();

    let mut result = empty_data(context_ids);
    for ctx in context_ids {
        let Some(items) = source
            .get(ctx)
            .and_then(|form| form.get("trains"))
            .and_then(Value::as_array)
        else {
            continue;
        };
        let trains = items
            .iter()
            .map(|item| Exercise::from(ImportedExercise::read(item)))
            .collect();
        result.insert(ctx.clone(), TrainingForm { trains });
    }

    let dropped = source.keys().filter(|k| !context_ids.contains(k)).count();
    if dropped > 0 {
        debug!(dropped, "Import payload contained unregistered contexts");
    }

    Ok(result)
}
