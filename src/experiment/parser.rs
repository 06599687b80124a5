//! Experiment Record Parser - JSON document to `ExperimentRecord`
//!
//! The parser is permissive: every recognized key is optional and takes a
//! documented default when absent or `null`. Only a non-object document or
//! a present key of the wrong type is a [`Error::ParseFailure`].

use std::path::Path;

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use super::experiment_record::{DominantState, StateCount, UNKNOWN};
use super::ExperimentRecord;
use crate::config::AnalyzerConfig;
use crate::{Error, Result};

/// Experiment fields as they appear in a result file.
///
/// Field defaults (applied when a key is absent or `null`):
///
/// | key                       | default            |
/// |---------------------------|--------------------|
/// | `job_id`                  | absent (`"Unknown"` on the record, file name for display) |
/// | `backend_name`            | `"Unknown"`        |
/// | `shots`                   | `0`                |
/// | `execution_time`          | `0.0`              |
/// | `circuit_depth`           | `0`                |
/// | `raw_counts`              | empty              |
/// | `shannon_entropy`         | `0.0`              |
/// | `coherence_score`         | `0.0`              |
/// | `qhrf_signature_strength` | `0.0`              |
/// | `classical_suppression`   | `0.0`              |
/// | `dominant_state`          | `["0000", 0.0]`    |
/// | `unique_states`           | `0`                |
/// | `parity_balance`          | `0.0`              |
/// | `participation_ratio`     | `0.0`              |
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExperimentDocument {
    /// Job identifier
    pub job_id: Option<String>,
    /// Backend the job ran on
    #[serde(deserialize_with = "null_as_unknown")]
    pub backend_name: String,
    /// Configured shot count
    #[serde(deserialize_with = "null_as_default")]
    pub shots: u64,
    /// Wall-clock execution time in seconds
    #[serde(deserialize_with = "null_as_default")]
    pub execution_time: f64,
    /// Transpiled circuit depth
    #[serde(deserialize_with = "null_as_default")]
    pub circuit_depth: u64,
    /// Label to count mapping, in file order
    #[serde(deserialize_with = "null_as_default")]
    pub raw_counts: Map<String, Value>,
    /// Shannon entropy in bits
    #[serde(deserialize_with = "null_as_default")]
    pub shannon_entropy: f64,
    /// Coherence score
    #[serde(deserialize_with = "null_as_default")]
    pub coherence_score: f64,
    /// QHRF signature strength
    #[serde(deserialize_with = "null_as_default")]
    pub qhrf_signature_strength: f64,
    /// Classical suppression
    #[serde(deserialize_with = "null_as_default")]
    pub classical_suppression: f64,
    /// `[label, probability]`
    pub dominant_state: Option<(String, f64)>,
    /// Number of distinct observed labels
    #[serde(deserialize_with = "null_as_default")]
    pub unique_states: u64,
    /// Parity balance
    #[serde(deserialize_with = "null_as_default")]
    pub parity_balance: f64,
    /// Participation ratio
    #[serde(deserialize_with = "null_as_default")]
    pub participation_ratio: f64,
}

impl Default for ExperimentDocument {
    fn default() -> Self {
        Self {
            job_id: None,
            backend_name: UNKNOWN.to_string(),
            shots: 0,
            execution_time: 0.0,
            circuit_depth: 0,
            raw_counts: Map::new(),
            shannon_entropy: 0.0,
            coherence_score: 0.0,
            qhrf_signature_strength: 0.0,
            classical_suppression: 0.0,
            dominant_state: None,
            unique_states: 0,
            parity_balance: 0.0,
            participation_ratio: 0.0,
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_unknown<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(|| UNKNOWN.to_string()))
}

impl ExperimentDocument {
    /// Read the document out of a JSON value, unwrapping `wrapper_key` if
    /// the top level contains it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ParseFailure`] if the (unwrapped) value is not an
    /// object or a present key has the wrong type.
    pub fn from_value(value: &Value, wrapper_key: &str) -> Result<Self> {
        let top = value.as_object().ok_or_else(|| {
            Error::ParseFailure(format!(
                "expected a JSON object at the top level, found {}",
                json_kind(value)
            ))
        })?;

        let fields = match top.get(wrapper_key) {
            Some(inner) => inner.as_object().ok_or_else(|| {
                Error::ParseFailure(format!(
                    "expected `{wrapper_key}` to be an object, found {}",
                    json_kind(inner)
                ))
            })?,
            None => top,
        };

        Self::deserialize(Value::Object(fields.clone()))
            .map_err(|e| Error::ParseFailure(e.to_string()))
    }

    fn state_counts(&self) -> Result<Vec<StateCount>> {
        let counts: Vec<StateCount> = self
            .raw_counts
            .iter()
            .map(|(label, count)| {
                count
                    .as_u64()
                    .map(|count| StateCount::new(label.clone(), count))
                    .ok_or_else(|| {
                        Error::ParseFailure(format!(
                            "raw_counts[{label:?}] must be a non-negative integer, found {count}"
                        ))
                    })
            })
            .collect::<Result<_>>()?;

        counts
            .iter()
            .try_fold(0u64, |total, s| total.checked_add(s.count))
            .ok_or_else(|| {
                Error::ParseFailure("raw_counts total does not fit in 64 bits".to_string())
            })?;
        Ok(counts)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Display name: the first `name_length` characters of the job id, or of
/// the file's base name when the document has no job id.
#[must_use]
pub fn display_name(job_id: Option<&str>, path: &Path, name_length: usize) -> String {
    let base = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    job_id
        .unwrap_or(&*base)
        .chars()
        .take(name_length)
        .collect()
}

/// Parse an experiment record from a JSON value.
///
/// # Arguments
///
/// * `value` - Parsed JSON document
/// * `path` - File the document came from (provenance and fallback name)
/// * `config` - Wrapper key and display-name length
///
/// # Errors
///
/// Returns [`Error::ParseFailure`] with a readable cause if the document is
/// not an object or a field cannot be read.
///
/// # Example
///
/// ```rust
/// use std::path::Path;
/// use qhrf_analyzer::config::AnalyzerConfig;
/// use qhrf_analyzer::experiment::parse_experiment;
///
/// let doc = serde_json::json!({
///     "experiment_result": {"job_id": "d0x9k2m4p7q1r5s8", "coherence_score": 0.41}
/// });
/// let record = parse_experiment(&doc, Path::new("run.json"), &AnalyzerConfig::default())?;
/// assert_eq!(record.name(), "d0x9k2m4p7q1");
/// assert_eq!(record.backend(), "Unknown");
/// # Ok::<(), qhrf_analyzer::Error>(())
/// ```
pub fn parse_experiment(
    value: &Value,
    path: &Path,
    config: &AnalyzerConfig,
) -> Result<ExperimentRecord> {
    let doc = ExperimentDocument::from_value(value, &config.wrapper_key)?;
    let counts = doc.state_counts()?;
    let name = display_name(doc.job_id.as_deref(), path, config.name_length);
    let dominant = doc
        .dominant_state
        .map(|(label, p)| DominantState::new(label, p))
        .unwrap_or_default();

    Ok(ExperimentRecord::builder(name, path)
        .job_id(doc.job_id.unwrap_or_else(|| UNKNOWN.to_string()))
        .backend(doc.backend_name)
        .shots(doc.shots)
        .execution_time(doc.execution_time)
        .circuit_depth(doc.circuit_depth)
        .raw_counts(counts)
        .shannon_entropy(doc.shannon_entropy)
        .coherence_score(doc.coherence_score)
        .qhrf_signature_strength(doc.qhrf_signature_strength)
        .classical_suppression(doc.classical_suppression)
        .dominant_state(dominant.label, dominant.probability)
        .unique_states(doc.unique_states)
        .parity_balance(doc.parity_balance)
        .participation_ratio(doc.participation_ratio)
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: &Value) -> Result<ExperimentRecord> {
        parse_experiment(value, Path::new("/data/run_a.json"), &AnalyzerConfig::default())
    }

    #[test]
    fn test_empty_object_takes_defaults() {
        let record = parse(&json!({})).unwrap();
        assert_eq!(record.name(), "run_a.json");
        assert_eq!(record.job_id(), "Unknown");
        assert_eq!(record.backend(), "Unknown");
        assert_eq!(record.shots(), 0);
        assert_eq!(record.dominant_state(), &DominantState::new("0000", 0.0));
        assert!(record.raw_counts().is_empty());
    }

    #[test]
    fn test_null_fields_take_defaults() {
        let record = parse(&json!({"backend_name": null, "shots": null, "dominant_state": null}))
            .unwrap();
        assert_eq!(record.backend(), "Unknown");
        assert_eq!(record.shots(), 0);
        assert_eq!(record.dominant_state().label, "0000");
    }

    #[test]
    fn test_non_object_is_parse_failure() {
        for value in [json!([1, 2]), json!("text"), json!(3), json!(null)] {
            assert!(matches!(parse(&value), Err(Error::ParseFailure(_))));
        }
    }

    #[test]
    fn test_wrapped_non_object_is_parse_failure() {
        let err = parse(&json!({"experiment_result": [1]})).unwrap_err();
        assert!(err.to_string().contains("experiment_result"));
    }

    #[test]
    fn test_wrong_field_type_is_parse_failure() {
        assert!(matches!(
            parse(&json!({"shots": "many"})),
            Err(Error::ParseFailure(_))
        ));
        assert!(matches!(
            parse(&json!({"raw_counts": {"0101": -3}})),
            Err(Error::ParseFailure(_))
        ));
    }

    #[test]
    fn test_raw_counts_keep_file_order() {
        let record = parse(&json!({"raw_counts": {"1111": 5, "0000": 7, "0101": 9}})).unwrap();
        let labels: Vec<&str> = record.raw_counts().iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, ["1111", "0000", "0101"]);
    }

    #[test]
    fn test_display_name_truncates_by_chars() {
        let name = display_name(Some("ÅBCDEFGHIJKLMNOP"), Path::new("x.json"), 12);
        assert_eq!(name, "ÅBCDEFGHIJKL");
    }

    #[test]
    fn test_display_name_truncates_file_name() {
        let name = display_name(None, Path::new("/d/qhrf_run_with_a_long_name.json"), 12);
        assert_eq!(name, "qhrf_run_wit");
        assert_eq!(display_name(None, Path::new("/d/a.json"), 12), "a.json");
    }

    #[test]
    fn test_total_overflow_is_parse_failure() {
        let result = parse(&json!({"raw_counts": {"0101": u64::MAX, "0000": 1}}));
        assert!(matches!(result, Err(Error::ParseFailure(_))));
    }

    #[test]
    fn test_short_job_id_is_kept_whole() {
        let record = parse(&json!({"job_id": "abc"})).unwrap();
        assert_eq!(record.name(), "abc");
        assert_eq!(record.job_id(), "abc");
    }
}
