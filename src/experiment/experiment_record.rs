//! Experiment Record - one parsed quantum job result

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Placeholder used for a missing job id or backend name.
pub const UNKNOWN: &str = "Unknown";

/// Label of the default dominant state when the file does not name one.
pub const DEFAULT_DOMINANT_LABEL: &str = "0000";

/// Observation count for one measured state label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StateCount {
    /// Fixed-width bitstring, e.g. `"0101"`
    pub label: String,
    /// Number of shots that produced this label
    pub count: u64,
}

impl StateCount {
    /// Create a state count.
    #[must_use]
    pub fn new(label: impl Into<String>, count: u64) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

/// Most probable state of a run, as reported by the source file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DominantState {
    /// State label
    pub label: String,
    /// Probability of the state
    pub probability: f64,
}

impl DominantState {
    /// Create a dominant state pair.
    #[must_use]
    pub fn new(label: impl Into<String>, probability: f64) -> Self {
        Self {
            label: label.into(),
            probability,
        }
    }
}

impl Default for DominantState {
    fn default() -> Self {
        Self::new(DEFAULT_DOMINANT_LABEL, 0.0)
    }
}

/// Experiment Record represents one loaded result file.
///
/// Records are immutable: all fields are private and only exposed through
/// getters. Scalar metrics are taken from the file as-is and never
/// recomputed or clamped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExperimentRecord {
    name: String,
    job_id: String,
    backend: String,
    shots: u64,
    execution_time: f64,
    circuit_depth: u64,
    raw_counts: Vec<StateCount>,
    shannon_entropy: f64,
    coherence_score: f64,
    qhrf_signature_strength: f64,
    classical_suppression: f64,
    dominant_state: DominantState,
    unique_states: u64,
    parity_balance: f64,
    participation_ratio: f64,
    file_path: PathBuf,
}

impl ExperimentRecord {
    /// Create a builder with every optional field at its default.
    ///
    /// # Arguments
    ///
    /// * `name` - Display name
    /// * `file_path` - File the record was loaded from
    #[must_use]
    pub fn builder(name: impl Into<String>, file_path: impl Into<PathBuf>) -> ExperimentRecordBuilder {
        ExperimentRecordBuilder::new(name, file_path)
    }

    /// Get the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the job id (`"Unknown"` when absent).
    #[must_use]
    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    /// Get the backend name (`"Unknown"` when absent).
    #[must_use]
    pub fn backend(&self) -> &str {
        &self.backend
    }

    /// Get the configured shot count.
    #[must_use]
    pub const fn shots(&self) -> u64 {
        self.shots
    }

    /// Get the execution time in seconds.
    #[must_use]
    pub const fn execution_time(&self) -> f64 {
        self.execution_time
    }

    /// Get the circuit depth.
    #[must_use]
    pub const fn circuit_depth(&self) -> u64 {
        self.circuit_depth
    }

    /// Get the outcome counts in file order.
    #[must_use]
    pub fn raw_counts(&self) -> &[StateCount] {
        &self.raw_counts
    }

    /// Count for a label, zero if it was never observed.
    #[must_use]
    pub fn count_of(&self, label: &str) -> u64 {
        self.raw_counts
            .iter()
            .find(|s| s.label == label)
            .map_or(0, |s| s.count)
    }

    /// Sum of all observed counts. May be below [`Self::shots`].
    ///
    /// Saturates at `u64::MAX`; parsed records never reach it.
    #[must_use]
    pub fn total_counts(&self) -> u64 {
        self.raw_counts
            .iter()
            .fold(0u64, |total, s| total.saturating_add(s.count))
    }

    /// Observed probability of a label (count / total counts).
    ///
    /// Returns 0.0 when nothing was observed.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn probability_of(&self, label: &str) -> f64 {
        let total = self.total_counts();
        if total == 0 {
            return 0.0;
        }
        self.count_of(label) as f64 / total as f64
    }

    /// Get the Shannon entropy in bits.
    #[must_use]
    pub const fn shannon_entropy(&self) -> f64 {
        self.shannon_entropy
    }

    /// Get the coherence score.
    #[must_use]
    pub const fn coherence_score(&self) -> f64 {
        self.coherence_score
    }

    /// Get the QHRF signature strength.
    #[must_use]
    pub const fn qhrf_signature_strength(&self) -> f64 {
        self.qhrf_signature_strength
    }

    /// Get the classical suppression.
    #[must_use]
    pub const fn classical_suppression(&self) -> f64 {
        self.classical_suppression
    }

    /// Get the dominant state reported by the file.
    #[must_use]
    pub const fn dominant_state(&self) -> &DominantState {
        &self.dominant_state
    }

    /// Get the number of distinct observed labels reported by the file.
    #[must_use]
    pub const fn unique_states(&self) -> u64 {
        self.unique_states
    }

    /// Get the parity balance.
    #[must_use]
    pub const fn parity_balance(&self) -> f64 {
        self.parity_balance
    }

    /// Get the participation ratio.
    #[must_use]
    pub const fn participation_ratio(&self) -> f64 {
        self.participation_ratio
    }

    /// Get the source file path.
    #[must_use]
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// List label shown by front ends: `name (backend)`.
    #[must_use]
    pub fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.backend)
    }
}

/// Builder for `ExperimentRecord`.
#[derive(Debug)]
pub struct ExperimentRecordBuilder {
    record: ExperimentRecord,
}

impl ExperimentRecordBuilder {
    /// Create a new builder with required fields.
    #[must_use]
    pub fn new(name: impl Into<String>, file_path: impl Into<PathBuf>) -> Self {
        Self {
            record: ExperimentRecord {
                name: name.into(),
                job_id: UNKNOWN.to_string(),
                backend: UNKNOWN.to_string(),
                shots: 0,
                execution_time: 0.0,
                circuit_depth: 0,
                raw_counts: Vec::new(),
                shannon_entropy: 0.0,
                coherence_score: 0.0,
                qhrf_signature_strength: 0.0,
                classical_suppression: 0.0,
                dominant_state: DominantState::default(),
                unique_states: 0,
                parity_balance: 0.0,
                participation_ratio: 0.0,
                file_path: file_path.into(),
            },
        }
    }

    /// Set the job id.
    #[must_use]
    pub fn job_id(mut self, job_id: impl Into<String>) -> Self {
        self.record.job_id = job_id.into();
        self
    }

    /// Set the backend name.
    #[must_use]
    pub fn backend(mut self, backend: impl Into<String>) -> Self {
        self.record.backend = backend.into();
        self
    }

    /// Set the shot count.
    #[must_use]
    pub const fn shots(mut self, shots: u64) -> Self {
        self.record.shots = shots;
        self
    }

    /// Set the execution time in seconds.
    #[must_use]
    pub const fn execution_time(mut self, seconds: f64) -> Self {
        self.record.execution_time = seconds;
        self
    }

    /// Set the circuit depth.
    #[must_use]
    pub const fn circuit_depth(mut self, depth: u64) -> Self {
        self.record.circuit_depth = depth;
        self
    }

    /// Set the outcome counts (order is kept).
    #[must_use]
    pub fn raw_counts(mut self, counts: Vec<StateCount>) -> Self {
        self.record.raw_counts = counts;
        self
    }

    /// Append one outcome count.
    #[must_use]
    pub fn count(mut self, label: impl Into<String>, count: u64) -> Self {
        self.record.raw_counts.push(StateCount::new(label, count));
        self
    }

    /// Set the Shannon entropy.
    #[must_use]
    pub const fn shannon_entropy(mut self, bits: f64) -> Self {
        self.record.shannon_entropy = bits;
        self
    }

    /// Set the coherence score.
    #[must_use]
    pub const fn coherence_score(mut self, score: f64) -> Self {
        self.record.coherence_score = score;
        self
    }

    /// Set the QHRF signature strength.
    #[must_use]
    pub const fn qhrf_signature_strength(mut self, strength: f64) -> Self {
        self.record.qhrf_signature_strength = strength;
        self
    }

    /// Set the classical suppression.
    #[must_use]
    pub const fn classical_suppression(mut self, suppression: f64) -> Self {
        self.record.classical_suppression = suppression;
        self
    }

    /// Set the dominant state.
    #[must_use]
    pub fn dominant_state(mut self, label: impl Into<String>, probability: f64) -> Self {
        self.record.dominant_state = DominantState::new(label, probability);
        self
    }

    /// Set the number of distinct observed labels.
    #[must_use]
    pub const fn unique_states(mut self, unique: u64) -> Self {
        self.record.unique_states = unique;
        self
    }

    /// Set the parity balance.
    #[must_use]
    pub const fn parity_balance(mut self, balance: f64) -> Self {
        self.record.parity_balance = balance;
        self
    }

    /// Set the participation ratio.
    #[must_use]
    pub const fn participation_ratio(mut self, ratio: f64) -> Self {
        self.record.participation_ratio = ratio;
        self
    }

    /// Build the `ExperimentRecord`.
    #[must_use]
    pub fn build(self) -> ExperimentRecord {
        self.record
    }
}
