//! Single-run QHRF assessment
//!
//! Six fixed pass/fail criteria, a success rate and a qualitative tier.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::experiment::ExperimentRecord;

/// Entropy ceiling in bits for a 4-qubit system (log2 of 16 states).
pub const ENTROPY_CEILING_BITS: f64 = 4.0;

/// Number of distinct labels in a 4-qubit state space.
pub const STATE_SPACE_SIZE: u64 = 16;

/// Shannon entropy must exceed this many bits.
pub const ENTROPY_THRESHOLD: f64 = 3.0;
/// Coherence score must exceed this.
pub const COHERENCE_THRESHOLD: f64 = 0.3;
/// Signature strength must exceed this.
pub const SIGNATURE_THRESHOLD: f64 = 0.4;
/// Dominant-state probability must exceed this.
pub const DOMINANCE_THRESHOLD: f64 = 0.2;
/// Classical suppression must exceed this.
pub const SUPPRESSION_THRESHOLD: f64 = 0.9;

/// Fraction of the 4-bit entropy ceiling reached by a run.
///
/// ```rust
/// use qhrf_analyzer::metrics::entropy_efficiency;
/// assert_eq!(entropy_efficiency(3.2), 0.8);
/// ```
#[must_use]
pub fn entropy_efficiency(shannon_entropy: f64) -> f64 {
    shannon_entropy / ENTROPY_CEILING_BITS
}

/// One of the six assessment criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Criterion {
    /// Shannon entropy > 3.0
    Entropy,
    /// Coherence score > 0.3
    Coherence,
    /// QHRF signature strength > 0.4
    Signature,
    /// Dominant-state probability > 0.2
    Dominance,
    /// Classical suppression > 0.9
    Suppression,
    /// All 16 states observed
    StateCoverage,
}

impl Criterion {
    /// All criteria in display order.
    pub const ALL: [Self; 6] = [
        Self::Entropy,
        Self::Coherence,
        Self::Signature,
        Self::Dominance,
        Self::Suppression,
        Self::StateCoverage,
    ];

    /// Human-readable description, e.g. `Shannon Entropy > 3.0`.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Entropy => "Shannon Entropy > 3.0",
            Self::Coherence => "Coherence Score > 0.3",
            Self::Signature => "QHRF Signature > 0.4",
            Self::Dominance => "|0101> Dominance > 0.2",
            Self::Suppression => "Classical Suppression > 0.9",
            Self::StateCoverage => "All 16 States Observed",
        }
    }

    /// Evaluate this criterion against a record.
    #[must_use]
    pub fn evaluate(self, record: &ExperimentRecord) -> bool {
        match self {
            Self::Entropy => record.shannon_entropy() > ENTROPY_THRESHOLD,
            Self::Coherence => record.coherence_score() > COHERENCE_THRESHOLD,
            Self::Signature => record.qhrf_signature_strength() > SIGNATURE_THRESHOLD,
            Self::Dominance => record.dominant_state().probability > DOMINANCE_THRESHOLD,
            Self::Suppression => record.classical_suppression() > SUPPRESSION_THRESHOLD,
            Self::StateCoverage => record.unique_states() == STATE_SPACE_SIZE,
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Qualitative tier shared by assessments and reproducibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Lowest tier
    Moderate,
    /// Middle tier
    Good,
    /// Highest tier
    Excellent,
}

impl Tier {
    /// Tier name in lowercase.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Moderate => "moderate",
            Self::Good => "good",
            Self::Excellent => "excellent",
        }
    }

    /// Tier for a success rate in percent: >= 90 excellent, >= 75 good.
    #[must_use]
    pub fn from_success_rate(rate: f64) -> Self {
        if rate >= 90.0 {
            Self::Excellent
        } else if rate >= 75.0 {
            Self::Good
        } else {
            Self::Moderate
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pass/fail outcome of one criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionResult {
    /// Which criterion
    pub criterion: Criterion,
    /// Whether the record passed it
    pub passed: bool,
}

/// Full assessment of one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    results: Vec<CriterionResult>,
    entropy_efficiency: f64,
}

impl Assessment {
    /// Evaluate all six criteria against a record.
    #[must_use]
    pub fn evaluate(record: &ExperimentRecord) -> Self {
        let results = Criterion::ALL
            .iter()
            .map(|&criterion| CriterionResult {
                criterion,
                passed: criterion.evaluate(record),
            })
            .collect();
        Self {
            results,
            entropy_efficiency: entropy_efficiency(record.shannon_entropy()),
        }
    }

    /// Per-criterion outcomes in display order.
    #[must_use]
    pub fn results(&self) -> &[CriterionResult] {
        &self.results
    }

    /// Whether a given criterion passed.
    #[must_use]
    pub fn passed(&self, criterion: Criterion) -> bool {
        self.results
            .iter()
            .any(|r| r.criterion == criterion && r.passed)
    }

    /// Number of criteria passed.
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.results.iter().filter(|r| r.passed).count()
    }

    /// Number of criteria evaluated (always 6).
    #[must_use]
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// Percentage of criteria passed.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn success_rate(&self) -> f64 {
        self.passed_count() as f64 / self.total() as f64 * 100.0
    }

    /// Tier derived from the success rate.
    #[must_use]
    pub fn tier(&self) -> Tier {
        Tier::from_success_rate(self.success_rate())
    }

    /// Entropy efficiency of the assessed record.
    #[must_use]
    pub const fn entropy_efficiency(&self) -> f64 {
        self.entropy_efficiency
    }
}
