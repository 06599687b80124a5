//! Cross-run comparison statistics
//!
//! Mean and population standard deviation of the coherence score and of the
//! `|0101>` dominance across runs, with coefficients of variation and a
//! reproducibility tier.

use serde::{Deserialize, Serialize};

use crate::experiment::ExperimentRecord;
use crate::{Error, Result};

use super::assessment::Tier;
use super::significance::PRIMARY_STATE;

/// Minimum number of records for comparison and timeline analysis.
pub const MIN_COMPARISON_RECORDS: usize = 2;

/// CV below this is an excellent reproducibility.
pub const CV_EXCELLENT: f64 = 0.10;
/// CV below this is a good reproducibility.
pub const CV_GOOD: f64 = 0.20;

/// Refuse multi-record analysis below [`MIN_COMPARISON_RECORDS`].
///
/// # Errors
///
/// Returns [`Error::InsufficientData`] when fewer than two records are given.
pub fn require_records(records: &[ExperimentRecord]) -> Result<()> {
    if records.len() < MIN_COMPARISON_RECORDS {
        return Err(Error::InsufficientData {
            required: MIN_COMPARISON_RECORDS,
            actual: records.len(),
        });
    }
    Ok(())
}

/// Mean and population standard deviation of one series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesStats {
    /// Arithmetic mean
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
}

impl SeriesStats {
    /// Compute stats for a non-empty series. An empty series is all zeros.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self {
                mean: 0.0,
                std_dev: 0.0,
            };
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        Self {
            mean,
            std_dev: variance.sqrt(),
        }
    }

    /// Coefficient of variation (std / mean).
    ///
    /// # Errors
    ///
    /// Returns [`Error::DegenerateStatistics`] naming `metric` when the mean
    /// is zero.
    pub fn coefficient_of_variation(&self, metric: &'static str) -> Result<f64> {
        if self.mean.abs() <= f64::EPSILON {
            return Err(Error::DegenerateStatistics { metric });
        }
        Ok(self.std_dev / self.mean)
    }
}

/// Tier for a coefficient of variation: < 0.10 excellent, < 0.20 good.
#[must_use]
pub fn reproducibility_tier(cv: f64) -> Tier {
    if cv < CV_EXCELLENT {
        Tier::Excellent
    } else if cv < CV_GOOD {
        Tier::Good
    } else {
        Tier::Moderate
    }
}

/// Dominant probability counted only when the dominant label is `0101`.
#[must_use]
pub fn gated_dominance(record: &ExperimentRecord) -> f64 {
    let dominant = record.dominant_state();
    if dominant.label == PRIMARY_STATE {
        dominant.probability
    } else {
        0.0
    }
}

/// Comparison of two or more runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    names: Vec<String>,
    coherence_scores: Vec<f64>,
    entropies: Vec<f64>,
    signature_strengths: Vec<f64>,
    dominance: Vec<f64>,
    coherence: SeriesStats,
    dominance_stats: SeriesStats,
}

/// Metric name used for coherence statistics errors.
pub const COHERENCE_METRIC: &str = "coherence_score";
/// Metric name used for dominance statistics errors.
pub const DOMINANCE_METRIC: &str = "dominant_state_probability";

impl Comparison {
    /// Number of runs compared.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false: [`compare`] refuses fewer than two runs.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Run names in input order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Coherence scores in input order.
    #[must_use]
    pub fn coherence_scores(&self) -> &[f64] {
        &self.coherence_scores
    }

    /// Shannon entropies in input order.
    #[must_use]
    pub fn entropies(&self) -> &[f64] {
        &self.entropies
    }

    /// Signature strengths in input order.
    #[must_use]
    pub fn signature_strengths(&self) -> &[f64] {
        &self.signature_strengths
    }

    /// Gated `|0101>` dominance in input order (0 for other dominant labels).
    #[must_use]
    pub fn dominance(&self) -> &[f64] {
        &self.dominance
    }

    /// Coherence score mean and std.
    #[must_use]
    pub const fn coherence(&self) -> SeriesStats {
        self.coherence
    }

    /// Gated dominance mean and std.
    #[must_use]
    pub const fn dominance_stats(&self) -> SeriesStats {
        self.dominance_stats
    }

    /// Coefficient of variation of the coherence score.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DegenerateStatistics`] if the mean coherence is zero.
    pub fn coherence_cv(&self) -> Result<f64> {
        self.coherence.coefficient_of_variation(COHERENCE_METRIC)
    }

    /// Coefficient of variation of the gated dominance.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DegenerateStatistics`] if the mean dominance is zero.
    pub fn dominance_cv(&self) -> Result<f64> {
        self.dominance_stats
            .coefficient_of_variation(DOMINANCE_METRIC)
    }

    /// Reproducibility tier from the coherence CV.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DegenerateStatistics`] if the mean coherence is zero.
    pub fn reproducibility(&self) -> Result<Tier> {
        self.coherence_cv().map(reproducibility_tier)
    }
}

/// Compare two or more runs.
///
/// # Errors
///
/// Returns [`Error::InsufficientData`] for fewer than two records; nothing is
/// computed in that case.
///
/// # Example
///
/// ```rust
/// use qhrf_analyzer::experiment::ExperimentRecord;
/// use qhrf_analyzer::metrics::{compare, Tier};
///
/// let runs: Vec<_> = ["a", "b"]
///     .iter()
///     .map(|n| ExperimentRecord::builder(*n, "x.json").coherence_score(0.35).build())
///     .collect();
///
/// let comparison = compare(&runs)?;
/// assert_eq!(comparison.coherence().std_dev, 0.0);
/// assert_eq!(comparison.reproducibility()?, Tier::Excellent);
/// # Ok::<(), qhrf_analyzer::Error>(())
/// ```
pub fn compare(records: &[ExperimentRecord]) -> Result<Comparison> {
    require_records(records)?;

    let coherence_scores: Vec<f64> = records.iter().map(ExperimentRecord::coherence_score).collect();
    let dominance: Vec<f64> = records.iter().map(gated_dominance).collect();

    Ok(Comparison {
        names: records.iter().map(|r| r.name().to_string()).collect(),
        entropies: records.iter().map(ExperimentRecord::shannon_entropy).collect(),
        signature_strengths: records
            .iter()
            .map(ExperimentRecord::qhrf_signature_strength)
            .collect(),
        coherence: SeriesStats::from_values(&coherence_scores),
        dominance_stats: SeriesStats::from_values(&dominance),
        coherence_scores,
        dominance,
    })
}
