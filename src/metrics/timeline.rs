//! Run-order timeline of coherence and entropy

use serde::{Deserialize, Serialize};

use crate::experiment::ExperimentRecord;
use crate::Result;

use super::assessment::ENTROPY_CEILING_BITS;
use super::comparison::require_records;

/// One run on the timeline; the x axis is the load index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelinePoint {
    /// 0-based load index
    pub index: usize,
    /// Run name
    pub name: String,
    /// Coherence score
    pub coherence_score: f64,
    /// Shannon entropy in bits
    pub shannon_entropy: f64,
}

/// Coherence and entropy evolution across runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    /// Points in load order
    pub points: Vec<TimelinePoint>,
    /// Reference line for the entropy panel
    pub entropy_ceiling: f64,
}

impl Timeline {
    /// Coherence series.
    #[must_use]
    pub fn coherence_series(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.coherence_score).collect()
    }

    /// Entropy series.
    #[must_use]
    pub fn entropy_series(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.shannon_entropy).collect()
    }
}

/// Build the timeline for two or more runs.
///
/// # Errors
///
/// Returns [`crate::Error::InsufficientData`] for fewer than two records.
pub fn timeline(records: &[ExperimentRecord]) -> Result<Timeline> {
    require_records(records)?;
    let points = records
        .iter()
        .enumerate()
        .map(|(index, r)| TimelinePoint {
            index,
            name: r.name().to_string(),
            coherence_score: r.coherence_score(),
            shannon_entropy: r.shannon_entropy(),
        })
        .collect();
    Ok(Timeline {
        points,
        entropy_ceiling: ENTROPY_CEILING_BITS,
    })
}
