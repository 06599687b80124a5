//! Per-state significance tags and probability ranking

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::experiment::ExperimentRecord;

/// Display tag for a state label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Significance {
    /// The primary QHRF state
    Primary,
    /// Secondary QHRF signature states
    Signature,
    /// Classical baseline states
    Classical,
    /// Everything else
    Other,
}

impl Significance {
    /// Tag name in lowercase.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Signature => "signature",
            Self::Classical => "classical",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Significance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed label -> tag table. Labels not listed are [`Significance::Other`].
pub const SIGNIFICANCE_TABLE: [(&str, Significance); 5] = [
    ("0101", Significance::Primary),
    ("0100", Significance::Signature),
    ("1101", Significance::Signature),
    ("0000", Significance::Classical),
    ("1111", Significance::Classical),
];

/// Label of the primary QHRF state.
pub const PRIMARY_STATE: &str = "0101";

/// Labels of the signature states, primary first.
pub const SIGNATURE_STATES: [&str; 3] = ["0101", "0100", "1101"];

/// Labels of the classical baseline states.
pub const CLASSICAL_STATES: [&str; 2] = ["0000", "1111"];

/// Look up the tag of a state label.
#[must_use]
pub fn significance_of(label: &str) -> Significance {
    SIGNIFICANCE_TABLE
        .iter()
        .find(|(l, _)| *l == label)
        .map_or(Significance::Other, |&(_, tag)| tag)
}

/// One row of a ranked state distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedState {
    /// 1-based rank by descending probability
    pub rank: usize,
    /// State label
    pub label: String,
    /// Observed count
    pub count: u64,
    /// count / total observed counts
    pub probability: f64,
    /// Display tag, independent of rank
    pub significance: Significance,
}

/// Rank a record's states by descending probability.
///
/// Ties keep file order. An empty distribution yields an empty ranking and a
/// zero total gives every state probability 0.0.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn rank_states(record: &ExperimentRecord) -> Vec<RankedState> {
    let total = record.total_counts();
    let mut states: Vec<RankedState> = record
        .raw_counts()
        .iter()
        .map(|s| RankedState {
            rank: 0,
            label: s.label.clone(),
            count: s.count,
            probability: if total == 0 {
                0.0
            } else {
                s.count as f64 / total as f64
            },
            significance: significance_of(&s.label),
        })
        .collect();

    // sort_by is stable: equal probabilities keep insertion order
    states.sort_by(|a, b| {
        b.probability
            .partial_cmp(&a.probability)
            .unwrap_or(Ordering::Equal)
    });
    for (i, state) in states.iter_mut().enumerate() {
        state.rank = i + 1;
    }
    states
}
