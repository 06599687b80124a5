//! Figure data for single-run charts

use serde::{Deserialize, Serialize};

use crate::experiment::ExperimentRecord;
use crate::metrics::{
    entropy_efficiency, rank_states, Assessment, Significance, CLASSICAL_STATES,
    ENTROPY_CEILING_BITS, SIGNATURE_STATES,
};

/// Bars whose probability is at or below this carry no value label.
pub const ANNOTATION_THRESHOLD: f64 = 0.02;

/// Number of states shown in the dashboard distribution panel.
pub const DASHBOARD_TOP_STATES: usize = 8;

/// Heatmap cells above this probability use a light text colour.
pub const HEATMAP_LIGHT_TEXT_THRESHOLD: f64 = 0.1;

/// Typical values for an unenhanced circuit, in performance-chart order.
pub const TYPICAL_VALUES: [f64; 5] = [2.5, 0.15, 0.25, 0.75, 0.06];

/// Theoretical maxima, in performance-chart order.
pub const THEORETICAL_MAX: [f64; 5] = [ENTROPY_CEILING_BITS, 1.0, 1.0, 1.0, 1.0];

/// One bar of the state distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionBar {
    /// State label
    pub label: String,
    /// Observed probability
    pub probability: f64,
    /// Colour class
    pub significance: Significance,
    /// Whether the bar carries a value label
    pub annotated: bool,
}

/// State distribution bar chart, most probable state first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateDistribution {
    /// Run name for the title
    pub name: String,
    /// Bars in rank order
    pub bars: Vec<DistributionBar>,
}

/// Build the state distribution, optionally keeping only the top `limit` states.
#[must_use]
pub fn state_distribution(record: &ExperimentRecord, limit: Option<usize>) -> StateDistribution {
    let bars = rank_states(record)
        .into_iter()
        .take(limit.unwrap_or(usize::MAX))
        .map(|s| DistributionBar {
            annotated: s.probability > ANNOTATION_THRESHOLD,
            label: s.label,
            probability: s.probability,
            significance: s.significance,
        })
        .collect();
    StateDistribution {
        name: record.name().to_string(),
        bars,
    }
}

/// One pie slice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    /// Slice label
    pub label: String,
    /// Fraction of the whole
    pub fraction: f64,
}

/// Signature breakdown pie: the three signature states plus the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignatureBreakdown {
    /// `0101`, `0100`, `1101`, then `other`
    pub slices: Vec<PieSlice>,
}

impl SignatureBreakdown {
    /// Combined probability of the three signature states.
    #[must_use]
    pub fn signature_total(&self) -> f64 {
        self.slices
            .iter()
            .take(SIGNATURE_STATES.len())
            .map(|s| s.fraction)
            .sum()
    }
}

/// Build the signature breakdown pie.
#[must_use]
pub fn signature_breakdown(record: &ExperimentRecord) -> SignatureBreakdown {
    let mut slices: Vec<PieSlice> = SIGNATURE_STATES
        .iter()
        .map(|&label| PieSlice {
            label: label.to_string(),
            fraction: record.probability_of(label),
        })
        .collect();
    let signature: f64 = slices.iter().map(|s| s.fraction).sum();
    slices.push(PieSlice {
        label: "other".to_string(),
        fraction: 1.0 - signature,
    });
    SignatureBreakdown { slices }
}

/// Classical vs quantum character of a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CharacterAnalysis {
    /// P(0000) + P(1111)
    pub classical: f64,
    /// 1 - classical
    pub quantum: f64,
    /// P(0101) + P(0100) + P(1101)
    pub signature: f64,
}

/// Build the character analysis bars.
#[must_use]
pub fn character_analysis(record: &ExperimentRecord) -> CharacterAnalysis {
    let classical: f64 = CLASSICAL_STATES
        .iter()
        .map(|l| record.probability_of(l))
        .sum();
    let signature: f64 = SIGNATURE_STATES
        .iter()
        .map(|l| record.probability_of(l))
        .sum();
    CharacterAnalysis {
        classical,
        quantum: 1.0 - classical,
        signature,
    }
}

/// Performance radar on a 0..1 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarProfile {
    /// `(axis, value)` in drawing order
    pub axes: Vec<(String, f64)>,
}

/// Build the performance radar.
#[must_use]
pub fn radar_profile(record: &ExperimentRecord) -> RadarProfile {
    let axes = [
        ("Entropy", entropy_efficiency(record.shannon_entropy())),
        ("Coherence", record.coherence_score()),
        ("QHRF Sig", record.qhrf_signature_strength()),
        ("Cl. Supp.", record.classical_suppression()),
    ]
    .into_iter()
    .map(|(axis, v)| (axis.to_string(), v))
    .collect();
    RadarProfile { axes }
}

/// One metric group of the performance comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRow {
    /// Metric name
    pub metric: String,
    /// Typical unenhanced value
    pub typical: f64,
    /// Measured value
    pub measured: f64,
    /// Theoretical maximum
    pub theoretical_max: f64,
    /// measured / typical, absent when typical is not positive
    pub improvement: Option<f64>,
}

/// Grouped bars: typical vs measured vs theoretical maximum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceComparison {
    /// Run name for the title
    pub name: String,
    /// One row per metric
    pub rows: Vec<PerformanceRow>,
}

/// Build the performance comparison.
#[must_use]
pub fn performance_comparison(record: &ExperimentRecord) -> PerformanceComparison {
    let metrics = [
        "Shannon Entropy",
        "Coherence Score",
        "QHRF Signature",
        "Classical Suppression",
        "|0101> Dominance",
    ];
    let measured = [
        record.shannon_entropy(),
        record.coherence_score(),
        record.qhrf_signature_strength(),
        record.classical_suppression(),
        record.dominant_state().probability,
    ];
    let rows = metrics
        .iter()
        .zip(measured)
        .zip(TYPICAL_VALUES.iter().zip(THEORETICAL_MAX))
        .map(|((metric, measured), (&typical, theoretical_max))| PerformanceRow {
            metric: (*metric).to_string(),
            typical,
            measured,
            theoretical_max,
            improvement: (typical > 0.0).then(|| measured / typical),
        })
        .collect();
    PerformanceComparison {
        name: record.name().to_string(),
        rows,
    }
}

/// One cell of the 4x4 state heatmap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapCell {
    /// State label, qubits 0-1 then 2-3
    pub label: String,
    /// Observed probability
    pub probability: f64,
}

impl HeatmapCell {
    /// Whether the cell text should be drawn in a light colour.
    #[must_use]
    pub fn light_text(&self) -> bool {
        self.probability > HEATMAP_LIGHT_TEXT_THRESHOLD
    }
}

/// Probability map of the full 4-qubit state space.
///
/// Row `i` holds qubits 0-1 = `i`, column `j` holds qubits 2-3 = `j`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateHeatmap {
    /// `cells[row][column]`
    pub cells: Vec<Vec<HeatmapCell>>,
}

impl StateHeatmap {
    /// Cell at `(row, column)`.
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> Option<&HeatmapCell> {
        self.cells.get(row).and_then(|r| r.get(column))
    }
}

/// Build the 4x4 state heatmap.
#[must_use]
pub fn state_heatmap(record: &ExperimentRecord) -> StateHeatmap {
    let cells = (0..4)
        .map(|i| {
            (0..4)
                .map(|j| {
                    let label = format!("{i:02b}{j:02b}");
                    HeatmapCell {
                        probability: record.probability_of(&label),
                        label,
                    }
                })
                .collect()
        })
        .collect();
    StateHeatmap { cells }
}

/// Signature analysis figure: pie, character bars and radar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignatureAnalysis {
    /// Signature pie
    pub breakdown: SignatureBreakdown,
    /// Classical vs quantum bars
    pub character: CharacterAnalysis,
    /// Performance radar
    pub radar: RadarProfile,
}

/// Build the signature analysis figure.
#[must_use]
pub fn signature_analysis(record: &ExperimentRecord) -> SignatureAnalysis {
    SignatureAnalysis {
        breakdown: signature_breakdown(record),
        character: character_analysis(record),
        radar: radar_profile(record),
    }
}

/// Dashboard: every single-run panel at once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    /// Top states
    pub top_states: StateDistribution,
    /// Signature pie
    pub signature: SignatureBreakdown,
    /// Performance radar
    pub radar: RadarProfile,
    /// Criteria panel
    pub assessment: Assessment,
    /// State-space heatmap
    pub heatmap: StateHeatmap,
}

/// Build the dashboard.
#[must_use]
pub fn dashboard(record: &ExperimentRecord) -> Dashboard {
    Dashboard {
        top_states: state_distribution(record, Some(DASHBOARD_TOP_STATES)),
        signature: signature_breakdown(record),
        radar: radar_profile(record),
        assessment: Assessment::evaluate(record),
        heatmap: state_heatmap(record),
    }
}
