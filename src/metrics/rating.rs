//! Per-metric ratings for the results table

use serde::Serialize;

use crate::experiment::ExperimentRecord;

use super::assessment::STATE_SPACE_SIZE;

/// One row of the results table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricRating {
    /// Metric name
    pub metric: &'static str,
    /// Formatted measured value
    pub value: String,
    /// Qualitative rating
    pub rating: &'static str,
    /// Benchmark the rating is measured against
    pub benchmark: &'static str,
}

impl MetricRating {
    fn new(metric: &'static str, value: String, rating: &'static str, benchmark: &'static str) -> Self {
        Self {
            metric,
            value,
            rating,
            benchmark,
        }
    }
}

/// Three-band rating, highest band first. `above` picks the comparison.
fn band(
    value: f64,
    high: f64,
    mid: f64,
    labels: [&'static str; 3],
    above: bool,
) -> &'static str {
    let (in_high, in_mid) = if above {
        (value > high, value > mid)
    } else {
        (value < high, value < mid)
    };
    if in_high {
        labels[0]
    } else if in_mid {
        labels[1]
    } else {
        labels[2]
    }
}

/// Rate every reported metric of a record.
#[must_use]
pub fn rate_metrics(record: &ExperimentRecord) -> Vec<MetricRating> {
    const EXCELLENT: [&str; 3] = ["Excellent", "Good", "Moderate"];
    const STRENGTH: [&str; 3] = ["Strong", "Moderate", "Weak"];

    let unique = record.unique_states();
    let coverage = if unique == STATE_SPACE_SIZE {
        "Complete"
    } else if unique > 12 {
        "Good"
    } else {
        "Limited"
    };
    let dominance = record.dominant_state().probability;

    vec![
        MetricRating::new(
            "Shannon Entropy",
            format!("{:.4}", record.shannon_entropy()),
            band(record.shannon_entropy(), 3.0, 2.5, EXCELLENT, true),
            "3.0+ (Excellent)",
        ),
        MetricRating::new(
            "Coherence Score",
            format!("{:.4}", record.coherence_score()),
            band(record.coherence_score(), 0.3, 0.2, EXCELLENT, true),
            "0.3+ (Excellent)",
        ),
        MetricRating::new(
            "QHRF Signature",
            format!("{:.4}", record.qhrf_signature_strength()),
            band(record.qhrf_signature_strength(), 0.4, 0.25, STRENGTH, true),
            "0.4+ (Strong)",
        ),
        MetricRating::new(
            "Classical Suppression",
            format!("{:.4}", record.classical_suppression()),
            band(record.classical_suppression(), 0.9, 0.8, EXCELLENT, true),
            "0.9+ (Excellent)",
        ),
        MetricRating::new(
            "|0101> Dominance",
            format!("{dominance:.4}"),
            band(dominance, 0.2, 0.1, STRENGTH, true),
            "0.2+ (Strong)",
        ),
        MetricRating::new(
            "Unique States",
            format!("{unique}/{STATE_SPACE_SIZE}"),
            coverage,
            "16/16 (Complete)",
        ),
        MetricRating::new(
            "Parity Balance",
            format!("{:.4}", record.parity_balance()),
            band(record.parity_balance(), 0.1, 0.2, EXCELLENT, false),
            "<0.1 (Excellent)",
        ),
        MetricRating::new(
            "Participation Ratio",
            format!("{:.2}", record.participation_ratio()),
            band(record.participation_ratio(), 8.0, 4.0, ["High", "Moderate", "Low"], true),
            "8+ (High)",
        ),
    ]
}
