//! Property-based tests for qhrf-analyzer
//!
//! - Parsing never fails on a missing key
//! - Ranking is a probability-ordered permutation of the counts
//! - Statistics stay finite on well-formed series
//! - Run with ProptestConfig::with_cases(100)

use std::path::Path;

use proptest::prelude::*;
use qhrf_analyzer::config::AnalyzerConfig;
use qhrf_analyzer::experiment::{parse_experiment, ExperimentRecord, StateCount};
use qhrf_analyzer::metrics::{compare, rank_states, Assessment, SeriesStats};
use serde_json::{json, Map, Value};

// ============================================================================
// Property Test Generators (Strategies)
// ============================================================================

fn full_document() -> Map<String, Value> {
    let value = json!({
        "job_id": "d7k2m9p4q1r8s5t3",
        "backend_name": "ibm_torino",
        "shots": 4096,
        "execution_time": 2.5,
        "circuit_depth": 18,
        "raw_counts": {"0101": 900, "0100": 300, "1111": 80},
        "shannon_entropy": 3.3,
        "coherence_score": 0.33,
        "qhrf_signature_strength": 0.42,
        "classical_suppression": 0.91,
        "dominant_state": ["0101", 0.22],
        "unique_states": 14,
        "parity_balance": 0.49,
        "participation_ratio": 7.1
    });
    match value {
        Value::Object(map) => map,
        _ => unreachable!(),
    }
}

/// Keep-mask over the 14 recognized keys
fn arb_key_mask() -> impl Strategy<Value = Vec<bool>> {
    proptest::collection::vec(any::<bool>(), 14)
}

/// Distinct 4-bit labels with counts, in generated order
fn arb_counts() -> impl Strategy<Value = Vec<(String, u64)>> {
    proptest::collection::btree_map("[01]{4}", 0u64..10_000, 0..16)
        .prop_map(|m| m.into_iter().collect())
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: any subset of recognized keys may be missing
    #[test]
    fn prop_missing_keys_parse(mask in arb_key_mask(), wrapped in any::<bool>()) {
        let full = full_document();
        let doc: Map<String, Value> = full
            .into_iter()
            .zip(mask)
            .filter_map(|(entry, keep)| keep.then_some(entry))
            .collect();
        let value = if wrapped {
            json!({"experiment_result": Value::Object(doc)})
        } else {
            Value::Object(doc)
        };
        let result = parse_experiment(&value, Path::new("p.json"), &AnalyzerConfig::default());
        prop_assert!(result.is_ok());
    }

    /// Property: ranking is non-increasing in probability and keeps every state
    #[test]
    fn prop_ranking_is_ordered(counts in arb_counts()) {
        let record = ExperimentRecord::builder("p", "p.json")
            .raw_counts(counts.iter().map(|(l, c)| StateCount::new(l.clone(), *c)).collect())
            .build();
        let ranked = rank_states(&record);

        prop_assert_eq!(ranked.len(), counts.len());
        for pair in ranked.windows(2) {
            prop_assert!(pair[0].probability >= pair[1].probability);
        }
        for (i, state) in ranked.iter().enumerate() {
            prop_assert_eq!(state.rank, i + 1);
        }

        let total: f64 = ranked.iter().map(|s| s.probability).sum();
        if record.total_counts() > 0 {
            prop_assert!((total - 1.0).abs() < 1e-9);
        } else {
            prop_assert!(total.abs() < f64::EPSILON);
        }
    }

    /// Property: success rate is passed/total and within [0, 100]
    #[test]
    fn prop_success_rate_bounds(
        entropy in 0.0f64..4.0,
        coherence in 0.0f64..1.0,
        signature in 0.0f64..1.0,
        unique in 0u64..=16,
    ) {
        let record = ExperimentRecord::builder("p", "p.json")
            .shannon_entropy(entropy)
            .coherence_score(coherence)
            .qhrf_signature_strength(signature)
            .unique_states(unique)
            .build();
        let assessment = Assessment::evaluate(&record);
        let rate = assessment.success_rate();
        prop_assert!((0.0..=100.0).contains(&rate));
        #[allow(clippy::cast_precision_loss)]
        let expected = assessment.passed_count() as f64 / 6.0 * 100.0;
        prop_assert!((rate - expected).abs() < 1e-9);
    }

    /// Property: coherence CV is finite and non-negative for positive series
    #[test]
    fn prop_cv_finite(values in proptest::collection::vec(0.01f64..1.0, 2..20)) {
        let records: Vec<ExperimentRecord> = values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                ExperimentRecord::builder(format!("r{i}"), "r.json")
                    .coherence_score(*v)
                    .build()
            })
            .collect();
        let comparison = compare(&records).unwrap();
        let cv = comparison.coherence_cv().unwrap();
        prop_assert!(cv.is_finite());
        prop_assert!(cv >= 0.0);
        prop_assert_eq!(comparison.coherence(), SeriesStats::from_values(&values));
    }
}

// ============================================================================
// QuickCheck
// ============================================================================

#[test]
fn quickcheck_ranking_is_permutation() {
    fn prop(counts: Vec<u16>) -> bool {
        let mut builder = ExperimentRecord::builder("q", "q.json");
        for (i, c) in counts.iter().enumerate() {
            builder = builder.count(format!("s{i}"), u64::from(*c));
        }
        let record = builder.build();
        let mut ranked: Vec<u64> = rank_states(&record).into_iter().map(|s| s.count).collect();
        let mut expected: Vec<u64> = counts.iter().map(|c| u64::from(*c)).collect();
        ranked.sort_unstable();
        expected.sort_unstable();
        ranked == expected
    }
    quickcheck::quickcheck(prop as fn(Vec<u16>) -> bool);
}
