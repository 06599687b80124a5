//! Integration tests for multi-run comparison and timeline

use qhrf_analyzer::experiment::ExperimentRecord;
use qhrf_analyzer::metrics::{compare, timeline, Tier};
use qhrf_analyzer::Error;

fn run(name: &str, coherence: f64, dominant: (&str, f64)) -> ExperimentRecord {
    ExperimentRecord::builder(name, format!("{name}.json"))
        .coherence_score(coherence)
        .shannon_entropy(3.1)
        .dominant_state(dominant.0, dominant.1)
        .build()
}

#[test]
fn test_identical_coherence_is_excellent() {
    let records = vec![
        run("a", 0.35, ("0101", 0.25)),
        run("b", 0.35, ("0101", 0.25)),
        run("c", 0.35, ("0101", 0.25)),
    ];
    let comparison = compare(&records).unwrap();
    assert_eq!(comparison.len(), 3);
    assert!(!comparison.is_empty());
    assert!(comparison.coherence().std_dev.abs() < 1e-12);
    assert!(comparison.coherence_cv().unwrap().abs() < 1e-12);
    assert_eq!(comparison.reproducibility().unwrap(), Tier::Excellent);
}

#[test]
fn test_zero_mean_coherence_is_degenerate() {
    let records = vec![run("a", 0.0, ("0101", 0.2)), run("b", 0.0, ("0101", 0.2))];
    let comparison = compare(&records).unwrap();
    assert!(matches!(
        comparison.coherence_cv(),
        Err(Error::DegenerateStatistics { .. })
    ));
    assert!(matches!(
        comparison.reproducibility(),
        Err(Error::DegenerateStatistics { .. })
    ));
}

#[test]
fn test_dominance_only_counts_primary_label() {
    let records = vec![run("a", 0.3, ("0101", 0.4)), run("b", 0.3, ("1111", 0.6))];
    let comparison = compare(&records).unwrap();
    assert_eq!(comparison.dominance(), [0.4, 0.0]);
    assert!((comparison.dominance_stats().mean - 0.2).abs() < 1e-12);
}

#[test]
fn test_dominance_all_gated_out_is_degenerate() {
    let records = vec![run("a", 0.3, ("1111", 0.4)), run("b", 0.3, ("0000", 0.6))];
    let comparison = compare(&records).unwrap();
    assert!(matches!(
        comparison.dominance_cv(),
        Err(Error::DegenerateStatistics { .. })
    ));
    // coherence is unaffected
    assert!(comparison.coherence_cv().is_ok());
}

#[test]
fn test_spread_gives_lower_tier() {
    // mean 0.3, population std 0.1 -> CV 0.333
    let records = vec![run("a", 0.2, ("0101", 0.2)), run("b", 0.4, ("0101", 0.2))];
    let comparison = compare(&records).unwrap();
    let cv = comparison.coherence_cv().unwrap();
    assert!((cv - 1.0 / 3.0).abs() < 1e-9);
    assert_eq!(comparison.reproducibility().unwrap(), Tier::Moderate);
}

#[test]
fn test_one_record_is_refused() {
    let records = vec![run("a", 0.3, ("0101", 0.2))];
    assert!(matches!(
        compare(&records),
        Err(Error::InsufficientData {
            required: 2,
            actual: 1
        })
    ));
    assert!(matches!(
        timeline(&records),
        Err(Error::InsufficientData {
            required: 2,
            actual: 1
        })
    ));
}

#[test]
fn test_timeline_follows_load_order() {
    let records = vec![
        run("first", 0.31, ("0101", 0.2)),
        run("second", 0.36, ("0101", 0.2)),
        run("third", 0.29, ("0101", 0.2)),
    ];
    let timeline = timeline(&records).unwrap();
    let names: Vec<&str> = timeline.points.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["first", "second", "third"]);
    assert_eq!(timeline.coherence_series(), [0.31, 0.36, 0.29]);
    assert!((timeline.entropy_ceiling - 4.0).abs() < f64::EPSILON);
}
