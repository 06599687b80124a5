//! Integration tests for the background chart worker

use std::time::Duration;

use qhrf_analyzer::charts::{ChartData, ChartKind};
use qhrf_analyzer::experiment::ExperimentRecord;
use qhrf_analyzer::worker::ChartWorker;
use qhrf_analyzer::Error;

fn runs(n: usize) -> Vec<ExperimentRecord> {
    (0..n)
        .map(|i| {
            ExperimentRecord::builder(format!("run{i}"), format!("run{i}.json"))
                .coherence_score(0.3 + 0.01 * i as f64)
                .count("0101", 100)
                .count("0100", 40)
                .dominant_state("0101", 0.7)
                .build()
        })
        .collect()
}

#[tokio::test]
async fn test_multi_run_charts_on_worker() {
    let mut worker = ChartWorker::spawn();
    worker.submit(ChartKind::Comparison, runs(3)).await.unwrap();
    worker.submit(ChartKind::Timeline, runs(3)).await.unwrap();

    let mut kinds = Vec::new();
    while let Some(outcome) = worker.next_outcome().await {
        match outcome.result.unwrap() {
            ChartData::Comparison(c) => assert_eq!(c.len(), 3),
            ChartData::Timeline(t) => assert_eq!(t.points.len(), 3),
            other => panic!("unexpected chart {:?}", other.kind()),
        }
        kinds.push(outcome.kind);
    }
    assert_eq!(kinds.len(), 2);
    assert!(!worker.is_busy());
}

#[tokio::test]
async fn test_more_jobs_than_queue_capacity() {
    let mut worker = ChartWorker::with_capacity(1);
    let mut done = 0;
    for _ in 0..6 {
        if worker.pending() >= 1 {
            assert!(worker.next_outcome().await.unwrap().result.is_ok());
            done += 1;
        }
        worker.submit(ChartKind::Dashboard, runs(1)).await.unwrap();
    }
    while let Some(outcome) = worker.next_outcome().await {
        assert!(outcome.result.is_ok());
        done += 1;
    }
    assert_eq!(done, 6);
}

#[tokio::test]
async fn test_full_queue_blocks_submit() {
    let mut worker = ChartWorker::with_capacity(1);
    let mut accepted = 0;
    for _ in 0..50 {
        let submit = worker.submit(ChartKind::Dashboard, runs(1));
        match tokio::time::timeout(Duration::from_millis(200), submit).await {
            Ok(result) => {
                result.unwrap();
                accepted += 1;
            }
            Err(_) => break,
        }
    }
    // one queued, one building, one finished and waiting to be taken
    assert!((1..=3).contains(&accepted), "accepted {accepted}");
    assert_eq!(worker.pending(), accepted);

    // taking outcomes frees the worker again
    while worker.next_outcome().await.is_some() {}
    worker.submit(ChartKind::Dashboard, runs(1)).await.unwrap();
    assert!(worker.next_outcome().await.unwrap().result.is_ok());
}

#[tokio::test]
async fn test_errors_come_back_as_outcomes() {
    let mut worker = ChartWorker::spawn();
    worker.submit(ChartKind::StateDistribution, Vec::new()).await.unwrap();
    let outcome = worker.next_outcome().await.unwrap();
    assert!(matches!(outcome.result, Err(Error::NoCurrentExperiment)));
}
