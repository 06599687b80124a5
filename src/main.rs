use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::NaiveDateTime;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use qhrf_analyzer::charts::{self, ChartKind};
use qhrf_analyzer::config::AnalyzerConfig;
use qhrf_analyzer::report::{comparison_report, overview_report};
use qhrf_analyzer::worker::{ChartOutcome, ChartWorker};
use qhrf_analyzer::Analyzer;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let paths: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();
    let mut analyzer = Analyzer::builder()
        .build()
        .context("Failed to build analyzer")?;

    if paths.is_empty() {
        info!("no result files given, usage: qhrf-analyzer [FILE.json ...]");
        return Ok(());
    }

    let summary = analyzer.load_files(&paths);
    for failure in &summary.failures {
        eprintln!("skipped {}: {}", failure.path.display(), failure.error);
    }
    if summary.loaded == 0 {
        bail!("none of the {} files could be loaded", paths.len());
    }

    for record in analyzer.store().experiments() {
        println!("{}", overview_report(record));
    }

    if analyzer.store().len() >= 2 {
        println!("{}", comparison_report(&analyzer.compare()?));
        let timeline = analyzer.timeline()?;
        println!("TIMELINE");
        for point in &timeline.points {
            println!(
                "{:3}  {:<14} coherence {:.4}  entropy {:.4}",
                point.index, point.name, point.coherence_score, point.shannon_entropy
            );
        }
    }

    render_dashboards(&analyzer).await
}

/// Prepare a dashboard per loaded run on the chart worker.
///
/// Outcomes are taken as soon as the queue is full so the worker never stalls.
async fn render_dashboards(analyzer: &Analyzer) -> Result<()> {
    let config = analyzer.config();
    let capacity = config.worker_queue_capacity;
    let mut worker = ChartWorker::with_capacity(capacity);
    let mut names = Vec::new();
    let stamp = chrono::Local::now().naive_local();

    for record in analyzer.store().experiments() {
        if worker.pending() >= capacity {
            if let Some(outcome) = worker.next_outcome().await {
                report_outcome(config, &names, stamp, outcome);
            }
        }
        worker
            .submit(ChartKind::Dashboard, vec![record.clone()])
            .await?;
        names.push(record.name().to_string());
    }

    while let Some(outcome) = worker.next_outcome().await {
        report_outcome(config, &names, stamp, outcome);
    }
    Ok(())
}

fn report_outcome(
    config: &AnalyzerConfig,
    names: &[String],
    stamp: NaiveDateTime,
    outcome: ChartOutcome,
) {
    let Some(name) = usize::try_from(outcome.id).ok().and_then(|i| names.get(i)) else {
        return;
    };
    match outcome.result {
        Ok(_) => {
            let target = charts::export_path(&config.export, outcome.kind, name, stamp);
            info!(run = %name, target = %target.display(), "dashboard data ready");
        }
        Err(error) => warn!(run = %name, %error, "dashboard failed"),
    }
}
