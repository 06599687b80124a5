//! Tests for top-level Analyzer API

use std::io::Write;
use std::path::PathBuf;

use qhrf_analyzer::charts::{ChartData, ChartKind};
use qhrf_analyzer::config::{AnalyzerConfig, ExportFormat};
use qhrf_analyzer::metrics::Tier;
use qhrf_analyzer::{Analyzer, Error};
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(body.as_bytes()).unwrap();
    path
}

fn run_json(job_id: &str, coherence: f64) -> String {
    format!(
        r#"{{"experiment_result": {{
            "job_id": "{job_id}",
            "backend_name": "ibm_brisbane",
            "shots": 8192,
            "raw_counts": {{"0101": 3000, "0100": 1200, "1111": 400}},
            "shannon_entropy": 3.2,
            "coherence_score": {coherence},
            "dominant_state": ["0101", 0.37],
            "unique_states": 16
        }}}}"#
    )
}

#[test]
fn test_analyzer_builder() {
    let analyzer = Analyzer::builder().build().unwrap();
    assert!(analyzer.store().is_empty());
    assert_eq!(analyzer.config(), &AnalyzerConfig::default());
}

#[test]
fn test_analyzer_builder_chain() {
    let analyzer = Analyzer::builder()
        .wrapper_key("result")
        .export_format(ExportFormat::Svg)
        .output_dir("/tmp/qhrf")
        .worker_queue_capacity(8)
        .build()
        .unwrap();
    assert_eq!(analyzer.config().wrapper_key, "result");
    assert_eq!(analyzer.config().export.format, ExportFormat::Svg);
    assert_eq!(analyzer.config().worker_queue_capacity, 8);
}

#[test]
fn test_analyzer_builder_rejects_invalid_config() {
    let result = Analyzer::builder().wrapper_key("").build();
    assert!(matches!(result, Err(Error::Config(_))));

    let result = Analyzer::builder().worker_queue_capacity(0).build();
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_empty_session() {
    let analyzer = Analyzer::builder().build().unwrap();
    assert!(matches!(analyzer.current(), Err(Error::NoCurrentExperiment)));
    assert!(matches!(
        analyzer.assess_current(),
        Err(Error::NoCurrentExperiment)
    ));
    assert!(matches!(
        analyzer.compare(),
        Err(Error::InsufficientData { actual: 0, .. })
    ));
    assert!(matches!(
        analyzer.export_path(ChartKind::Dashboard),
        Err(Error::NoCurrentExperiment)
    ));
}

#[test]
fn test_load_file_makes_it_current() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "a.json", &run_json("JOBAAAAAAAAAAAAA", 0.34));

    let mut analyzer = Analyzer::builder().build().unwrap();
    let record = analyzer.load_file(&path).unwrap();
    assert_eq!(record.name(), "JOBAAAAAAAAA");
    assert_eq!(analyzer.store().len(), 1);

    let assessment = analyzer.assess_current().unwrap();
    assert!(assessment.passed_count() >= 3);
}

#[test]
fn test_failed_single_load_leaves_session_unchanged() {
    let dir = TempDir::new().unwrap();
    let good = write_file(&dir, "good.json", &run_json("JOBGOOD", 0.3));
    let bad = write_file(&dir, "bad.json", "{not json");

    let mut analyzer = Analyzer::builder().build().unwrap();
    analyzer.load_file(&good).unwrap();

    assert!(matches!(
        analyzer.load_file(&bad),
        Err(Error::ParseFailure(_))
    ));
    assert!(matches!(
        analyzer.load_file(dir.path().join("missing.json")),
        Err(Error::Io(_))
    ));
    assert_eq!(analyzer.store().len(), 1);
    assert_eq!(analyzer.current().unwrap().name(), "JOBGOOD");
}

#[test]
fn test_load_files_skips_failures() {
    let dir = TempDir::new().unwrap();
    let paths = vec![
        write_file(&dir, "a.json", &run_json("JOBA", 0.30)),
        write_file(&dir, "b.json", "[1, 2, 3]"),
        write_file(&dir, "c.json", &run_json("JOBC", 0.32)),
    ];

    let mut analyzer = Analyzer::builder().build().unwrap();
    let summary = analyzer.load_files(&paths);
    assert_eq!(summary.loaded, 2);
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].path, paths[1]);

    assert_eq!(
        analyzer.store().labels(),
        ["JOBA (ibm_brisbane)", "JOBC (ibm_brisbane)"]
    );
    assert_eq!(analyzer.current().unwrap().name(), "JOBC");
}

#[test]
fn test_select_compare_and_clear() {
    let dir = TempDir::new().unwrap();
    let paths = vec![
        write_file(&dir, "a.json", &run_json("JOBA", 0.35)),
        write_file(&dir, "b.json", &run_json("JOBB", 0.35)),
    ];

    let mut analyzer = Analyzer::builder().build().unwrap();
    analyzer.load_files(&paths);

    assert_eq!(analyzer.select(0).unwrap().name(), "JOBA");
    assert!(matches!(
        analyzer.select(2),
        Err(Error::InvalidSelection { index: 2, len: 2 })
    ));
    assert_eq!(analyzer.current().unwrap().name(), "JOBA");

    let comparison = analyzer.compare().unwrap();
    assert_eq!(comparison.reproducibility().unwrap(), Tier::Excellent);
    assert_eq!(analyzer.timeline().unwrap().points.len(), 2);

    analyzer.clear();
    assert!(analyzer.store().is_empty());
    assert!(analyzer.current().is_err());
}

#[test]
fn test_charts_use_current_or_all_runs() {
    let dir = TempDir::new().unwrap();
    let paths = vec![
        write_file(&dir, "a.json", &run_json("JOBA", 0.31)),
        write_file(&dir, "b.json", &run_json("JOBB", 0.36)),
    ];
    let mut analyzer = Analyzer::builder().build().unwrap();
    analyzer.load_files(&paths);

    assert_eq!(analyzer.chart_records(ChartKind::Dashboard).unwrap().len(), 1);
    assert_eq!(analyzer.chart_records(ChartKind::Timeline).unwrap().len(), 2);
    assert!(matches!(
        analyzer.chart(ChartKind::Comparison).unwrap(),
        ChartData::Comparison(_)
    ));
}

#[test]
fn test_export_path_names_current_run() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "a.json", &run_json("JOBEXPORT", 0.3));
    let mut analyzer = Analyzer::builder()
        .export_format(ExportFormat::Pdf)
        .output_dir(dir.path())
        .build()
        .unwrap();
    analyzer.load_file(&path).unwrap();

    let target = analyzer.export_path(ChartKind::Dashboard).unwrap();
    assert!(target.starts_with(dir.path()));
    let file_name = target.file_name().unwrap().to_string_lossy().into_owned();
    assert!(file_name.starts_with("qhrf_dashboard_JOBEXPORT_"));
    assert!(file_name.ends_with(".pdf"));
}
