//! # qhrf-analyzer: Quantum Job Result Analysis
//!
//! Loads JSON result files of QHRF experiments, parses them into immutable
//! records, evaluates them against fixed assessment criteria and prepares
//! chart data for a front end to draw.
//!
//! ## Design Principles (Toyota Way Aligned)
//!
//! - **Poka-Yoke safety**: Permissive parsing with explicit defaults, failures never touch loaded data
//! - **Jidoka**: Degenerate statistics are reported instead of producing infinities
//! - **Heijunka**: Chart generation goes through a bounded worker queue
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use qhrf_analyzer::Analyzer;
//!
//! let mut analyzer = Analyzer::builder().build()?;
//!
//! // Load result files (failures are skipped and reported)
//! let batch = analyzer.load_files(&["run_a.json", "run_b.json"]);
//! println!("loaded {}, skipped {}", batch.loaded, batch.failures.len());
//!
//! let assessment = analyzer.assess_current()?;
//! println!("success rate: {:.1}%", assessment.success_rate());
//!
//! let comparison = analyzer.compare()?;
//! println!("reproducibility: {:?}", comparison.reproducibility());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod charts;
pub mod config;
pub mod error;
pub mod experiment;
pub mod metrics;
pub mod report;
#[cfg(feature = "tokio")]
pub mod worker;

use std::path::{Path, PathBuf};

pub use error::{Error, Result};

use charts::{ChartData, ChartKind};
use config::{AnalyzerConfig, ExportFormat};
use experiment::{ExperimentRecord, ExperimentStore, LoadFailure};
use metrics::{Assessment, Comparison, Timeline};

/// Summary of a multi-file load.
#[derive(Debug)]
pub struct LoadSummary {
    /// Files that were added to the session
    pub loaded: usize,
    /// Files that were skipped
    pub failures: Vec<LoadFailure>,
}

/// Analysis session: configuration plus the ordered list of loaded runs.
#[derive(Debug)]
pub struct Analyzer {
    config: AnalyzerConfig,
    store: ExperimentStore,
}

impl Analyzer {
    /// Create a new analyzer builder
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::default()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Loaded experiments and selection.
    #[must_use]
    pub const fn store(&self) -> &ExperimentStore {
        &self.store
    }

    /// Load one result file and make it current.
    ///
    /// # Errors
    ///
    /// Returns the load error; the session is unchanged.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<&ExperimentRecord> {
        let record = experiment::load_file(path, &self.config)?;
        self.store.add(record);
        self.store.current().ok_or(Error::NoCurrentExperiment)
    }

    /// Load several result files, skipping the ones that fail.
    ///
    /// The last loaded file becomes current.
    pub fn load_files<P>(&mut self, paths: &[P]) -> LoadSummary
    where
        P: AsRef<Path> + Sync,
    {
        let batch = experiment::load_batch(paths, &self.config);
        let loaded = batch.records.len();
        self.store.extend(batch.records);
        LoadSummary {
            loaded,
            failures: batch.failures,
        }
    }

    /// Add an already-parsed record and make it current.
    pub fn add(&mut self, record: ExperimentRecord) {
        self.store.add(record);
    }

    /// Select the experiment at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSelection`] if `index` is out of range.
    pub fn select(&mut self, index: usize) -> Result<&ExperimentRecord> {
        self.store.select(index)
    }

    /// The current experiment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoCurrentExperiment`] if nothing is loaded.
    pub fn current(&self) -> Result<&ExperimentRecord> {
        self.store.current().ok_or(Error::NoCurrentExperiment)
    }

    /// Drop all loaded experiments.
    pub fn clear(&mut self) {
        self.store.clear();
    }

    /// Assess the current experiment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoCurrentExperiment`] if nothing is loaded.
    pub fn assess_current(&self) -> Result<Assessment> {
        self.current().map(Assessment::evaluate)
    }

    /// Compare all loaded experiments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InsufficientData`] with fewer than two loaded.
    pub fn compare(&self) -> Result<Comparison> {
        metrics::compare(self.store.experiments())
    }

    /// Timeline over all loaded experiments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InsufficientData`] with fewer than two loaded.
    pub fn timeline(&self) -> Result<Timeline> {
        metrics::timeline(self.store.experiments())
    }

    /// Records a chart of `kind` is built from: the current run for
    /// single-run figures, every loaded run otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoCurrentExperiment`] for a single-run figure with
    /// nothing loaded.
    pub fn chart_records(&self, kind: ChartKind) -> Result<Vec<ExperimentRecord>> {
        if kind.is_multi_run() {
            Ok(self.store.experiments().to_vec())
        } else {
            self.current().map(|r| vec![r.clone()])
        }
    }

    /// Build a chart synchronously.
    ///
    /// # Errors
    ///
    /// See [`charts::build_chart`].
    pub fn chart(&self, kind: ChartKind) -> Result<ChartData> {
        charts::build_chart(kind, &self.chart_records(kind)?)
    }

    /// Where an export of `kind` for the current run would be written now.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoCurrentExperiment`] if nothing is loaded.
    pub fn export_path(&self, kind: ChartKind) -> Result<PathBuf> {
        let name = self.current()?.name();
        Ok(charts::export_path(
            &self.config.export,
            kind,
            name,
            chrono::Local::now().naive_local(),
        ))
    }
}

/// Analyzer builder
#[derive(Debug, Default)]
pub struct AnalyzerBuilder {
    config: AnalyzerConfig,
}

impl AnalyzerBuilder {
    /// Replace the whole configuration
    #[must_use]
    pub fn config(mut self, config: AnalyzerConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the wrapper key unwrapped before reading fields
    #[must_use]
    pub fn wrapper_key(mut self, key: impl Into<String>) -> Self {
        self.config.wrapper_key = key.into();
        self
    }

    /// Set the export image format
    #[must_use]
    pub const fn export_format(mut self, format: ExportFormat) -> Self {
        self.config.export.format = format;
        self
    }

    /// Set the export output directory
    #[must_use]
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.export.output_dir = dir.into();
        self
    }

    /// Set the chart worker queue capacity
    #[must_use]
    pub const fn worker_queue_capacity(mut self, capacity: usize) -> Self {
        self.config.worker_queue_capacity = capacity;
        self
    }

    /// Build the analyzer
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configuration is invalid
    pub fn build(self) -> Result<Analyzer> {
        self.config.validate()?;
        Ok(Analyzer {
            config: self.config,
            store: ExperimentStore::new(),
        })
    }
}
