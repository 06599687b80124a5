//! Result file loading
//!
//! Single loads abort on the first error. Batch loads attempt every path,
//! keep successes in input order and report failures alongside them.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::{parse_experiment, ExperimentRecord};
use crate::config::AnalyzerConfig;
use crate::{Error, Result};

/// A file that could not be loaded during a batch.
#[derive(Debug)]
pub struct LoadFailure {
    /// Path that failed
    pub path: PathBuf,
    /// Why it failed
    pub error: Error,
}

/// Outcome of [`load_batch`].
#[derive(Debug, Default)]
pub struct BatchLoad {
    /// Loaded records, in input order
    pub records: Vec<ExperimentRecord>,
    /// Skipped files, in input order
    pub failures: Vec<LoadFailure>,
}

impl BatchLoad {
    /// Number of files that loaded.
    #[must_use]
    pub fn loaded(&self) -> usize {
        self.records.len()
    }

    /// True if every file failed (or there were none).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Read and parse one result file.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read and
/// [`Error::ParseFailure`] if it is not valid JSON or not an experiment
/// document.
pub fn load_file(path: impl AsRef<Path>, config: &AnalyzerConfig) -> Result<ExperimentRecord> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading experiment file");
    let text = std::fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&text)
        .map_err(|e| Error::ParseFailure(format!("{}: invalid JSON: {e}", path.display())))?;
    let record = parse_experiment(&value, path, config)?;
    info!(name = record.name(), backend = record.backend(), "loaded experiment");
    Ok(record)
}

/// Load many result files, skipping and reporting the ones that fail.
///
/// With the `rayon` feature the files are parsed in parallel; the returned
/// order always matches `paths`.
pub fn load_batch<P>(paths: &[P], config: &AnalyzerConfig) -> BatchLoad
where
    P: AsRef<Path> + Sync,
{
    let results = load_all(paths, config);

    let mut batch = BatchLoad::default();
    for (path, result) in paths.iter().zip(results) {
        match result {
            Ok(record) => batch.records.push(record),
            Err(error) => {
                warn!(path = %path.as_ref().display(), %error, "skipping experiment file");
                batch.failures.push(LoadFailure {
                    path: path.as_ref().to_path_buf(),
                    error,
                });
            }
        }
    }
    info!(
        loaded = batch.records.len(),
        skipped = batch.failures.len(),
        "batch load finished"
    );
    batch
}

#[cfg(feature = "rayon")]
fn load_all<P>(paths: &[P], config: &AnalyzerConfig) -> Vec<Result<ExperimentRecord>>
where
    P: AsRef<Path> + Sync,
{
    use rayon::prelude::*;

    // par_iter + collect keeps input order
    paths.par_iter().map(|p| load_file(p, config)).collect()
}

#[cfg(not(feature = "rayon"))]
fn load_all<P>(paths: &[P], config: &AnalyzerConfig) -> Vec<Result<ExperimentRecord>>
where
    P: AsRef<Path> + Sync,
{
    paths.iter().map(|p| load_file(p, config)).collect()
}
