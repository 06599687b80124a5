//! Experiment records: parsing, loading and the session store
//!
//! ## Schema Overview
//!
//! ```text
//! result file (JSON) ──> ExperimentDocument ──> ExperimentRecord (immutable)
//!                          (defaults applied)          │
//!                                                      └──> ExperimentStore (ordered, current)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use std::path::Path;
//! use qhrf_analyzer::config::AnalyzerConfig;
//! use qhrf_analyzer::experiment::{parse_experiment, ExperimentStore};
//!
//! let doc = serde_json::json!({
//!     "job_id": "d1ab2cd3ef4gh5ij",
//!     "backend_name": "ibm_brisbane",
//!     "raw_counts": {"0101": 410, "0100": 120, "1111": 30}
//! });
//!
//! let record = parse_experiment(&doc, Path::new("run.json"), &AnalyzerConfig::default())?;
//!
//! let mut store = ExperimentStore::new();
//! store.add(record);
//! assert_eq!(store.labels(), ["d1ab2cd3ef4g (ibm_brisbane)"]);
//! # Ok::<(), qhrf_analyzer::Error>(())
//! ```

mod experiment_record;
mod loader;
mod parser;
mod store;

pub use experiment_record::{
    DominantState, ExperimentRecord, ExperimentRecordBuilder, StateCount,
    DEFAULT_DOMINANT_LABEL, UNKNOWN,
};
pub use loader::{load_batch, load_file, BatchLoad, LoadFailure};
pub use parser::{display_name, parse_experiment, ExperimentDocument};
pub use store::ExperimentStore;
