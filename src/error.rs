//! Error types for qhrf-analyzer
//!
//! Toyota Way: Clear error messages with actionable guidance (Respect for People)

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// qhrf-analyzer error types
#[derive(Error, Debug)]
pub enum Error {
    /// Document could not be turned into an experiment record
    #[error("Could not parse experiment data: {0}")]
    ParseFailure(String),

    /// Coefficient of variation requested over a zero-mean series
    #[error("Degenerate statistics: mean of {metric} is zero, coefficient of variation is undefined")]
    DegenerateStatistics {
        /// Series whose mean was zero
        metric: &'static str,
    },

    /// Multi-record analysis invoked with too few records
    #[error("Insufficient data: need at least {required} experiments, got {actual}")]
    InsufficientData {
        /// Minimum number of records the operation needs
        required: usize,
        /// Number of records supplied
        actual: usize,
    },

    /// Selection index outside the loaded experiment list
    #[error("Invalid selection: index {index} but only {len} experiments are loaded")]
    InvalidSelection {
        /// Requested index
        index: usize,
        /// Number of loaded experiments
        len: usize,
    },

    /// Operation needs a current experiment but none is selected
    #[error("No experiment selected\nLoad an experiment first")]
    NoCurrentExperiment,

    /// Chart worker queue closed
    #[error("Chart worker closed (receiver dropped)")]
    WorkerClosed,

    /// Chart build task panicked or was aborted
    #[error("Chart task failed: {0}")]
    ChartTask(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
