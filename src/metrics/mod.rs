//! Metrics & Assessment Evaluator
//!
//! Pure functions over immutable [`ExperimentRecord`]s:
//!
//! - [`Assessment`]: six fixed pass/fail criteria, success rate and tier
//! - [`rank_states`]: probability ranking with significance tags
//! - [`rate_metrics`]: per-metric ratings for the results table
//! - [`compare`] / [`timeline`]: statistics across two or more runs
//!
//! None of the thresholds are configurable.
//!
//! [`ExperimentRecord`]: crate::experiment::ExperimentRecord

mod assessment;
mod comparison;
mod rating;
mod significance;
mod timeline;

pub use assessment::{
    entropy_efficiency, Assessment, Criterion, CriterionResult, Tier, COHERENCE_THRESHOLD,
    DOMINANCE_THRESHOLD, ENTROPY_CEILING_BITS, ENTROPY_THRESHOLD, SIGNATURE_THRESHOLD,
    STATE_SPACE_SIZE, SUPPRESSION_THRESHOLD,
};
pub use comparison::{
    compare, gated_dominance, reproducibility_tier, require_records, Comparison, SeriesStats,
    COHERENCE_METRIC, CV_EXCELLENT, CV_GOOD, DOMINANCE_METRIC, MIN_COMPARISON_RECORDS,
};
pub use rating::{rate_metrics, MetricRating};
pub use significance::{
    rank_states, significance_of, RankedState, Significance, CLASSICAL_STATES, PRIMARY_STATE,
    SIGNATURE_STATES, SIGNIFICANCE_TABLE,
};
pub use timeline::{timeline, Timeline, TimelinePoint};
