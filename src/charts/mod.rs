//! Chart data preparation
//!
//! Builds the numbers each figure needs. Drawing and image encoding belong
//! to the front end's charting library; nothing here renders.
//!
//! ## Figures
//!
//! | kind                  | records | data                                 |
//! |-----------------------|---------|--------------------------------------|
//! | `StateDistribution`   | 1       | ranked bars with significance        |
//! | `QhrfSignature`       | 1       | pie, classical/quantum bars, radar   |
//! | `PerformanceMetrics`  | 1       | typical vs measured vs max           |
//! | `Dashboard`           | 1       | top 8, pie, radar, criteria, heatmap |
//! | `Comparison`          | 2+      | [`Comparison`]                       |
//! | `Timeline`            | 2+      | [`Timeline`]                         |

mod export;
mod figures;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use export::{export_file_name, export_path, EXPORT_TIMESTAMP_FORMAT};
pub use figures::{
    character_analysis, dashboard, performance_comparison, radar_profile, signature_analysis,
    signature_breakdown, state_distribution, state_heatmap, CharacterAnalysis, Dashboard,
    DistributionBar, HeatmapCell, PerformanceComparison, PerformanceRow, PieSlice, RadarProfile,
    SignatureAnalysis, SignatureBreakdown, StateDistribution, StateHeatmap, ANNOTATION_THRESHOLD,
    DASHBOARD_TOP_STATES, HEATMAP_LIGHT_TEXT_THRESHOLD, THEORETICAL_MAX, TYPICAL_VALUES,
};

use crate::experiment::ExperimentRecord;
use crate::metrics::{compare, timeline, Comparison, Timeline};
use crate::{Error, Result};

/// Which figure to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// State probability bars
    StateDistribution,
    /// Signature pie, character bars and radar
    QhrfSignature,
    /// Typical vs measured vs theoretical maximum
    PerformanceMetrics,
    /// All single-run panels
    Dashboard,
    /// Statistics across runs
    Comparison,
    /// Coherence and entropy by load order
    Timeline,
}

impl ChartKind {
    /// Figures built from the current run, in export order.
    pub const SINGLE_RUN: [Self; 4] = [
        Self::StateDistribution,
        Self::QhrfSignature,
        Self::PerformanceMetrics,
        Self::Dashboard,
    ];

    /// Short name used in exported file names.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::StateDistribution => "state_distribution",
            Self::QhrfSignature => "qhrf_signature",
            Self::PerformanceMetrics => "performance_metrics",
            Self::Dashboard => "dashboard",
            Self::Comparison => "comparison",
            Self::Timeline => "timeline",
        }
    }

    /// Whether the figure spans several runs.
    #[must_use]
    pub const fn is_multi_run(self) -> bool {
        matches!(self, Self::Comparison | Self::Timeline)
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Data for one figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChartData {
    /// See [`state_distribution`]
    StateDistribution(StateDistribution),
    /// See [`signature_analysis`]
    QhrfSignature(SignatureAnalysis),
    /// See [`performance_comparison`]
    PerformanceMetrics(PerformanceComparison),
    /// See [`dashboard`]
    Dashboard(Box<Dashboard>),
    /// See [`compare`]
    Comparison(Comparison),
    /// See [`timeline`]
    Timeline(Timeline),
}

impl ChartData {
    /// Kind of figure this data is for.
    #[must_use]
    pub const fn kind(&self) -> ChartKind {
        match self {
            Self::StateDistribution(_) => ChartKind::StateDistribution,
            Self::QhrfSignature(_) => ChartKind::QhrfSignature,
            Self::PerformanceMetrics(_) => ChartKind::PerformanceMetrics,
            Self::Dashboard(_) => ChartKind::Dashboard,
            Self::Comparison(_) => ChartKind::Comparison,
            Self::Timeline(_) => ChartKind::Timeline,
        }
    }
}

/// Build a figure.
///
/// Single-run kinds chart the first record; multi-run kinds use all of them.
///
/// # Errors
///
/// Returns [`Error::NoCurrentExperiment`] for a single-run kind with no
/// records and [`Error::InsufficientData`] for a multi-run kind with fewer
/// than two.
pub fn build_chart(kind: ChartKind, records: &[ExperimentRecord]) -> Result<ChartData> {
    if kind.is_multi_run() {
        return match kind {
            ChartKind::Comparison => compare(records).map(ChartData::Comparison),
            _ => timeline(records).map(ChartData::Timeline),
        };
    }

    let record = records.first().ok_or(Error::NoCurrentExperiment)?;
    Ok(match kind {
        ChartKind::StateDistribution => {
            ChartData::StateDistribution(state_distribution(record, None))
        }
        ChartKind::QhrfSignature => ChartData::QhrfSignature(signature_analysis(record)),
        ChartKind::PerformanceMetrics => {
            ChartData::PerformanceMetrics(performance_comparison(record))
        }
        _ => ChartData::Dashboard(Box::new(dashboard(record))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_single_run_kinds() {
        let record = ExperimentRecord::builder("r", "r.json").count("0101", 5).build();
        for kind in ChartKind::SINGLE_RUN {
            let data = build_chart(kind, std::slice::from_ref(&record)).unwrap();
            assert_eq!(data.kind(), kind);
        }
    }

    #[test]
    fn test_single_run_kind_without_records() {
        assert!(matches!(
            build_chart(ChartKind::Dashboard, &[]),
            Err(Error::NoCurrentExperiment)
        ));
    }

    #[test]
    fn test_multi_run_kind_with_one_record() {
        let record = ExperimentRecord::builder("r", "r.json").build();
        assert!(matches!(
            build_chart(ChartKind::Timeline, &[record]),
            Err(Error::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_slug() {
        assert_eq!(ChartKind::QhrfSignature.to_string(), "qhrf_signature");
        assert!(ChartKind::Comparison.is_multi_run());
        assert!(!ChartKind::Dashboard.is_multi_run());
    }
}
