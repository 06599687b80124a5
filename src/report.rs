//! Plain-text summaries for the data overview and assessment panes

use std::fmt::{self, Write};

use crate::experiment::ExperimentRecord;
use crate::metrics::{
    rank_states, rate_metrics, Assessment, Comparison, Significance, ENTROPY_CEILING_BITS,
    STATE_SPACE_SIZE,
};

const RULE: &str = "============================================================";

fn significance_suffix(tag: Significance) -> &'static str {
    match tag {
        Significance::Primary => "  [PRIMARY QHRF]",
        Significance::Signature => "  [QHRF SIGNATURE]",
        Significance::Classical => "  [CLASSICAL]",
        Significance::Other => "",
    }
}

/// Thousands separator for shot counts, e.g. `8,192`.
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Write the criteria table with success rate and tier.
///
/// # Errors
///
/// Returns the writer's error.
pub fn write_assessment(out: &mut impl Write, assessment: &Assessment) -> fmt::Result {
    for result in assessment.results() {
        let status = if result.passed { "PASS" } else { "FAIL" };
        writeln!(out, "{:<30} {status}", result.criterion.description())?;
    }
    writeln!(
        out,
        "\nOverall Success Rate: {}/{} ({:.1}%)",
        assessment.passed_count(),
        assessment.total(),
        assessment.success_rate()
    )?;
    writeln!(
        out,
        "{} QHRF PERFORMANCE",
        assessment.tier().as_str().to_uppercase()
    )
}

/// Write the full data overview of one run.
///
/// # Errors
///
/// Returns the writer's error.
pub fn write_overview(out: &mut impl Write, record: &ExperimentRecord) -> fmt::Result {
    writeln!(out, "QHRF EXPERIMENTAL DATA ANALYSIS\n{RULE}\n")?;

    writeln!(out, "EXPERIMENT INFORMATION")?;
    writeln!(out, "Job ID: {}", record.job_id())?;
    writeln!(out, "Backend: {}", record.backend())?;
    writeln!(out, "Total Shots: {}", group_thousands(record.shots()))?;
    writeln!(out, "Execution Time: {:.2} seconds", record.execution_time())?;
    writeln!(out, "Circuit Depth: {} gates", record.circuit_depth())?;
    writeln!(out, "File Path: {}\n", record.file_path().display())?;

    writeln!(out, "KEY PERFORMANCE METRICS")?;
    for rating in rate_metrics(record) {
        writeln!(
            out,
            "{:<24} {:>10}  {:<10} {}",
            rating.metric, rating.value, rating.rating, rating.benchmark
        )?;
    }

    let dominant = record.dominant_state();
    let assessment = Assessment::evaluate(record);
    writeln!(out, "\nQUANTUM STATE ANALYSIS")?;
    writeln!(out, "Dominant State: |{}>", dominant.label)?;
    writeln!(out, "Dominance Probability: {:.4}", dominant.probability)?;
    writeln!(
        out,
        "Unique States Observed: {}/{STATE_SPACE_SIZE}",
        record.unique_states()
    )?;
    writeln!(
        out,
        "Shannon Entropy: {:.4} / {ENTROPY_CEILING_BITS:.4} ({:.1}% efficiency)\n",
        record.shannon_entropy(),
        assessment.entropy_efficiency() * 100.0
    )?;

    writeln!(out, "DETAILED STATE DISTRIBUTION")?;
    for state in rank_states(record) {
        writeln!(
            out,
            "{:2}. |{}>: {:4} counts ({:.4}){}",
            state.rank,
            state.label,
            state.count,
            state.probability,
            significance_suffix(state.significance)
        )?;
    }

    writeln!(out, "\nQHRF ASSESSMENT")?;
    write_assessment(out, &assessment)
}

/// Write the comparison statistics block.
///
/// A degenerate coefficient of variation is printed as `undefined` rather
/// than failing the whole report.
///
/// # Errors
///
/// Returns the writer's error.
pub fn write_comparison(out: &mut impl Write, comparison: &Comparison) -> fmt::Result {
    writeln!(out, "COMPARISON STATISTICS\n{}\n", &RULE[..25])?;
    writeln!(out, "Experiments: {}\n", comparison.len())?;

    let cv = |r: crate::Result<f64>| {
        r.map_or_else(|_| "undefined".to_string(), |cv| format!("{:.1}%", cv * 100.0))
    };

    let coherence = comparison.coherence();
    writeln!(out, "COHERENCE SCORE")?;
    writeln!(out, "Mean: {:.4}", coherence.mean)?;
    writeln!(out, "Std: {:.4}", coherence.std_dev)?;
    writeln!(out, "CV: {}\n", cv(comparison.coherence_cv()))?;

    let dominance = comparison.dominance_stats();
    writeln!(out, "|0101> DOMINANCE")?;
    writeln!(out, "Mean: {:.4}", dominance.mean)?;
    writeln!(out, "Std: {:.4}", dominance.std_dev)?;
    writeln!(out, "CV: {}\n", cv(comparison.dominance_cv()))?;

    let tier = comparison
        .reproducibility()
        .map_or_else(|_| "UNDEFINED".to_string(), |t| t.as_str().to_uppercase());
    writeln!(out, "REPRODUCIBILITY\n{tier}")
}

// Writing into a String cannot fail.
fn render(write: impl FnOnce(&mut String) -> fmt::Result) -> String {
    let mut out = String::new();
    match write(&mut out) {
        Ok(()) | Err(fmt::Error) => out,
    }
}

/// Criteria table with success rate and tier.
#[must_use]
pub fn assessment_report(assessment: &Assessment) -> String {
    render(|out| write_assessment(out, assessment))
}

/// Full data overview of one run.
#[must_use]
pub fn overview_report(record: &ExperimentRecord) -> String {
    render(|out| write_overview(out, record))
}

/// Comparison statistics block. See [`write_comparison`].
#[must_use]
pub fn comparison_report(comparison: &Comparison) -> String {
    render(|out| write_comparison(out, comparison))
}
