//! Export file naming

use std::path::PathBuf;

use chrono::NaiveDateTime;

use super::ChartKind;
use crate::config::ExportConfig;

/// Timestamp layout used in exported file names.
pub const EXPORT_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// File name for an exported figure: `{prefix}_{chart}_{run}_{stamp}.{ext}`.
#[must_use]
pub fn export_file_name(
    config: &ExportConfig,
    kind: ChartKind,
    run_name: &str,
    at: NaiveDateTime,
) -> String {
    format!(
        "{}_{}_{}_{}.{}",
        config.file_prefix,
        kind.slug(),
        sanitize(run_name),
        at.format(EXPORT_TIMESTAMP_FORMAT),
        config.format.extension()
    )
}

/// Full output path for an exported figure inside `config.output_dir`.
#[must_use]
pub fn export_path(
    config: &ExportConfig,
    kind: ChartKind,
    run_name: &str,
    at: NaiveDateTime,
) -> PathBuf {
    config
        .output_dir
        .join(export_file_name(config, kind, run_name, at))
}

// Run names come from file names and job ids; keep them path-safe.
fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' || c == '.' { c } else { '_' })
        .collect()
}
