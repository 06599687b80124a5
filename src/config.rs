//! Analyzer configuration
//!
//! Every field has a default, so an empty JSON object (or no file at all)
//! is a valid configuration. Thresholds and the 4-bit entropy ceiling are
//! not configurable; they live in [`crate::metrics`].

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Key under which some result files wrap the experiment fields.
pub const DEFAULT_WRAPPER_KEY: &str = "experiment_result";

/// Number of job-id characters used for the display name.
pub const DEFAULT_NAME_LENGTH: usize = 12;

/// Max chart jobs waiting in the worker queue (back-pressure on submitters).
pub const DEFAULT_WORKER_QUEUE_CAPACITY: usize = 2;

/// Image format for exported figures.
///
/// Encoding is done by the charting front end; this only selects the
/// file extension of generated names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Portable Network Graphics
    #[default]
    Png,
    /// Portable Document Format
    Pdf,
    /// Scalable Vector Graphics
    Svg,
}

impl ExportFormat {
    /// File extension without the leading dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Pdf => "pdf",
            Self::Svg => "svg",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Figure export settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Output image format
    pub format: ExportFormat,
    /// Resolution hint passed to the renderer
    pub dpi: u32,
    /// Directory exported figures are written to
    pub output_dir: PathBuf,
    /// File name prefix for exported figures
    pub file_prefix: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: ExportFormat::Png,
            dpi: 300,
            output_dir: PathBuf::from("."),
            file_prefix: "qhrf".to_string(),
        }
    }
}

/// Top-level analyzer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Wrapper key unwrapped before reading experiment fields
    pub wrapper_key: String,
    /// Job-id prefix length used for display names
    pub name_length: usize,
    /// Chart worker queue capacity
    pub worker_queue_capacity: usize,
    /// Figure export settings
    pub export: ExportConfig,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            wrapper_key: DEFAULT_WRAPPER_KEY.to_string(),
            name_length: DEFAULT_NAME_LENGTH,
            worker_queue_capacity: DEFAULT_WORKER_QUEUE_CAPACITY,
            export: ExportConfig::default(),
        }
    }
}

impl AnalyzerConfig {
    /// Load a configuration from a JSON file.
    ///
    /// Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and
    /// [`Error::Config`] if it is not valid configuration JSON.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an empty wrapper key, a zero name
    /// length or a zero worker queue capacity.
    pub fn validate(&self) -> Result<()> {
        if self.wrapper_key.is_empty() {
            return Err(Error::Config("wrapper_key must not be empty".to_string()));
        }
        if self.name_length == 0 {
            return Err(Error::Config("name_length must be positive".to_string()));
        }
        if self.worker_queue_capacity == 0 {
            return Err(Error::Config(
                "worker_queue_capacity must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_default() {
        let config: AnalyzerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AnalyzerConfig::default());
        assert_eq!(config.wrapper_key, "experiment_result");
        assert_eq!(config.name_length, 12);
    }

    #[test]
    fn test_partial_export_section() {
        let config: AnalyzerConfig =
            serde_json::from_str(r#"{"export": {"format": "svg"}}"#).unwrap();
        assert_eq!(config.export.format, ExportFormat::Svg);
        assert_eq!(config.export.dpi, 300);
        assert_eq!(config.export.file_prefix, "qhrf");
    }

    #[test]
    fn test_validate_rejects_zero_capacity() {
        let config = AnalyzerConfig {
            worker_queue_capacity: 0,
            ..AnalyzerConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_export_format_extension() {
        assert_eq!(ExportFormat::Png.extension(), "png");
        assert_eq!(ExportFormat::Pdf.to_string(), "pdf");
    }
}
