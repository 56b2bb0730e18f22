//! TOML configuration file support.
//!
//! Settings that would otherwise be passed as flags can live in a file:
//!
//! ```toml
//! # diametric.toml
//! [qc]
//! time_order = "trust"
//! peak_count_ceiling = 20000
//!
//! [report]
//! output_dir = "qc"
//! by_run_file = "byRun.tsv"
//! ```
//!
//! Command-line flags override file values, which override defaults.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use diametric::qc::{QcOptions, TimeOrderPolicy};
use diametric::report::ReportOptions;

/// Root configuration structure for diametric.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Metric computation settings.
    #[serde(default)]
    pub qc: QcConfig,

    /// Report output settings.
    #[serde(default)]
    pub report: ReportOptions,
}

/// Configuration for metric computation.
#[derive(Debug, Default, Deserialize)]
pub struct QcConfig {
    /// What to do with scans out of acquisition-time order ("sort" or "trust").
    pub time_order: Option<TimeOrderPolicy>,

    /// Top bucket of the MS2 peak-count histogram.
    pub peak_count_ceiling: Option<usize>,
}

impl QcConfig {
    /// Resolve into library options, falling back to defaults.
    ///
    /// Out-of-range values are rejected.
    pub fn to_options(&self) -> Result<QcOptions> {
        let defaults = QcOptions::default();
        let options = QcOptions {
            time_order: self.time_order.unwrap_or(defaults.time_order),
            peak_count_ceiling: self.peak_count_ceiling.unwrap_or(defaults.peak_count_ceiling),
        };
        options.validate().context("Invalid [qc] configuration")?;
        Ok(options)
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diametric::report::{DEFAULT_BY_RUN_FILE, DEFAULT_MZQC_FILE};
    use std::path::PathBuf;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [qc]
            time_order = "trust"
            peak_count_ceiling = 20000

            [report]
            output_dir = "qc"
            by_run_file = "runs.tsv"
        "#;

        let config = Config::from_str(toml).unwrap();
        let options = config.qc.to_options().unwrap();
        assert_eq!(options.time_order, TimeOrderPolicy::Trust);
        assert_eq!(options.peak_count_ceiling, 20_000);
        assert_eq!(config.report.output_dir, PathBuf::from("qc"));
        assert_eq!(config.report.by_run_file, "runs.tsv");
        assert_eq!(config.report.mzqc_file, DEFAULT_MZQC_FILE);
    }

    #[test]
    fn test_partial_config() {
        let toml = r#"
            [qc]
            peak_count_ceiling = 500
        "#;

        let config = Config::from_str(toml).unwrap();
        let options = config.qc.to_options().unwrap();
        assert_eq!(options.time_order, TimeOrderPolicy::Sort);
        assert_eq!(options.peak_count_ceiling, 500);
        assert_eq!(config.report.by_run_file, DEFAULT_BY_RUN_FILE);
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.qc.to_options().unwrap(), QcOptions::default());
        assert_eq!(config.report, ReportOptions::default());
    }

    #[test]
    fn test_rejects_unknown_policy() {
        assert!(Config::from_str("[qc]\ntime_order = \"shuffle\"").is_err());
    }

    #[test]
    fn test_rejects_oversized_ceiling() {
        let config = Config::from_str("[qc]\npeak_count_ceiling = 1000000000000").unwrap();
        let err = config.qc.to_options().unwrap_err();
        assert!(format!("{:#}", err).contains("peak count ceiling"));
    }
}
