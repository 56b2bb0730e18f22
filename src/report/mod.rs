//! # Report Writers
//!
//! Thin serializers over a [`RunCollection`]:
//!
//! - `DIAMetric-byRun.tsv`: one row per run
//! - `DIAMetric-byIsolationWindow.tsv`: one row per isolation window
//! - `DIAMetric.mzQC`: mzQC JSON document with coded metrics per run

mod error;
pub mod mzqc;
pub mod tsv;

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

use crate::qc::RunCollection;

pub use error::ReportError;
pub use mzqc::{write_mzqc, MzQcFile};
pub use tsv::{write_by_run, write_by_window};

/// Default name of the per-run report
pub const DEFAULT_BY_RUN_FILE: &str = "DIAMetric-byRun.tsv";
/// Default name of the per-window report
pub const DEFAULT_BY_WINDOW_FILE: &str = "DIAMetric-byIsolationWindow.tsv";
/// Default name of the mzQC document
pub const DEFAULT_MZQC_FILE: &str = "DIAMetric.mzQC";

/// Where the reports go
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReportOptions {
    /// Directory receiving all reports
    pub output_dir: PathBuf,
    /// Per-run TSV file name
    pub by_run_file: String,
    /// Per-window TSV file name
    pub by_window_file: String,
    /// mzQC file name
    pub mzqc_file: String,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            by_run_file: DEFAULT_BY_RUN_FILE.to_string(),
            by_window_file: DEFAULT_BY_WINDOW_FILE.to_string(),
            mzqc_file: DEFAULT_MZQC_FILE.to_string(),
        }
    }
}

impl ReportOptions {
    /// Write reports into the given directory with default file names
    pub fn in_dir(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Default::default()
        }
    }

    /// Full path of the per-run report
    pub fn by_run_path(&self) -> PathBuf {
        self.output_dir.join(&self.by_run_file)
    }

    /// Full path of the per-window report
    pub fn by_window_path(&self) -> PathBuf {
        self.output_dir.join(&self.by_window_file)
    }

    /// Full path of the mzQC document
    pub fn mzqc_path(&self) -> PathBuf {
        self.output_dir.join(&self.mzqc_file)
    }
}

fn create(path: &Path) -> Result<BufWriter<File>, ReportError> {
    Ok(BufWriter::new(File::create(path)?))
}

/// Write all three reports, creating the output directory if needed
pub fn write_reports(runs: &RunCollection, options: &ReportOptions) -> Result<(), ReportError> {
    fs::create_dir_all(&options.output_dir)?;

    let by_run = options.by_run_path();
    write_by_run(runs, create(&by_run)?)?;
    info!("Wrote {}", by_run.display());

    let by_window = options.by_window_path();
    write_by_window(runs, create(&by_window)?)?;
    info!("Wrote {}", by_window.display());

    let mzqc = options.mzqc_path();
    write_mzqc(runs, create(&mzqc)?)?;
    info!("Wrote {}", mzqc.display());

    Ok(())
}
