//! # DIAMetric - Quality Metrics for Data-Independent Acquisition
//!
//! `diametric` reads mzML runs in a single streaming pass and computes
//! quality-control statistics describing how the instrument behaved over
//! time: overall survey-scan (MS1) statistics and, separately, statistics for
//! each isolation window ("swath") of a DIA method.
//!
//! ## Key Features
//!
//! - **Streaming extraction**: only the fields the metrics need are kept;
//!   binary peak arrays are never decoded.
//!
//! - **Isolation-window partitioning**: fragmentation scans are grouped by
//!   exact (target m/z, mobility) pair, so FAIMS compensation voltages and
//!   ion-mobility steps yield distinct windows.
//!
//! - **Order statistics**: TIC-weighted retention-time percentiles,
//!   peak-count quartiles and median cycle time per window, folded into
//!   per-run extrema.
//!
//! - **Reports**: per-run and per-window TSV tables plus an mzQC document.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use diametric::pipeline::process_files;
//! use diametric::qc::QcOptions;
//! use diametric::report::{write_reports, ReportOptions};
//!
//! let runs = process_files(&["run01.mzML", "run02.mzML"], &QcOptions::default())?;
//! for run in &runs {
//!     println!(
//!         "{}: {} windows, average median cycle time {:?} s",
//!         run.identity.source_file,
//!         run.window_count(),
//!         run.extrema.average_median_cycle_time()
//!     );
//! }
//! write_reports(&runs, &ReportOptions::in_dir("qc"))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! mzML ─► mzml (FieldExtractor) ─► run (RunRecords, scan numbers)
//!      ─► qc::partition ─► qc::stats ─► qc::summary (RunSummary)
//!      ─► report (TSV, mzQC)
//! ```
//!
//! - [`controlled_vocabulary`]: PSI-MS accessions and metric terms
//! - [`mzml`]: streaming field extraction
//! - [`run`]: per-run scan records and scan-number normalization
//! - [`qc`]: partitioning, statistics and run aggregation
//! - [`pipeline`]: per-file and multi-file processing
//! - [`report`]: report writers

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod controlled_vocabulary;
pub mod mzml;
pub mod pipeline;
pub mod qc;
pub mod report;
pub mod run;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::controlled_vocabulary::{qc_terms, CvTerm, MS_CV_ACCESSIONS};
    pub use crate::mzml::{CvParam, FieldExtractor, MzMLError, MzMLStreamer};
    pub use crate::pipeline::{discover_inputs, process_file, process_files, PipelineError};
    pub use crate::qc::{
        summarize_run, IsolationWindowSummary, PeakCountQuartiles, QcOptions, RunCollection,
        RunSummary, ScanGroupStats, TimeOrderPolicy, WindowExtrema,
    };
    pub use crate::report::{write_reports, ReportError, ReportOptions};
    pub use crate::run::{FragmentScan, RunIdentity, RunRecords, SurveyScan};
}
