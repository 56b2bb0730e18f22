//! # DIA Quality Metrics
//!
//! Turns the scan records of one run into its quality metrics:
//!
//! 1. [`partition`] groups fragmentation scans by isolation window
//!    (target m/z and mobility).
//! 2. [`stats`] computes order statistics over each group and over the
//!    survey scans: TIC-weighted retention-time percentiles, peak-count
//!    quartiles and the median cycle time.
//! 3. [`summary`] folds the per-window results into run-level extrema.
//!
//! ```rust,no_run
//! use diametric::mzml::MzMLStreamer;
//! use diametric::qc::{summarize_run, QcOptions};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let records = MzMLStreamer::open("run01.mzML")?.read_run()?;
//! let run = summarize_run(records, &QcOptions::default());
//! println!("{} isolation windows", run.window_count());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod partition;
pub mod stats;
pub mod summary;

pub use config::{QcOptions, QcOptionsError, TimeOrderPolicy};
pub use partition::{partition_isolation_windows, IsolationWindowGroup, IsolationWindowKey};
pub use stats::{PeakCountQuartiles, ScanGroupStats, TicPercentileTimes};
pub use summary::{
    summarize_run, Extrema, IsolationWindowSummary, RunCollection, RunSummary, WindowExtrema,
};
