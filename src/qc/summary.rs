//! Run aggregation: per-window summaries folded into per-run extrema.

use log::{debug, warn};
use serde::Serialize;

use crate::run::{RunIdentity, RunRecords};

use super::config::QcOptions;
use super::partition::{partition_isolation_windows, IsolationWindowGroup};
use super::stats::{PeakCountQuartiles, ScanGroupStats};
use super::TimeOrderPolicy;

/// Smallest and largest value seen; unset until the first update.
///
/// Comparisons are strict, so the first of several equal values is kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Extrema<T> {
    /// Smallest value
    pub min: Option<T>,
    /// Largest value
    pub max: Option<T>,
}

impl<T: PartialOrd + Copy> Extrema<T> {
    /// Fold one value in
    pub fn update(&mut self, value: T) {
        if self.min.map_or(true, |min| value < min) {
            self.min = Some(value);
        }
        if self.max.map_or(true, |max| value > max) {
            self.max = Some(value);
        }
    }
}

/// Derived statistics of one isolation window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IsolationWindowSummary {
    /// Isolation target m/z
    pub target_mz: f64,
    /// Lower window edge
    pub low_mz: f64,
    /// Upper window edge
    pub high_mz: f64,
    /// Window width
    pub width_mz: f64,
    /// FAIMS compensation voltage or ion mobility
    pub mobility: f64,
    /// Statistics over the window's scans
    pub stats: ScanGroupStats,
}

impl IsolationWindowGroup {
    /// Consume the group, keeping only its derived summary
    pub fn summarize(self, policy: TimeOrderPolicy) -> Option<IsolationWindowSummary> {
        let stats = ScanGroupStats::compute(self.scans(), policy)?;
        let low_mz = self.low_mz();
        let high_mz = self.high_mz();
        Some(IsolationWindowSummary {
            target_mz: self.target_mz(),
            low_mz,
            high_mz,
            width_mz: high_mz - low_mz,
            mobility: self.mobility(),
            stats,
        })
    }
}

/// Cross-window extrema of one run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WindowExtrema {
    /// Window low m/z (the minimum is the run's covered lower bound)
    pub low_mz: Extrema<f64>,
    /// Window high m/z (the maximum is the run's covered upper bound)
    pub high_mz: Extrema<f64>,
    /// Narrowest / widest window
    pub width_mz: Extrema<f64>,
    /// Earliest / latest TIC-median retention time
    pub tic_median_rt: Extrema<f64>,
    /// Smallest / largest total ion current
    pub total_ion_current: Extrema<f64>,
    /// Smallest / largest median peak count
    pub peak_count_median: Extrema<u32>,
    /// Fewest / most scans in a window
    pub scan_count: Extrema<usize>,
    #[serde(skip)]
    cycle_time_sum: f64,
    #[serde(skip)]
    cycle_time_windows: usize,
}

impl WindowExtrema {
    /// Fold one window summary in
    pub fn fold(&mut self, window: &IsolationWindowSummary) {
        let stats = &window.stats;
        self.low_mz.update(window.low_mz);
        self.high_mz.update(window.high_mz);
        self.width_mz.update(window.width_mz);
        self.tic_median_rt.update(stats.tic_percentile_times.p50);
        self.total_ion_current.update(stats.total_ion_current);
        self.peak_count_median.update(stats.peak_counts.median);
        self.scan_count.update(stats.scan_count);
        if let Some(cycle_time) = stats.cycle_time_median {
            self.cycle_time_sum += cycle_time;
            self.cycle_time_windows += 1;
        }
    }

    /// Mean of the windows' median cycle times (seconds), over the windows
    /// that have one
    pub fn average_median_cycle_time(&self) -> Option<f64> {
        if self.cycle_time_windows == 0 {
            None
        } else {
            Some(self.cycle_time_sum / self.cycle_time_windows as f64)
        }
    }
}

/// Quality metrics of one run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Run identity
    pub identity: RunIdentity,
    /// Number of MS1 spectra
    pub ms1_count: usize,
    /// Number of MS2 spectra
    pub ms2_count: usize,
    /// Latest scan start time in the run (minutes)
    pub rt_duration: f64,
    /// Statistics over all survey scans; `None` without MS1 spectra
    pub survey: Option<ScanGroupStats>,
    /// MS2 peak-count quartiles from the clamped histogram
    pub ms2_peak_count_quartiles: Option<PeakCountQuartiles>,
    /// Isolation windows in order of first appearance
    pub windows: Vec<IsolationWindowSummary>,
    /// Extrema across the windows
    pub extrema: WindowExtrema,
}

impl RunSummary {
    /// Number of isolation windows
    pub fn window_count(&self) -> usize {
        self.windows.len()
    }
}

/// Compute every metric of one run, consuming its records
pub fn summarize_run(records: RunRecords, options: &QcOptions) -> RunSummary {
    let RunRecords {
        identity,
        survey_scans,
        fragment_scans,
        max_acquisition_time,
        peak_count_histogram,
    } = records;

    let ms1_count = survey_scans.len();
    let ms2_count = fragment_scans.len();

    let survey = ScanGroupStats::compute(&survey_scans, options.time_order);
    if survey.as_ref().is_some_and(|s| s.reordered) {
        warn!(
            "{}: MS1 scans are not in acquisition-time order; sorted before computing percentiles",
            identity.source_file
        );
    }

    let mut windows = Vec::new();
    let mut extrema = WindowExtrema::default();
    for group in partition_isolation_windows(fragment_scans) {
        let Some(window) = group.summarize(options.time_order) else {
            continue;
        };
        if window.stats.reordered {
            warn!(
                "{}: isolation window {:.4}-{:.4} (mobility {}) is not in acquisition-time order; sorted before computing percentiles",
                identity.source_file, window.low_mz, window.high_mz, window.mobility
            );
        }
        debug!(
            "{}: window {:.4}-{:.4} mobility {}: {} scans",
            identity.source_file, window.low_mz, window.high_mz, window.mobility, window.stats.scan_count
        );
        extrema.fold(&window);
        windows.push(window);
    }

    RunSummary {
        ms1_count,
        ms2_count,
        rt_duration: max_acquisition_time,
        survey,
        ms2_peak_count_quartiles: peak_count_histogram.quartiles(),
        windows,
        extrema,
        identity,
    }
}

/// All runs of one invocation, in input order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunCollection {
    runs: Vec<RunSummary>,
}

impl RunCollection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a run
    pub fn push(&mut self, run: RunSummary) {
        self.runs.push(run);
    }

    /// Runs in input order
    pub fn runs(&self) -> &[RunSummary] {
        &self.runs
    }

    /// Iterate over runs
    pub fn iter(&self) -> std::slice::Iter<'_, RunSummary> {
        self.runs.iter()
    }

    /// Number of runs
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    /// Whether no run was collected
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Find a run by source file name
    pub fn find(&self, source_file: &str) -> Option<&RunSummary> {
        self.runs
            .iter()
            .find(|run| run.identity.source_file == source_file)
    }
}

impl FromIterator<RunSummary> for RunCollection {
    fn from_iter<I: IntoIterator<Item = RunSummary>>(iter: I) -> Self {
        Self {
            runs: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RunCollection {
    type Item = &'a RunSummary;
    type IntoIter = std::slice::Iter<'a, RunSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.runs.iter()
    }
}
