//! # Scan Record Store
//!
//! Per-run records produced by the mzML field extractor: one [`SurveyScan`]
//! per MS1 spectrum and one [`FragmentScan`] per MS2 spectrum, kept in
//! acquisition (document) order.
//!
//! Fields absent from the source stay at zero. A zero isolation target is
//! indistinguishable from a missing one; that ambiguity comes from the input
//! format and is not corrected here.

pub mod scan_number;

use log::{debug, warn};

use crate::qc::stats::PeakCountQuartiles;

pub use scan_number::parse_scan_number;

/// Default top bucket of the peak-count histogram
pub const DEFAULT_PEAK_COUNT_CEILING: usize = 10_000;

/// Largest accepted histogram ceiling; larger requests are clamped
pub const MAX_PEAK_COUNT_CEILING: usize = 1_000_000;

/// Common view over survey and fragmentation scans used by the statistics engine
pub trait AcquiredScan {
    /// Acquisition (scan start) time in minutes
    fn acquisition_time(&self) -> f64;
    /// Total ion current
    fn total_ion_current(&self) -> f64;
    /// Number of peaks declared for the spectrum
    fn peak_count(&self) -> u32;
    /// Mass resolving power, zero when absent
    fn resolving_power(&self) -> u32;
}

/// A survey (MS1) scan
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurveyScan {
    /// Total ion current
    pub total_ion_current: f64,
    /// Declared peak count (`defaultArrayLength`)
    pub peak_count: u32,
    /// Scan start time in minutes
    pub acquisition_time: f64,
    /// Mass resolving power, zero when absent
    pub resolving_power: u32,
}

/// A fragmentation (MS2) scan
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FragmentScan {
    /// Native spectrum identifier
    pub native_id: String,
    /// Scan number derived from the native ID; zero until normalized
    pub scan_number: u32,
    /// Scan start time in minutes
    pub acquisition_time: f64,
    /// Declared peak count (`defaultArrayLength`)
    pub peak_count: u32,
    /// Mass resolving power, zero when absent
    pub resolving_power: u32,
    /// FAIMS compensation voltage or inverse ion mobility
    pub mobility: f64,
    /// Isolation window target m/z
    pub isolation_target: f64,
    /// Isolation window lower offset
    pub isolation_lower_offset: f64,
    /// Isolation window upper offset
    pub isolation_upper_offset: f64,
    /// Total ion current
    pub total_ion_current: f64,
}

impl AcquiredScan for SurveyScan {
    fn acquisition_time(&self) -> f64 {
        self.acquisition_time
    }

    fn total_ion_current(&self) -> f64 {
        self.total_ion_current
    }

    fn peak_count(&self) -> u32 {
        self.peak_count
    }

    fn resolving_power(&self) -> u32 {
        self.resolving_power
    }
}

impl AcquiredScan for FragmentScan {
    fn acquisition_time(&self) -> f64 {
        self.acquisition_time
    }

    fn total_ion_current(&self) -> f64 {
        self.total_ion_current
    }

    fn peak_count(&self) -> u32 {
        self.peak_count
    }

    fn resolving_power(&self) -> u32 {
        self.resolving_power
    }
}

/// Identity of a run as read from the file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunIdentity {
    /// File name without extension
    pub source_file: String,
    /// Instrument model name
    pub instrument: String,
    /// Instrument serial number
    pub serial_number: String,
    /// `startTimeStamp` of the `<run>` element
    pub start_timestamp: String,
}

/// Histogram of MS2 peak counts, clamped at a fixed ceiling
#[derive(Debug, Clone, PartialEq)]
pub struct PeakCountHistogram {
    buckets: Vec<u64>,
}

impl Default for PeakCountHistogram {
    fn default() -> Self {
        Self::new(DEFAULT_PEAK_COUNT_CEILING)
    }
}

impl PeakCountHistogram {
    /// Create an empty histogram whose last bucket collects counts `>= ceiling`.
    ///
    /// The ceiling is clamped to [`MAX_PEAK_COUNT_CEILING`].
    pub fn new(ceiling: usize) -> Self {
        if ceiling > MAX_PEAK_COUNT_CEILING {
            warn!(
                "peak count ceiling {} clamped to {}",
                ceiling, MAX_PEAK_COUNT_CEILING
            );
        }
        let ceiling = ceiling.min(MAX_PEAK_COUNT_CEILING);
        Self {
            buckets: vec![0; ceiling + 1],
        }
    }

    /// The top bucket index
    pub fn ceiling(&self) -> usize {
        self.buckets.len() - 1
    }

    /// Record one spectrum's peak count
    pub fn record(&mut self, peak_count: u32) {
        let bucket = (peak_count as usize).min(self.ceiling());
        self.buckets[bucket] += 1;
    }

    /// Number of spectra with the given (clamped) peak count
    pub fn count(&self, peak_count: usize) -> u64 {
        self.buckets[peak_count.min(self.ceiling())]
    }

    /// Total number of recorded spectra
    pub fn total(&self) -> u64 {
        self.buckets.iter().sum()
    }

    /// Quartiles over the recorded counts, using the same floor-index ranks
    /// as [`PeakCountQuartiles::from_counts`]. Counts above the ceiling are
    /// reported as the ceiling.
    pub fn quartiles(&self) -> Option<PeakCountQuartiles> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        let q1_rank = total / 4;
        let q2_rank = total / 2;
        let ranks = [0, q1_rank, q2_rank, q1_rank + q2_rank, total - 1];

        let mut values = [0u32; 5];
        let mut next = 0;
        let mut seen = 0u64;
        for (bucket, &count) in self.buckets.iter().enumerate() {
            if count == 0 {
                continue;
            }
            seen += count;
            while next < ranks.len() && ranks[next] < seen {
                values[next] = bucket as u32;
                next += 1;
            }
            if next == ranks.len() {
                break;
            }
        }

        Some(PeakCountQuartiles {
            min: values[0],
            q1: values[1],
            median: values[2],
            q3: values[3],
            max: values[4],
        })
    }
}

/// Raw per-run state built by the field extractor
#[derive(Debug, Clone, Default)]
pub struct RunRecords {
    /// Run identity fields
    pub identity: RunIdentity,
    /// Survey scans in acquisition order
    pub survey_scans: Vec<SurveyScan>,
    /// Fragmentation scans in acquisition order
    pub fragment_scans: Vec<FragmentScan>,
    /// Latest scan start time seen in the run (minutes)
    pub max_acquisition_time: f64,
    /// MS2 peak-count histogram
    pub peak_count_histogram: PeakCountHistogram,
}

impl RunRecords {
    /// Create empty records for a named source file
    pub fn new(source_file: impl Into<String>, peak_count_ceiling: usize) -> Self {
        Self {
            identity: RunIdentity {
                source_file: source_file.into(),
                ..Default::default()
            },
            peak_count_histogram: PeakCountHistogram::new(peak_count_ceiling),
            ..Default::default()
        }
    }

    /// Number of MS1 spectra
    pub fn ms1_count(&self) -> usize {
        self.survey_scans.len()
    }

    /// Number of MS2 spectra
    pub fn ms2_count(&self) -> usize {
        self.fragment_scans.len()
    }

    /// Derive each fragment scan's scan number from its native ID.
    ///
    /// IDs without a recognised key keep scan number 0; IDs whose key has a
    /// non-numeric value are logged and also keep 0.
    pub fn normalize_scan_numbers(&mut self) {
        let mut missing = 0usize;
        for scan in &mut self.fragment_scans {
            match parse_scan_number(&scan.native_id) {
                Ok(Some(number)) => scan.scan_number = number,
                Ok(None) => missing += 1,
                Err(e) => {
                    warn!(
                        "{}: cannot read scan number from native ID {:?}: {}",
                        self.identity.source_file, scan.native_id, e
                    );
                }
            }
        }
        if missing > 0 {
            debug!(
                "{}: {} MS2 native IDs carry no scan number",
                self.identity.source_file, missing
            );
        }
    }

    /// Find a fragmentation scan by its normalized scan number
    pub fn fragment_by_scan_number(&self, scan_number: u32) -> Option<&FragmentScan> {
        self.fragment_scans
            .iter()
            .find(|scan| scan.scan_number == scan_number)
    }
}
