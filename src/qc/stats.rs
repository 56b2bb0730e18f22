//! Order statistics over a time-ordered group of scans.
//!
//! All quantiles use floor indexing into a sorted array rather than
//! interpolation: for `n` values the quartile positions are
//! `0, n/4, n/2, n/4 + n/2, n - 1`.

use serde::Serialize;

use crate::run::AcquiredScan;

use super::config::TimeOrderPolicy;

/// Minutes to seconds
const SECONDS_PER_MINUTE: f64 = 60.0;

/// Sorted-array positions of min, Q1, median, Q3 and max for `n >= 1` values
pub fn quartile_indices(n: usize) -> [usize; 5] {
    debug_assert!(n > 0);
    let q1 = n / 4;
    let q2 = n / 2;
    [0, q1, q2, q1 + q2, n - 1]
}

/// Five-number summary of peak counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PeakCountQuartiles {
    /// Smallest count
    pub min: u32,
    /// First quartile
    pub q1: u32,
    /// Median
    pub median: u32,
    /// Third quartile
    pub q3: u32,
    /// Largest count
    pub max: u32,
}

impl PeakCountQuartiles {
    /// Quartiles of a set of counts; `None` when empty
    pub fn from_counts(counts: &[u32]) -> Option<Self> {
        if counts.is_empty() {
            return None;
        }
        let mut sorted = counts.to_vec();
        sorted.sort_unstable();
        let [min, q1, median, q3, max] = quartile_indices(sorted.len()).map(|i| sorted[i]);
        Some(Self {
            min,
            q1,
            median,
            q3,
            max,
        })
    }
}

/// Acquisition times at which cumulative ion current reaches 25/50/75% of the total
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TicPercentileTimes {
    /// Time reaching one quarter of the total
    pub p25: f64,
    /// Time reaching half of the total
    pub p50: f64,
    /// Time reaching three quarters of the total
    pub p75: f64,
}

/// Statistics shared by a whole MS1 sequence and by one isolation window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanGroupStats {
    /// Number of scans
    pub scan_count: usize,
    /// Acquisition time of the first scan (minutes)
    pub first_time: f64,
    /// Acquisition time of the last scan (minutes)
    pub last_time: f64,
    /// Sum of ion current over the group
    pub total_ion_current: f64,
    /// TIC-weighted retention-time percentiles (minutes)
    pub tic_percentile_times: TicPercentileTimes,
    /// Peak-count five-number summary
    pub peak_counts: PeakCountQuartiles,
    /// Median time between consecutive scans in seconds; `None` for a single scan
    pub cycle_time_median: Option<f64>,
    /// Median mass resolving power (zero when the source never reports it)
    pub resolving_power_median: u32,
    /// Whether the input was out of time order and had to be sorted
    pub reordered: bool,
}

impl ScanGroupStats {
    /// Compute statistics over a group; `None` for an empty group.
    ///
    /// Percentiles and cycle times need non-decreasing acquisition times.
    /// Under [`TimeOrderPolicy::Sort`] a violation is repaired on a stable
    /// sorted view (the caller's slice is untouched); under
    /// [`TimeOrderPolicy::Trust`] results for unordered input are wrong.
    pub fn compute<S: AcquiredScan>(scans: &[S], policy: TimeOrderPolicy) -> Option<Self> {
        if scans.is_empty() {
            return None;
        }

        let mut ordered: Vec<&S> = scans.iter().collect();
        let reordered = policy == TimeOrderPolicy::Sort && !is_time_ordered(scans);
        if reordered {
            ordered.sort_by(|a, b| a.acquisition_time().total_cmp(&b.acquisition_time()));
        }

        let total_ion_current: f64 = ordered.iter().map(|s| s.total_ion_current()).sum();
        let peak_counts: Vec<u32> = ordered.iter().map(|s| s.peak_count()).collect();
        let times: Vec<f64> = ordered.iter().map(|s| s.acquisition_time()).collect();
        let mut resolving_powers: Vec<u32> = ordered.iter().map(|s| s.resolving_power()).collect();
        resolving_powers.sort_unstable();

        Some(Self {
            scan_count: ordered.len(),
            first_time: times[0],
            last_time: times[times.len() - 1],
            total_ion_current,
            tic_percentile_times: tic_percentile_times(&ordered, total_ion_current),
            peak_counts: PeakCountQuartiles::from_counts(&peak_counts)?,
            cycle_time_median: cycle_time_median(&times),
            resolving_power_median: resolving_powers[resolving_powers.len() / 2],
            reordered,
        })
    }
}

/// Whether acquisition times never decrease
pub fn is_time_ordered<S: AcquiredScan>(scans: &[S]) -> bool {
    scans
        .windows(2)
        .all(|pair| pair[0].acquisition_time() <= pair[1].acquisition_time())
}

/// Times of the first scans whose cumulative ion current reaches each quartile
/// of `total`. Scans are taken in the given order.
pub fn tic_percentile_times<S: AcquiredScan>(scans: &[&S], total: f64) -> TicPercentileTimes {
    let quarter = total / 4.0;
    let half = total / 2.0;
    let thresholds = [quarter, half, quarter + half];
    let fallback = scans.last().map(|s| s.acquisition_time()).unwrap_or(0.0);
    let mut found = [fallback; 3];

    let mut next = 0;
    let mut cumulative = 0.0;
    for scan in scans {
        cumulative += scan.total_ion_current();
        while next < thresholds.len() && cumulative >= thresholds[next] {
            found[next] = scan.acquisition_time();
            next += 1;
        }
        if next == thresholds.len() {
            break;
        }
    }

    TicPercentileTimes {
        p25: found[0],
        p50: found[1],
        p75: found[2],
    }
}

/// Median of consecutive time differences, converted from minutes to seconds.
///
/// With `m = n - 1` differences the median is the sorted value at `m / 2`.
/// Fewer than two times have no cycle time.
pub fn cycle_time_median(times: &[f64]) -> Option<f64> {
    if times.len() < 2 {
        return None;
    }
    let mut deltas: Vec<f64> = times.windows(2).map(|pair| pair[1] - pair[0]).collect();
    deltas.sort_by(|a, b| a.total_cmp(b));
    Some(deltas[deltas.len() / 2] * SECONDS_PER_MINUTE)
}
