//! Options for quality-metric computation.
//!
//! [`QcOptions`] is built by the caller (or from a configuration file) and
//! checked with [`QcOptions::validate`] before any run is read.

use serde::Deserialize;
use thiserror::Error;

use crate::run::{DEFAULT_PEAK_COUNT_CEILING, MAX_PEAK_COUNT_CEILING};

/// Rejected option values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QcOptionsError {
    /// The histogram ceiling is larger than the supported maximum
    #[error("peak count ceiling {ceiling} exceeds the maximum of {max}")]
    PeakCountCeilingTooLarge {
        /// Requested ceiling
        ceiling: usize,
        /// Largest accepted ceiling
        max: usize,
    },
}

/// What to do when a scan sequence is not in acquisition-time order.
///
/// TIC-weighted percentiles and cycle times assume scans arrive in
/// non-decreasing acquisition time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOrderPolicy {
    /// Check the order; if violated, log a warning and compute over a stable
    /// time-sorted view
    #[default]
    Sort,
    /// Compute in the given order without checking
    Trust,
}

/// Options controlling quality-metric computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QcOptions {
    /// Time-ordering policy for the statistics engine
    pub time_order: TimeOrderPolicy,
    /// Top bucket of the MS2 peak-count histogram
    pub peak_count_ceiling: usize,
}

impl Default for QcOptions {
    fn default() -> Self {
        Self {
            time_order: TimeOrderPolicy::default(),
            peak_count_ceiling: DEFAULT_PEAK_COUNT_CEILING,
        }
    }
}

impl QcOptions {
    /// Set the time-ordering policy
    pub fn with_time_order(mut self, time_order: TimeOrderPolicy) -> Self {
        self.time_order = time_order;
        self
    }

    /// Set the peak-count histogram ceiling
    pub fn with_peak_count_ceiling(mut self, ceiling: usize) -> Self {
        self.peak_count_ceiling = ceiling;
        self
    }

    /// Check that every option is within its supported range
    pub fn validate(&self) -> Result<(), QcOptionsError> {
        if self.peak_count_ceiling > MAX_PEAK_COUNT_CEILING {
            return Err(QcOptionsError::PeakCountCeilingTooLarge {
                ceiling: self.peak_count_ceiling,
                max: MAX_PEAK_COUNT_CEILING,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_are_valid() {
        assert_eq!(QcOptions::default().validate(), Ok(()));
        let at_max = QcOptions::default().with_peak_count_ceiling(MAX_PEAK_COUNT_CEILING);
        assert_eq!(at_max.validate(), Ok(()));
    }

    #[test]
    fn test_oversized_ceiling_is_rejected() {
        let options = QcOptions::default().with_peak_count_ceiling(usize::MAX);
        assert_eq!(
            options.validate(),
            Err(QcOptionsError::PeakCountCeilingTooLarge {
                ceiling: usize::MAX,
                max: MAX_PEAK_COUNT_CEILING,
            })
        );
    }
}
