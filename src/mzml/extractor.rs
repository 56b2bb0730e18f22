//! Field extraction state machine.
//!
//! The streamer turns XML events into three calls on [`FieldExtractor`]:
//! a `<run>` start, a `<spectrum>` start, and each `cvParam`. Values are
//! routed to the scan opened by the most recent `ms level` term, not by
//! element nesting, so the source must list the level before the values
//! that depend on it (mzML writers do).
//!
//! The active scan is reset at every spectrum start and when the chromatogram
//! list begins; values seen while no scan is open are dropped.

use log::trace;

use crate::controlled_vocabulary::{is_instrument_model, MS_CV_ACCESSIONS};
use crate::run::{FragmentScan, RunRecords, SurveyScan};

use super::cv_params::{normalize_retention_time, CvParam};
use super::streamer::MzMLError;

/// Which record currently receives scan-level values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveScan {
    /// No scan open
    None,
    /// The last survey scan
    Survey,
    /// The last fragmentation scan
    Fragment,
}

#[derive(Debug, Default)]
struct PendingSpectrum {
    native_id: String,
    peak_count: u32,
}

/// Builds one run's [`RunRecords`] from a sequence of parse events
#[derive(Debug)]
pub struct FieldExtractor {
    records: RunRecords,
    pending: PendingSpectrum,
    active: ActiveScan,
}

impl FieldExtractor {
    /// Create an extractor for the named source
    pub fn new(source_file: impl Into<String>, peak_count_ceiling: usize) -> Self {
        Self {
            records: RunRecords::new(source_file, peak_count_ceiling),
            pending: PendingSpectrum::default(),
            active: ActiveScan::None,
        }
    }

    /// Which scan is currently open
    pub fn active(&self) -> ActiveScan {
        self.active
    }

    /// Records built so far
    pub fn records(&self) -> &RunRecords {
        &self.records
    }

    /// `<run>` element seen
    pub fn start_run(&mut self, start_timestamp: Option<String>) {
        self.records.identity.start_timestamp = start_timestamp.unwrap_or_default();
    }

    /// `<spectrum>` element seen; its MS level is not known yet
    pub fn start_spectrum(&mut self, native_id: String, peak_count: u32) {
        self.pending = PendingSpectrum {
            native_id,
            peak_count,
        };
        self.active = ActiveScan::None;
    }

    /// Leaving the spectra; later scan-level terms belong to chromatograms
    pub fn end_spectra(&mut self) {
        self.active = ActiveScan::None;
    }

    /// Route one `cvParam` to the run or the active scan.
    ///
    /// Unknown accessions are ignored. A known numeric term whose value does
    /// not parse is an error.
    pub fn apply_cv_param(&mut self, param: &CvParam) -> Result<(), MzMLError> {
        let accession = param.accession.as_str();
        if is_instrument_model(accession) {
            self.records.identity.instrument = param.name.clone();
            return Ok(());
        }

        match accession {
            MS_CV_ACCESSIONS::INSTRUMENT_SERIAL_NUMBER => {
                self.records.identity.serial_number = param.value_str().to_string();
            }
            MS_CV_ACCESSIONS::MS_LEVEL => {
                let level: u32 = param.parse_value()?;
                self.open_scan(level);
            }
            MS_CV_ACCESSIONS::SCAN_START_TIME => {
                let time =
                    normalize_retention_time(param.parse_value()?, param.unit_accession.as_deref());
                if time > self.records.max_acquisition_time {
                    self.records.max_acquisition_time = time;
                }
                self.with_scan(
                    param,
                    |survey| survey.acquisition_time = time,
                    |fragment| fragment.acquisition_time = time,
                );
            }
            MS_CV_ACCESSIONS::TOTAL_ION_CURRENT => {
                let tic: f64 = param.parse_value()?;
                self.with_scan(
                    param,
                    |survey| survey.total_ion_current = tic,
                    |fragment| fragment.total_ion_current = tic,
                );
            }
            MS_CV_ACCESSIONS::MASS_RESOLVING_POWER => {
                let value: f64 = param.parse_value()?;
                let resolving_power = value.round() as u32;
                self.with_scan(
                    param,
                    |survey| survey.resolving_power = resolving_power,
                    |fragment| fragment.resolving_power = resolving_power,
                );
            }
            MS_CV_ACCESSIONS::FAIMS_COMPENSATION_VOLTAGE
            | MS_CV_ACCESSIONS::INVERSE_REDUCED_ION_MOBILITY => {
                let mobility: f64 = param.parse_value()?;
                self.with_fragment(param, |fragment| fragment.mobility = mobility);
            }
            MS_CV_ACCESSIONS::ISOLATION_WINDOW_TARGET_MZ => {
                let target: f64 = param.parse_value()?;
                self.with_fragment(param, |fragment| fragment.isolation_target = target);
            }
            MS_CV_ACCESSIONS::ISOLATION_WINDOW_LOWER_OFFSET => {
                let offset: f64 = param.parse_value()?;
                self.with_fragment(param, |fragment| fragment.isolation_lower_offset = offset);
            }
            MS_CV_ACCESSIONS::ISOLATION_WINDOW_UPPER_OFFSET => {
                let offset: f64 = param.parse_value()?;
                self.with_fragment(param, |fragment| fragment.isolation_upper_offset = offset);
            }
            _ => {}
        }
        Ok(())
    }

    /// Finish the run
    pub fn finish(self) -> RunRecords {
        self.records
    }

    /// Level 1 opens a survey scan; every other level opens a fragment scan
    fn open_scan(&mut self, level: u32) {
        match level {
            1 => {
                self.records.survey_scans.push(SurveyScan {
                    peak_count: self.pending.peak_count,
                    ..Default::default()
                });
                self.active = ActiveScan::Survey;
            }
            _ => {
                self.records.fragment_scans.push(FragmentScan {
                    native_id: self.pending.native_id.clone(),
                    peak_count: self.pending.peak_count,
                    ..Default::default()
                });
                self.records
                    .peak_count_histogram
                    .record(self.pending.peak_count);
                self.active = ActiveScan::Fragment;
            }
        }
    }

    fn with_scan(
        &mut self,
        param: &CvParam,
        survey: impl FnOnce(&mut SurveyScan),
        fragment: impl FnOnce(&mut FragmentScan),
    ) {
        match self.active {
            ActiveScan::Survey => {
                if let Some(scan) = self.records.survey_scans.last_mut() {
                    survey(scan);
                }
            }
            ActiveScan::Fragment => {
                if let Some(scan) = self.records.fragment_scans.last_mut() {
                    fragment(scan);
                }
            }
            ActiveScan::None => trace!("dropping {} outside of a scan", param.accession),
        }
    }

    fn with_fragment(&mut self, param: &CvParam, fragment: impl FnOnce(&mut FragmentScan)) {
        self.with_scan(param, |_| {}, fragment);
    }
}
