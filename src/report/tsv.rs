//! Tab-separated reports: one row per run and one row per isolation window.
//!
//! Absent values (`None`) are written as empty cells.

use std::io::Write;

use serde::Serialize;

use crate::qc::{RunCollection, RunSummary};

use super::ReportError;

/// Header of the per-run report
pub const BY_RUN_HEADERS: [&str; 26] = [
    "SourceFile",
    "Instrument",
    "SerialNumber",
    "StartTimeStamp",
    "RTDuration",
    "mzMLMS1Count",
    "mzMLMSnCount",
    "IsolationWindowCount",
    "CyclesMin",
    "CyclesMax",
    "MZRangeMin",
    "MZRangeMax",
    "IsolationWindowWidthMin",
    "IsolationWindowWidthMax",
    "AverageMedianCycleTime",
    "TICMedianRTMin",
    "TICMedianRTMax",
    "TotalTICMin",
    "TotalTICMax",
    "PkCountMedianMin",
    "PkCountMedianMax",
    "MS1TotalTIC",
    "MS1TIC50ileRT",
    "MS1CycleTimeMedian",
    "MS1PkCountMedian",
    "MS2PkCountMedian",
];

/// Header of the per-isolation-window report
pub const BY_WINDOW_HEADERS: [&str; 18] = [
    "SourceFile",
    "LoMZ",
    "HiMZ",
    "WidthMZ",
    "FAIMS",
    "MSMSCount",
    "RTMin",
    "RTMax",
    "CycleTimeMedian",
    "TIC25ileRT",
    "TIC50ileRT",
    "TIC75ileRT",
    "TotalTIC",
    "PkCount25ile",
    "PkCount50ile",
    "PkCount75ile",
    "PkCountMax",
    "ResolvingPowerMedian",
];

/// Row of the per-run report, in [`BY_RUN_HEADERS`] order
#[derive(Debug, Serialize)]
struct RunRow<'a> {
    source_file: &'a str,
    instrument: &'a str,
    serial_number: &'a str,
    start_timestamp: &'a str,
    rt_duration: f64,
    ms1_count: usize,
    ms2_count: usize,
    window_count: usize,
    cycles_min: Option<usize>,
    cycles_max: Option<usize>,
    mz_range_min: Option<f64>,
    mz_range_max: Option<f64>,
    width_min: Option<f64>,
    width_max: Option<f64>,
    average_median_cycle_time: Option<f64>,
    tic_median_rt_min: Option<f64>,
    tic_median_rt_max: Option<f64>,
    total_tic_min: Option<f64>,
    total_tic_max: Option<f64>,
    peak_count_median_min: Option<u32>,
    peak_count_median_max: Option<u32>,
    ms1_total_tic: Option<f64>,
    ms1_tic_median_rt: Option<f64>,
    ms1_cycle_time_median: Option<f64>,
    ms1_peak_count_median: Option<u32>,
    ms2_peak_count_median: Option<u32>,
}

impl<'a> RunRow<'a> {
    fn new(run: &'a RunSummary) -> Self {
        let extrema = &run.extrema;
        let survey = run.survey.as_ref();
        Self {
            source_file: &run.identity.source_file,
            instrument: &run.identity.instrument,
            serial_number: &run.identity.serial_number,
            start_timestamp: &run.identity.start_timestamp,
            rt_duration: run.rt_duration,
            ms1_count: run.ms1_count,
            ms2_count: run.ms2_count,
            window_count: run.window_count(),
            cycles_min: extrema.scan_count.min,
            cycles_max: extrema.scan_count.max,
            mz_range_min: extrema.low_mz.min,
            mz_range_max: extrema.high_mz.max,
            width_min: extrema.width_mz.min,
            width_max: extrema.width_mz.max,
            average_median_cycle_time: extrema.average_median_cycle_time(),
            tic_median_rt_min: extrema.tic_median_rt.min,
            tic_median_rt_max: extrema.tic_median_rt.max,
            total_tic_min: extrema.total_ion_current.min,
            total_tic_max: extrema.total_ion_current.max,
            peak_count_median_min: extrema.peak_count_median.min,
            peak_count_median_max: extrema.peak_count_median.max,
            ms1_total_tic: survey.map(|s| s.total_ion_current),
            ms1_tic_median_rt: survey.map(|s| s.tic_percentile_times.p50),
            ms1_cycle_time_median: survey.and_then(|s| s.cycle_time_median),
            ms1_peak_count_median: survey.map(|s| s.peak_counts.median),
            ms2_peak_count_median: run.ms2_peak_count_quartiles.map(|q| q.median),
        }
    }
}

/// Row of the per-window report, in [`BY_WINDOW_HEADERS`] order
#[derive(Debug, Serialize)]
struct WindowRow<'a> {
    source_file: &'a str,
    low_mz: f64,
    high_mz: f64,
    width_mz: f64,
    mobility: f64,
    scan_count: usize,
    first_time: f64,
    last_time: f64,
    cycle_time_median: Option<f64>,
    tic_p25: f64,
    tic_p50: f64,
    tic_p75: f64,
    total_tic: f64,
    peak_count_q1: u32,
    peak_count_median: u32,
    peak_count_q3: u32,
    peak_count_max: u32,
    resolving_power_median: u32,
}

fn tsv_writer<W: Write>(writer: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_writer(writer)
}

/// Write the per-run report
pub fn write_by_run<W: Write>(runs: &RunCollection, writer: W) -> Result<(), ReportError> {
    let mut tsv = tsv_writer(writer);
    tsv.write_record(BY_RUN_HEADERS)?;
    for run in runs {
        tsv.serialize(RunRow::new(run))?;
    }
    tsv.flush()?;
    Ok(())
}

/// Write the per-isolation-window report, runs in collection order
pub fn write_by_window<W: Write>(runs: &RunCollection, writer: W) -> Result<(), ReportError> {
    let mut tsv = tsv_writer(writer);
    tsv.write_record(BY_WINDOW_HEADERS)?;
    for run in runs {
        for window in &run.windows {
            let stats = &window.stats;
            tsv.serialize(WindowRow {
                source_file: &run.identity.source_file,
                low_mz: window.low_mz,
                high_mz: window.high_mz,
                width_mz: window.width_mz,
                mobility: window.mobility,
                scan_count: stats.scan_count,
                first_time: stats.first_time,
                last_time: stats.last_time,
                cycle_time_median: stats.cycle_time_median,
                tic_p25: stats.tic_percentile_times.p25,
                tic_p50: stats.tic_percentile_times.p50,
                tic_p75: stats.tic_percentile_times.p75,
                total_tic: stats.total_ion_current,
                peak_count_q1: stats.peak_counts.q1,
                peak_count_median: stats.peak_counts.median,
                peak_count_q3: stats.peak_counts.q3,
                peak_count_max: stats.peak_counts.max,
                resolving_power_median: stats.resolving_power_median,
            })?;
        }
    }
    tsv.flush()?;
    Ok(())
}
