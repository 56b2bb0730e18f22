//! mzQC (JSON) quality-metrics document.
//!
//! One `runQuality` per run. Standard PSI-MS terms are used where one
//! exists; the DIA-specific metrics use a local vocabulary declared in
//! `controlledVocabularies`. The per-window table is column oriented, with
//! one array per column.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};

use crate::controlled_vocabulary::{qc_terms, CvTerm, MS_CV_ACCESSIONS};
use crate::qc::{IsolationWindowSummary, RunCollection, RunSummary};

use super::ReportError;

/// mzQC format version written
pub const MZQC_VERSION: &str = "1.0.0";

const PSI_MS_NAME: &str = "Proteomics Standards Initiative Mass Spectrometry Ontology";
const PSI_MS_URI: &str = "https://raw.githubusercontent.com/HUPO-PSI/psi-ms-CV/master/psi-ms.obo";

/// Top-level wrapper: `{"mzQC": {...}}`
#[derive(Debug, Serialize)]
pub struct MzQcFile {
    /// The document
    #[serde(rename = "mzQC")]
    pub mz_qc: MzQcDocument,
}

/// The mzQC document body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MzQcDocument {
    /// Format version
    pub version: String,
    /// RFC 3339 creation timestamp
    pub creation_date: String,
    /// Free-text description
    pub description: String,
    /// One entry per run
    pub run_qualities: Vec<RunQuality>,
    /// Vocabularies the metric accessions come from
    pub controlled_vocabularies: Vec<ControlledVocabulary>,
}

/// Metrics of one run
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunQuality {
    /// Input file and software description
    pub metadata: RunMetadata,
    /// Named, coded metrics
    pub quality_metrics: Vec<QualityMetric>,
}

/// Provenance of one run's metrics
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunMetadata {
    /// Run label
    pub label: String,
    /// Input files (one mzML per run)
    pub input_files: Vec<InputFile>,
    /// Software that computed the metrics
    pub analysis_software: Vec<AnalysisSoftware>,
}

/// One input file
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputFile {
    /// File location
    pub location: String,
    /// File name
    pub name: String,
    /// File format term
    pub file_format: CvTerm,
    /// Instrument and acquisition properties
    pub file_properties: Vec<QualityMetric>,
}

/// Analysis software entry
#[derive(Debug, Serialize)]
pub struct AnalysisSoftware {
    /// Software term accession
    pub accession: String,
    /// Software name
    pub name: String,
    /// Software version
    pub version: String,
}

/// A coded value
#[derive(Debug, Clone, Serialize)]
pub struct QualityMetric {
    /// Term accession
    pub accession: String,
    /// Term name
    pub name: String,
    /// Value
    pub value: Value,
}

impl QualityMetric {
    fn new(term: CvTerm, value: Value) -> Self {
        Self {
            accession: term.accession,
            name: term.name,
            value,
        }
    }
}

/// Controlled vocabulary declaration
#[derive(Debug, Serialize)]
pub struct ControlledVocabulary {
    /// Vocabulary name
    pub name: String,
    /// Where the vocabulary can be found
    pub uri: String,
    /// Vocabulary version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl MzQcFile {
    /// Build the document for a collection of runs
    pub fn from_runs(runs: &RunCollection, created: DateTime<Utc>) -> Self {
        Self {
            mz_qc: MzQcDocument {
                version: MZQC_VERSION.to_string(),
                creation_date: created.to_rfc3339(),
                description: "Quality metrics for data-independent acquisition runs".to_string(),
                run_qualities: runs.iter().map(run_quality).collect(),
                controlled_vocabularies: vec![
                    ControlledVocabulary {
                        name: PSI_MS_NAME.to_string(),
                        uri: PSI_MS_URI.to_string(),
                        version: None,
                    },
                    ControlledVocabulary {
                        name: format!("{} local metric vocabulary", env!("CARGO_PKG_NAME")),
                        uri: qc_terms::LOCAL_CV_PREFIX.to_string(),
                        version: Some(env!("CARGO_PKG_VERSION").to_string()),
                    },
                ],
            },
        }
    }

    /// Write as pretty-printed JSON
    pub fn write_to<W: Write>(&self, writer: W) -> Result<(), ReportError> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}

/// Write the mzQC document for a collection of runs, stamped with the current time
pub fn write_mzqc<W: Write>(runs: &RunCollection, writer: W) -> Result<(), ReportError> {
    MzQcFile::from_runs(runs, Utc::now()).write_to(writer)
}

fn run_quality(run: &RunSummary) -> RunQuality {
    let identity = &run.identity;
    let mut file_properties = vec![QualityMetric::new(
        CvTerm::new(MS_CV_ACCESSIONS::COMPLETION_TIME, "completion time"),
        json!(identity.start_timestamp),
    )];
    if !identity.instrument.is_empty() {
        file_properties.push(QualityMetric::new(
            CvTerm::new(MS_CV_ACCESSIONS::INSTRUMENT_MODEL, "instrument model"),
            json!(identity.instrument),
        ));
    }
    if !identity.serial_number.is_empty() {
        file_properties.push(QualityMetric::new(
            CvTerm::new(MS_CV_ACCESSIONS::INSTRUMENT_SERIAL_NUMBER, "instrument serial number"),
            json!(identity.serial_number),
        ));
    }

    RunQuality {
        metadata: RunMetadata {
            label: identity.source_file.clone(),
            input_files: vec![InputFile {
                location: format!("{}.mzML", identity.source_file),
                name: identity.source_file.clone(),
                file_format: CvTerm::new(MS_CV_ACCESSIONS::MZML_FORMAT, "mzML format"),
                file_properties,
            }],
            analysis_software: vec![AnalysisSoftware {
                accession: MS_CV_ACCESSIONS::CUSTOM_SOFTWARE.to_string(),
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            }],
        },
        quality_metrics: quality_metrics(run),
    }
}

fn range<T: Serialize>(min: Option<T>, max: Option<T>) -> Value {
    json!([min, max])
}

fn quality_metrics(run: &RunSummary) -> Vec<QualityMetric> {
    let extrema = &run.extrema;
    let mut metrics = vec![
        QualityMetric::new(qc_terms::ms1_count(), json!(run.ms1_count)),
        QualityMetric::new(qc_terms::ms2_count(), json!(run.ms2_count)),
        QualityMetric::new(qc_terms::rt_duration(), json!(run.rt_duration)),
        QualityMetric::new(qc_terms::isolation_window_count(), json!(run.window_count())),
        QualityMetric::new(
            qc_terms::cycle_count_range(),
            range(extrema.scan_count.min, extrema.scan_count.max),
        ),
        QualityMetric::new(
            qc_terms::mz_range(),
            range(extrema.low_mz.min, extrema.high_mz.max),
        ),
        QualityMetric::new(
            qc_terms::window_width_range(),
            range(extrema.width_mz.min, extrema.width_mz.max),
        ),
        QualityMetric::new(
            qc_terms::average_median_cycle_time(),
            json!(extrema.average_median_cycle_time()),
        ),
        QualityMetric::new(
            qc_terms::tic_median_rt_range(),
            range(extrema.tic_median_rt.min, extrema.tic_median_rt.max),
        ),
        QualityMetric::new(
            qc_terms::total_tic_range(),
            range(extrema.total_ion_current.min, extrema.total_ion_current.max),
        ),
        QualityMetric::new(
            qc_terms::peak_count_median_range(),
            range(extrema.peak_count_median.min, extrema.peak_count_median.max),
        ),
    ];

    if let Some(survey) = &run.survey {
        metrics.push(QualityMetric::new(qc_terms::ms1_summary(), json!(survey)));
    }
    if let Some(quartiles) = &run.ms2_peak_count_quartiles {
        metrics.push(QualityMetric::new(
            qc_terms::ms2_peak_count_quartiles(),
            json!(quartiles),
        ));
    }
    if !run.windows.is_empty() {
        metrics.push(QualityMetric::new(
            qc_terms::isolation_window_table(),
            window_table(run),
        ));
    }

    metrics
}

fn column(run: &RunSummary, cell: impl Fn(&IsolationWindowSummary) -> Value) -> Value {
    Value::Array(run.windows.iter().map(cell).collect())
}

fn window_table(run: &RunSummary) -> Value {
    json!({
        "LoMZ": column(run, |w| json!(w.low_mz)),
        "HiMZ": column(run, |w| json!(w.high_mz)),
        "WidthMZ": column(run, |w| json!(w.width_mz)),
        "Mobility": column(run, |w| json!(w.mobility)),
        "MSMSCount": column(run, |w| json!(w.stats.scan_count)),
        "RTMin": column(run, |w| json!(w.stats.first_time)),
        "RTMax": column(run, |w| json!(w.stats.last_time)),
        "CycleTimeMedian": column(run, |w| json!(w.stats.cycle_time_median)),
        "TIC25ileRT": column(run, |w| json!(w.stats.tic_percentile_times.p25)),
        "TIC50ileRT": column(run, |w| json!(w.stats.tic_percentile_times.p50)),
        "TIC75ileRT": column(run, |w| json!(w.stats.tic_percentile_times.p75)),
        "TotalTIC": column(run, |w| json!(w.stats.total_ion_current)),
        "PkCount25ile": column(run, |w| json!(w.stats.peak_counts.q1)),
        "PkCount50ile": column(run, |w| json!(w.stats.peak_counts.median)),
        "PkCount75ile": column(run, |w| json!(w.stats.peak_counts.q3)),
        "PkCountMax": column(run, |w| json!(w.stats.peak_counts.max)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qc::{summarize_run, QcOptions};
    use crate::run::{FragmentScan, RunRecords};
    use chrono::TimeZone;

    fn runs(fragments: Vec<FragmentScan>) -> RunCollection {
        let mut records = RunRecords::new("sample_02", 100);
        records.identity.start_timestamp = "2024-03-01T10:00:00Z".to_string();
        records.identity.serial_number = "SN03090".to_string();
        records.fragment_scans = fragments;
        std::iter::once(summarize_run(records, &QcOptions::default())).collect()
    }

    fn fragment(target: f64, time: f64) -> FragmentScan {
        FragmentScan {
            isolation_target: target,
            isolation_lower_offset: 5.0,
            isolation_upper_offset: 5.0,
            acquisition_time: time,
            total_ion_current: 2.0,
            ..Default::default()
        }
    }

    fn document(runs: &RunCollection) -> Value {
        let created = Utc.with_ymd_and_hms(2025, 2, 12, 8, 30, 0).unwrap();
        let mut out = Vec::new();
        MzQcFile::from_runs(runs, created).write_to(&mut out).unwrap();
        serde_json::from_slice(&out).unwrap()
    }

    fn metric<'a>(run: &'a Value, accession: &str) -> Option<&'a Value> {
        run["qualityMetrics"]
            .as_array()
            .unwrap()
            .iter()
            .find(|m| m["accession"] == accession)
            .map(|m| &m["value"])
    }

    #[test]
    fn test_document_skeleton() {
        let doc = document(&runs(vec![fragment(500.0, 1.0)]));
        let body = &doc["mzQC"];

        assert_eq!(body["version"], MZQC_VERSION);
        assert_eq!(body["creationDate"], "2025-02-12T08:30:00+00:00");
        assert_eq!(body["controlledVocabularies"].as_array().unwrap().len(), 2);

        let run = &body["runQualities"][0];
        assert_eq!(run["metadata"]["label"], "sample_02");
        let input = &run["metadata"]["inputFiles"][0];
        assert_eq!(input["fileFormat"]["accession"], "MS:1000584");
        assert_eq!(input["fileProperties"][0]["value"], "2024-03-01T10:00:00Z");
        assert_eq!(input["fileProperties"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_run_metrics() {
        let doc = document(&runs(vec![
            fragment(500.0, 1.0),
            fragment(600.0, 1.5),
            fragment(500.0, 2.0),
        ]));
        let run = &doc["mzQC"]["runQualities"][0];

        assert_eq!(metric(run, "MS:4000060"), Some(&json!(3)));
        assert_eq!(metric(run, "DIAM:0000001"), Some(&json!(2)));
        assert_eq!(metric(run, "DIAM:0000003"), Some(&json!([495.0, 605.0])));
        assert_eq!(metric(run, "DIAM:0000005"), Some(&json!(60.0)));

        let table = metric(run, "DIAM:0000011").unwrap();
        assert_eq!(table["LoMZ"], json!([495.0, 595.0]));
        assert_eq!(table["MSMSCount"], json!([2, 1]));
        assert_eq!(table["CycleTimeMedian"], json!([60.0, null]));
    }

    #[test]
    fn test_run_without_windows() {
        let doc = document(&runs(Vec::new()));
        let run = &doc["mzQC"]["runQualities"][0];

        assert_eq!(metric(run, "DIAM:0000001"), Some(&json!(0)));
        assert_eq!(metric(run, "DIAM:0000004"), Some(&json!([null, null])));
        assert_eq!(metric(run, "DIAM:0000005"), Some(&Value::Null));
        assert!(metric(run, "DIAM:0000011").is_none());
        assert!(metric(run, "DIAM:0000009").is_none());
    }
}
