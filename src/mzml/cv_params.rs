//! Controlled Vocabulary (CV) parameter handling for mzML
//!
//! mzML uses CV terms from the PSI-MS ontology to describe data semantically.
//! The extractor only needs the accession, the name, the value and the unit of
//! each `cvParam`; everything else is discarded.

use std::str::FromStr;

use crate::controlled_vocabulary::MS_CV_ACCESSIONS;

use super::streamer::MzMLError;

/// A controlled vocabulary parameter from mzML
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CvParam {
    /// Accession number (e.g., "MS:1000511")
    pub accession: String,

    /// Human-readable name
    pub name: String,

    /// Optional value
    pub value: Option<String>,

    /// Unit accession
    pub unit_accession: Option<String>,
}

impl CvParam {
    /// Build a parameter carrying a value, mostly useful in tests
    pub fn with_value(accession: &str, name: &str, value: &str) -> Self {
        Self {
            accession: accession.to_string(),
            name: name.to_string(),
            value: Some(value.to_string()),
            unit_accession: None,
        }
    }

    /// Attach a unit accession
    pub fn with_unit(mut self, unit_accession: &str) -> Self {
        self.unit_accession = Some(unit_accession.to_string());
        self
    }

    /// Parse the value as a number.
    ///
    /// A missing or malformed value is an error: numeric fields are
    /// required to parse, and a failure aborts the run.
    pub fn parse_value<T: FromStr>(&self) -> Result<T, MzMLError> {
        let raw = self.value.as_deref().unwrap_or("");
        raw.trim()
            .parse()
            .map_err(|_| MzMLError::InvalidNumber {
                field: format!("{} ({})", self.name, self.accession),
                value: raw.to_string(),
            })
    }

    /// Value as a string slice, empty when absent
    pub fn value_str(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }
}

/// Convert a retention time to minutes based on its unit.
///
/// mzML written by ProteoWizard reports scan start time in minutes; values
/// without a unit are taken as minutes.
pub fn normalize_retention_time(value: f64, unit_accession: Option<&str>) -> f64 {
    match unit_accession {
        Some(MS_CV_ACCESSIONS::UNIT_SECOND) => value / 60.0,
        Some(MS_CV_ACCESSIONS::UNIT_MILLISECOND) => value / 60_000.0,
        _ => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value() {
        let param = CvParam::with_value(MS_CV_ACCESSIONS::MS_LEVEL, "ms level", "2");
        assert_eq!(param.parse_value::<u8>().unwrap(), 2);
        assert_eq!(param.parse_value::<f64>().unwrap(), 2.0);
    }

    #[test]
    fn test_parse_value_rejects_garbage() {
        let param = CvParam::with_value(MS_CV_ACCESSIONS::TOTAL_ION_CURRENT, "total ion current", "1,5e6");
        match param.parse_value::<f64>() {
            Err(MzMLError::InvalidNumber { value, .. }) => assert_eq!(value, "1,5e6"),
            other => panic!("expected InvalidNumber, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_value_missing() {
        let param = CvParam {
            accession: MS_CV_ACCESSIONS::SCAN_START_TIME.to_string(),
            name: "scan start time".to_string(),
            ..Default::default()
        };
        assert!(param.parse_value::<f64>().is_err());
    }

    #[test]
    fn test_normalize_retention_time() {
        assert_eq!(normalize_retention_time(2.5, Some(MS_CV_ACCESSIONS::UNIT_MINUTE)), 2.5);
        assert_eq!(normalize_retention_time(90.0, Some(MS_CV_ACCESSIONS::UNIT_SECOND)), 1.5);
        assert_eq!(normalize_retention_time(60_000.0, Some(MS_CV_ACCESSIONS::UNIT_MILLISECOND)), 1.0);
        assert_eq!(normalize_retention_time(3.0, None), 3.0);
    }
}
