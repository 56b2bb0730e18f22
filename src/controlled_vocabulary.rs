//! # HUPO-PSI Mass Spectrometry Controlled Vocabulary
//!
//! Accessions the mzML field extractor dispatches on, plus the terms used to
//! label quality metrics in the mzQC report.
//!
//! ## Reference
//! - OBO file: https://raw.githubusercontent.com/HUPO-PSI/psi-ms-CV/master/psi-ms.obo
//! - Documentation: https://github.com/HUPO-PSI/psi-ms-CV

use serde::{Deserialize, Serialize};
use std::fmt;

/// A controlled vocabulary term with its accession and name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CvTerm {
    /// CV accession (e.g., "MS:4000059")
    pub accession: String,
    /// Human-readable name
    pub name: String,
}

impl CvTerm {
    /// Create a new CV term with accession and name
    pub fn new(accession: &str, name: &str) -> Self {
        Self {
            accession: accession.to_string(),
            name: name.to_string(),
        }
    }
}

impl fmt::Display for CvTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}: {}]", self.accession, self.name)
    }
}

/// PSI-MS accessions read from mzML `cvParam` elements
#[allow(non_snake_case)]
pub mod MS_CV_ACCESSIONS {
    // =========================================================================
    // Spectrum / scan properties
    // =========================================================================

    /// MS level
    pub const MS_LEVEL: &str = "MS:1000511";

    /// Scan start time (retention time)
    pub const SCAN_START_TIME: &str = "MS:1000016";

    /// Total ion current
    pub const TOTAL_ION_CURRENT: &str = "MS:1000285";

    /// Mass resolving power
    pub const MASS_RESOLVING_POWER: &str = "MS:1000800";

    /// FAIMS compensation voltage
    pub const FAIMS_COMPENSATION_VOLTAGE: &str = "MS:1001581";

    /// Inverse reduced ion mobility (1/K0)
    pub const INVERSE_REDUCED_ION_MOBILITY: &str = "MS:1002815";

    // =========================================================================
    // Isolation window
    // =========================================================================

    /// Isolation window target m/z
    pub const ISOLATION_WINDOW_TARGET_MZ: &str = "MS:1000827";

    /// Isolation window lower offset
    pub const ISOLATION_WINDOW_LOWER_OFFSET: &str = "MS:1000828";

    /// Isolation window upper offset
    pub const ISOLATION_WINDOW_UPPER_OFFSET: &str = "MS:1000829";

    // =========================================================================
    // Instrument
    // =========================================================================

    /// Instrument model (parent of the model terms)
    pub const INSTRUMENT_MODEL: &str = "MS:1000031";

    /// Instrument serial number
    pub const INSTRUMENT_SERIAL_NUMBER: &str = "MS:1000529";

    /// Custom unreleased software tool
    pub const CUSTOM_SOFTWARE: &str = "MS:1000799";

    /// mzML format
    pub const MZML_FORMAT: &str = "MS:1000584";

    /// Completion time of a run
    pub const COMPLETION_TIME: &str = "MS:1000747";

    // =========================================================================
    // Time units
    // =========================================================================

    /// Second (UO)
    pub const UNIT_SECOND: &str = "UO:0000010";

    /// Minute (UO)
    pub const UNIT_MINUTE: &str = "UO:0000031";

    /// Millisecond (UO)
    pub const UNIT_MILLISECOND: &str = "UO:0000028";
}

/// Instrument model terms recognised as naming the instrument of a run.
///
/// The `name` attribute of a matching `cvParam` becomes the run's instrument.
/// Instruments missing from this list simply leave the field blank.
pub const INSTRUMENT_MODEL_ACCESSIONS: &[&str] = &[
    "MS:1000557",
    "MS:1000932",
    "MS:1001742",
    "MS:1001910",
    "MS:1001911",
    "MS:1002416",
    "MS:1002523",
    "MS:1002533",
    "MS:1002634",
    "MS:1002732",
    "MS:1002877",
    "MS:1003005",
    "MS:1003028",
    "MS:1003029",
    "MS:1003094",
    "MS:1003123",
    "MS:1003293",
];

/// Whether an accession names an instrument model
pub fn is_instrument_model(accession: &str) -> bool {
    INSTRUMENT_MODEL_ACCESSIONS.contains(&accession)
}

/// Terms labelling the metrics written to mzQC documents.
///
/// Run counts come from the PSI-MS QC branch; the isolation-window metrics
/// have no PSI-MS term yet and use the local `DIAM` vocabulary declared in
/// every document this crate writes.
pub mod qc_terms {
    use super::CvTerm;

    /// Prefix of the local metric vocabulary
    pub const LOCAL_CV_PREFIX: &str = "DIAM";

    fn local(id: u32, name: &str) -> CvTerm {
        CvTerm::new(&format!("{}:{:07}", LOCAL_CV_PREFIX, id), name)
    }

    /// MS:4000059 - number of MS1 spectra
    pub fn ms1_count() -> CvTerm {
        CvTerm::new("MS:4000059", "number of MS1 spectra")
    }

    /// MS:4000060 - number of MS2 spectra
    pub fn ms2_count() -> CvTerm {
        CvTerm::new("MS:4000060", "number of MS2 spectra")
    }

    /// MS:4000053 - chromatography duration
    pub fn rt_duration() -> CvTerm {
        CvTerm::new("MS:4000053", "chromatography duration")
    }

    /// Number of distinct isolation windows
    pub fn isolation_window_count() -> CvTerm {
        local(1, "number of isolation windows")
    }

    /// Fewest / most scans acquired in any isolation window
    pub fn cycle_count_range() -> CvTerm {
        local(2, "isolation window cycle count range")
    }

    /// Lowest low m/z and highest high m/z across windows
    pub fn mz_range() -> CvTerm {
        local(3, "isolation window m/z coverage")
    }

    /// Narrowest / widest isolation window width
    pub fn window_width_range() -> CvTerm {
        local(4, "isolation window width range")
    }

    /// Mean over windows of the median cycle time
    pub fn average_median_cycle_time() -> CvTerm {
        local(5, "average of isolation window median cycle times")
    }

    /// Earliest / latest TIC-median retention time across windows
    pub fn tic_median_rt_range() -> CvTerm {
        local(6, "isolation window TIC median retention time range")
    }

    /// Smallest / largest window total ion current
    pub fn total_tic_range() -> CvTerm {
        local(7, "isolation window total ion current range")
    }

    /// Smallest / largest window median peak count
    pub fn peak_count_median_range() -> CvTerm {
        local(8, "isolation window peak count median range")
    }

    /// Survey-scan summary statistics
    pub fn ms1_summary() -> CvTerm {
        local(9, "MS1 scan summary")
    }

    /// MS2 peak count quartiles from the peak-count histogram
    pub fn ms2_peak_count_quartiles() -> CvTerm {
        local(10, "MS2 peak count quartiles")
    }

    /// Per-window table
    pub fn isolation_window_table() -> CvTerm {
        local(11, "isolation window metrics table")
    }
}
