//! Scan numbers from vendor native identifiers.
//!
//! Vendors disagree on how a spectrum is identified. Examples as written by
//! common converters:
//!
//! ```text
//! controllerType=0 controllerNumber=1 scan=12                  (Thermo)
//! sample=1 period=1 cycle=806 experiment=2                     (SCIEX)
//! scan=55                                                      (Bruker, TIMSConvert)
//! merged=102 frame=13 scanStart=810 scanEnd=834                (Bruker, ProteoWizard)
//! ```

use std::num::ParseIntError;

/// Keys whose value is taken as the scan number
pub const SCAN_NUMBER_KEYS: [&str; 3] = ["cycle", "scan", "scanStart"];

/// Extract the scan number from a space-separated `key=value` native ID.
///
/// The first token whose key is one of [`SCAN_NUMBER_KEYS`] wins. Returns
/// `Ok(None)` when no such key is present.
pub fn parse_scan_number(native_id: &str) -> Result<Option<u32>, ParseIntError> {
    for token in native_id.split_whitespace() {
        if let Some((key, value)) = token.split_once('=') {
            if SCAN_NUMBER_KEYS.contains(&key) {
                return value.parse().map(Some);
            }
        }
    }
    Ok(None)
}
