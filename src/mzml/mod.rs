//! # mzML Field Extraction
//!
//! Single-pass, pull-based extraction of the fields the quality metrics need
//! from mzML, the XML-based community standard for mass spectrometry data
//! defined by HUPO-PSI.
//!
//! This is not a general mzML reader. Peak arrays are skipped entirely; only
//! the declared peak count of each spectrum is kept.
//!
//! ## What is read
//!
//! ```text
//! mzML
//! ├── referenceableParamGroupList / instrumentConfigurationList
//! │   └── cvParam       instrument model, serial number
//! └── run               startTimeStamp
//!     ├── spectrumList
//!     │   └── spectrum  id, defaultArrayLength
//!     │       ├── cvParam   ms level, total ion current
//!     │       ├── scanList
//!     │       │   └── scan
//!     │       │       └── cvParam   scan start time, resolving power,
//!     │       │                     FAIMS CV / inverse ion mobility
//!     │       └── precursorList
//!     │           └── isolationWindow
//!     │               └── cvParam   target m/z, lower/upper offset
//!     └── chromatogramList      (ignored)
//! ```

mod cv_params;
mod extractor;
pub mod streamer;

pub use cv_params::{normalize_retention_time, CvParam};
pub use extractor::{ActiveScan, FieldExtractor};
pub use streamer::{source_name, MzMLError, MzMLStreamer, DEFAULT_INPUT_BUFFER_SIZE};
