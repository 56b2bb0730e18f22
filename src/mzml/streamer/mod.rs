//! Streaming mzML reader using quick-xml
//!
//! A single forward pass over the document feeds `<run>`, `<spectrum>` and
//! `cvParam` events into a [`FieldExtractor`]. Binary data arrays are never
//! decoded; only the declared peak count is kept.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::mzml::extractor::FieldExtractor;
use crate::run::{RunRecords, DEFAULT_PEAK_COUNT_CEILING};

pub use error::MzMLError;

use helpers::{get_attribute, parse_cv_param, require_attribute};

mod error;
mod helpers;


/// Default size of the input buffer when opening files (64KB)
pub const DEFAULT_INPUT_BUFFER_SIZE: usize = 64 * 1024;

/// Streaming reader for one mzML run
pub struct MzMLStreamer<R: BufRead> {
    reader: Reader<R>,
    source_file: String,
    peak_count_ceiling: usize,
}

impl MzMLStreamer<BufReader<File>> {
    /// Open an mzML file for streaming with default buffer size (64KB)
    ///
    /// The run is named after the file stem.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, MzMLError> {
        Self::open_with_buffer_size(path, DEFAULT_INPUT_BUFFER_SIZE)
    }

    /// Open an mzML file for streaming with custom buffer size
    ///
    /// # Arguments
    /// * `path` - Path to the mzML file
    /// * `buffer_size` - Size of the input buffer in bytes
    pub fn open_with_buffer_size<P: AsRef<Path>>(
        path: P,
        buffer_size: usize,
    ) -> Result<Self, MzMLError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let reader = BufReader::with_capacity(buffer_size, file);
        Ok(Self::new(reader, source_name(path)))
    }
}

impl<R: BufRead> MzMLStreamer<R> {
    /// Create a new streamer from a BufRead source
    pub fn new(reader: R, source_file: impl Into<String>) -> Self {
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.config_mut().trim_text(true);

        Self {
            reader: xml_reader,
            source_file: source_file.into(),
            peak_count_ceiling: DEFAULT_PEAK_COUNT_CEILING,
        }
    }

    /// Set the top bucket of the MS2 peak-count histogram
    pub fn with_peak_count_ceiling(mut self, ceiling: usize) -> Self {
        self.peak_count_ceiling = ceiling;
        self
    }

    /// Name of the run being read
    pub fn source_file(&self) -> &str {
        &self.source_file
    }

    /// Read the whole document and return the run's records.
    ///
    /// Any malformed numeric field aborts the run; no partial records are
    /// returned.
    pub fn read_run(mut self) -> Result<RunRecords, MzMLError> {
        let mut extractor = FieldExtractor::new(self.source_file.clone(), self.peak_count_ceiling);
        let mut saw_run = false;
        let mut buf = Vec::new();

        loop {
            match self.reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                    if dispatch_element(e, &mut extractor)? == Element::Run {
                        saw_run = true;
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(MzMLError::XmlError(e)),
                _ => {}
            }
            buf.clear();
        }

        if !saw_run {
            return Err(MzMLError::InvalidStructure(
                "No <run> element found in the mzML file".to_string(),
            ));
        }

        let records = extractor.finish();
        debug!(
            "{}: {} MS1 and {} MS2 spectra",
            records.identity.source_file,
            records.ms1_count(),
            records.ms2_count()
        );
        Ok(records)
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Element {
    Run,
    Other,
}

fn dispatch_element(e: &BytesStart, extractor: &mut FieldExtractor) -> Result<Element, MzMLError> {
    match e.name().as_ref() {
        b"cvParam" => {
            let cv_param = parse_cv_param(e)?;
            extractor.apply_cv_param(&cv_param)?;
        }
        b"spectrum" => {
            let native_id = require_attribute(e, "id")?;
            let length = require_attribute(e, "defaultArrayLength")?;
            let peak_count = length.trim().parse().map_err(|_| MzMLError::InvalidNumber {
                field: format!("defaultArrayLength of spectrum {:?}", native_id),
                value: length.clone(),
            })?;
            extractor.start_spectrum(native_id, peak_count);
        }
        b"run" => {
            extractor.start_run(get_attribute(e, "startTimeStamp")?);
            return Ok(Element::Run);
        }
        b"chromatogramList" => extractor.end_spectra(),
        _ => {}
    }
    Ok(Element::Other)
}

/// Run name for a path: the file name without its extension
pub fn source_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
