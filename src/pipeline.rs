//! Per-file and multi-file processing.
//!
//! Each input file is streamed once into its scan records, scan numbers are
//! normalized, and the run is summarized. Runs never share state, so with the
//! `parallel` feature they are processed on the rayon pool; the resulting
//! collection keeps input order either way.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use log::{debug, info};
use thiserror::Error;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::mzml::{MzMLError, MzMLStreamer};
use crate::qc::{summarize_run, QcOptions, QcOptionsError, RunCollection, RunSummary};

/// Errors raised while processing input files
#[derive(Error, Debug)]
pub enum PipelineError {
    /// An mzML file could not be read; the run is aborted
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// Offending file
        path: PathBuf,
        /// Underlying parse error
        #[source]
        source: MzMLError,
    },

    /// An input path could not be listed
    #[error("failed to list {}: {source}", path.display())]
    Discover {
        /// Offending path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The options are out of range; nothing was read
    #[error("invalid options: {0}")]
    Options(#[from] QcOptionsError),
}

/// Read and summarize one mzML file
pub fn process_file(path: &Path, options: &QcOptions) -> Result<RunSummary, PipelineError> {
    let started = Instant::now();
    let to_error = |source| PipelineError::Read {
        path: path.to_path_buf(),
        source,
    };

    let mut records = MzMLStreamer::open(path)
        .map_err(to_error)?
        .with_peak_count_ceiling(options.peak_count_ceiling)
        .read_run()
        .map_err(to_error)?;
    let read_elapsed = started.elapsed();
    records.normalize_scan_numbers();

    let summarizing = Instant::now();
    let run = summarize_run(records, options);
    info!(
        "{}: {} MS1, {} MS2, {} isolation windows (read {:.2?}, windows {:.2?})",
        run.identity.source_file,
        run.ms1_count,
        run.ms2_count,
        run.window_count(),
        read_elapsed,
        summarizing.elapsed()
    );

    Ok(run)
}

/// Read and summarize several mzML files into one collection, in input order.
///
/// Options are validated first. The first failing file aborts the whole batch.
pub fn process_files<P: AsRef<Path> + Sync>(
    paths: &[P],
    options: &QcOptions,
) -> Result<RunCollection, PipelineError> {
    options.validate()?;
    let started = Instant::now();

    #[cfg(feature = "parallel")]
    let runs: Result<RunCollection, PipelineError> = paths
        .par_iter()
        .map(|path| process_file(path.as_ref(), options))
        .collect::<Result<Vec<_>, _>>()
        .map(RunCollection::from_iter);

    #[cfg(not(feature = "parallel"))]
    let runs: Result<RunCollection, PipelineError> = paths
        .iter()
        .map(|path| process_file(path.as_ref(), options))
        .collect();

    let runs = runs?;
    info!("Processed {} runs in {:.2?}", runs.len(), started.elapsed());
    Ok(runs)
}

/// Whether a path names an mzML file (extension compared case-insensitively)
pub fn is_mzml_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("mzml"))
}

/// Expand inputs into the list of mzML files to process.
///
/// Files are taken as given. Directories contribute their `*.mzML` entries
/// (not recursively) in file-name order.
pub fn discover_inputs<P: AsRef<Path>>(inputs: &[P]) -> Result<Vec<PathBuf>, PipelineError> {
    let mut files = Vec::new();

    for input in inputs {
        let input = input.as_ref();
        if !input.is_dir() {
            files.push(input.to_path_buf());
            continue;
        }

        let to_error = |source| PipelineError::Discover {
            path: input.to_path_buf(),
            source,
        };
        let mut found = Vec::new();
        for entry in fs::read_dir(input).map_err(to_error)? {
            let path = entry.map_err(to_error)?.path();
            if path.is_file() && is_mzml_path(&path) {
                found.push(path);
            }
        }
        found.sort();
        debug!("{}: {} mzML files", input.display(), found.len());
        files.extend(found);
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_is_mzml_path() {
        assert!(is_mzml_path(Path::new("a/run.mzML")));
        assert!(is_mzml_path(Path::new("run.MZML")));
        assert!(!is_mzml_path(Path::new("run.mzXML")));
        assert!(!is_mzml_path(Path::new("mzML")));
    }

    #[test]
    fn test_discover_inputs_sorted() {
        let dir = tempdir().unwrap();
        for name in ["b.mzML", "a.mzml", "notes.txt"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        fs::create_dir(dir.path().join("nested.mzML")).unwrap();

        let files = discover_inputs(&[dir.path()]).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.mzml", "b.mzML"]);
    }

    #[test]
    fn test_discover_keeps_explicit_files() {
        let files = discover_inputs(&["x.mzML", "y.raw"]).unwrap();
        assert_eq!(files, vec![PathBuf::from("x.mzML"), PathBuf::from("y.raw")]);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = process_file(Path::new("does/not/exist.mzML"), &QcOptions::default())
            .unwrap_err();
        assert!(matches!(err, PipelineError::Read { .. }));
        assert!(err.to_string().contains("exist.mzML"));
    }

    #[test]
    fn test_invalid_options_rejected_before_reading() {
        let options = QcOptions::default().with_peak_count_ceiling(usize::MAX);
        let err = process_files(&["does/not/exist.mzML"], &options).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Options(QcOptionsError::PeakCountCeilingTooLarge { .. })
        ));
    }
}
