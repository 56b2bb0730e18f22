use anyhow::{bail, Context, Result};
use log::info;
use std::path::PathBuf;
use std::time::Instant;

use diametric::pipeline::{discover_inputs, process_files};
use diametric::qc::TimeOrderPolicy;
use diametric::report::write_reports;

use super::config::Config;

/// Compute metrics for every input run and write the reports
pub fn run(
    inputs: Vec<PathBuf>,
    output_dir: Option<PathBuf>,
    config_path: Option<PathBuf>,
    trust_order: bool,
) -> Result<()> {
    let config = match config_path {
        Some(path) => Config::from_file(&path)?,
        None => Config::default(),
    };

    let mut options = config.qc.to_options()?;
    if trust_order {
        options = options.with_time_order(TimeOrderPolicy::Trust);
    }
    let mut report = config.report;
    if let Some(dir) = output_dir {
        report.output_dir = dir;
    }

    let inputs = if inputs.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        inputs
    };
    let files = discover_inputs(&inputs)?;
    if files.is_empty() {
        bail!("No mzML files found");
    }

    info!("Importing from {} mzML files", files.len());
    let started = Instant::now();
    let runs = process_files(&files, &options)?;
    info!("Time for mzML reading and metrics: {:.2?}", started.elapsed());

    let started = Instant::now();
    write_reports(&runs, &report).with_context(|| {
        format!(
            "Failed to write reports to {}",
            report.output_dir.display()
        )
    })?;
    info!("Time for reporting: {:.2?}", started.elapsed());

    println!(
        "Wrote metrics for {} runs to {}",
        runs.len(),
        report.output_dir.display()
    );
    Ok(())
}
