//! # DIAMetric
//!
//! Command-line front end computing DIA quality metrics from mzML files.
//!
//! ## Usage
//!
//! ```bash
//! # All mzML files in the current directory, reports written here
//! diametric run
//!
//! # Selected files and directories, reports into qc/
//! diametric -v run run01.mzML batch2/ -o qc
//!
//! # Print one run's metrics
//! diametric inspect run01.mzML
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
