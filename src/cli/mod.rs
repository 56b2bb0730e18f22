use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod config;
mod inspect;
mod run;

/// DIAMetric - Quality metrics for Data-Independent Acquisition experiments
#[derive(Parser)]
#[command(name = "diametric")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute metrics for mzML files and write the TSV and mzQC reports
    Run {
        /// mzML files or directories containing them (defaults to the current directory)
        #[arg(value_name = "INPUT")]
        inputs: Vec<PathBuf>,

        /// Directory receiving the reports
        #[arg(short = 'o', long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Assume scans are already in acquisition-time order
        #[arg(long)]
        trust_order: bool,
    },

    /// Print the metrics of a single mzML file
    Inspect {
        /// Input mzML file path
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Run {
            inputs,
            output_dir,
            config,
            trust_order,
        } => run::run(inputs, output_dir, config, trust_order),
        Commands::Inspect { file } => inspect::run(file),
    }
}
