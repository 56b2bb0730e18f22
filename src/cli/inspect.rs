use anyhow::Result;
use std::fmt::Write as _;
use std::path::PathBuf;

use diametric::pipeline::process_file;
use diametric::qc::{QcOptions, RunSummary};

#[cfg(feature = "colorized_output")]
use console::style;

fn opt<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

fn range<T: std::fmt::Display>(min: Option<T>, max: Option<T>) -> String {
    format!("{} .. {}", opt(min), opt(max))
}

fn heading(text: &str) -> String {
    #[cfg(feature = "colorized_output")]
    {
        style(text).bold().cyan().to_string()
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        text.to_string()
    }
}

fn label(text: &str) -> String {
    #[cfg(feature = "colorized_output")]
    {
        style(text).bold().to_string()
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        text.to_string()
    }
}

fn format_run(run: &RunSummary) -> String {
    let identity = &run.identity;
    let extrema = &run.extrema;
    let mut out = String::new();

    let _ = writeln!(out, "{}", heading(&format!("Run {}", identity.source_file)));
    let _ = writeln!(out, "{}: {}", label("Instrument"), identity.instrument);
    let _ = writeln!(out, "{}: {}", label("Serial number"), identity.serial_number);
    let _ = writeln!(out, "{}: {}", label("Started"), identity.start_timestamp);
    let _ = writeln!(out, "{}: {:.3} min", label("RT duration"), run.rt_duration);
    let _ = writeln!(
        out,
        "{}: {} MS1, {} MS2, {} isolation windows",
        label("Spectra"),
        run.ms1_count,
        run.ms2_count,
        run.window_count()
    );

    if let Some(survey) = &run.survey {
        let _ = writeln!(
            out,
            "{}: TIC {:.4e}, TIC median at {:.3} min, median cycle {} s, median peaks {}",
            label("MS1"),
            survey.total_ion_current,
            survey.tic_percentile_times.p50,
            opt(survey.cycle_time_median.map(|t| format!("{:.3}", t))),
            survey.peak_counts.median
        );
    }
    if let Some(quartiles) = &run.ms2_peak_count_quartiles {
        let _ = writeln!(
            out,
            "{}: {} / {} / {} / {} / {}",
            label("MS2 peak counts"),
            quartiles.min,
            quartiles.q1,
            quartiles.median,
            quartiles.q3,
            quartiles.max
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", heading("Across isolation windows"));
    let _ = writeln!(out, "  m/z coverage:        {}", range(extrema.low_mz.min, extrema.high_mz.max));
    let _ = writeln!(out, "  width:               {}", range(extrema.width_mz.min, extrema.width_mz.max));
    let _ = writeln!(out, "  scans per window:    {}", range(extrema.scan_count.min, extrema.scan_count.max));
    let _ = writeln!(out, "  TIC median RT:       {}", range(extrema.tic_median_rt.min, extrema.tic_median_rt.max));
    let _ = writeln!(
        out,
        "  total TIC:           {}",
        range(extrema.total_ion_current.min, extrema.total_ion_current.max)
    );
    let _ = writeln!(
        out,
        "  peak count median:   {}",
        range(extrema.peak_count_median.min, extrema.peak_count_median.max)
    );
    let _ = writeln!(
        out,
        "  avg median cycle:    {} s",
        opt(extrema.average_median_cycle_time().map(|t| format!("{:.3}", t)))
    );

    if !run.windows.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{}",
            heading(&format!(
                "{:>10} {:>10} {:>8} {:>8} {:>6} {:>9} {:>9} {:>8}",
                "LoMZ", "HiMZ", "Width", "Mobility", "Scans", "Cycle(s)", "TIC50RT", "PkMed"
            ))
        );
        for window in &run.windows {
            let stats = &window.stats;
            let _ = writeln!(
                out,
                "{:>10.3} {:>10.3} {:>8.3} {:>8.3} {:>6} {:>9} {:>9.3} {:>8}",
                window.low_mz,
                window.high_mz,
                window.width_mz,
                window.mobility,
                stats.scan_count,
                opt(stats.cycle_time_median.map(|t| format!("{:.3}", t))),
                stats.tic_percentile_times.p50,
                stats.peak_counts.median
            );
        }
    }

    out
}

/// Print the metrics of one mzML file
pub fn run(file: PathBuf) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }

    let summary = process_file(&file, &QcOptions::default())?;
    print!("{}", format_run(&summary));
    Ok(())
}
