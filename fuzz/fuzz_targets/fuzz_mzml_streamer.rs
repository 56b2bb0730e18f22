#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

use diametric::mzml::MzMLStreamer;
use diametric::qc::{summarize_run, QcOptions};

fuzz_target!(|data: &[u8]| {
    // Malformed input must surface as an error, never a panic
    let streamer = MzMLStreamer::new(Cursor::new(data), "fuzz").with_peak_count_ceiling(1_000);
    if let Ok(mut records) = streamer.read_run() {
        records.normalize_scan_numbers();
        let _ = summarize_run(records, &QcOptions::default().with_peak_count_ceiling(1_000));
    }
});
