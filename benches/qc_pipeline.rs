use std::io::Cursor;
use std::sync::Arc;

use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput,
};
use diametric::mzml::MzMLStreamer;
use diametric::qc::{summarize_run, QcOptions};

fn generate_dia_mzml(cycles: usize, windows: usize) -> Vec<u8> {
    let mut mzml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<mzML xmlns="http://psi.hupo.org/ms/mzml" version="1.1.0">
  <run id="bench_run" startTimeStamp="2024-01-01T00:00:00Z">
    <spectrumList count="0">"#,
    );

    let mut index = 0;
    for cycle in 0..cycles {
        for window in 0..=windows {
            let ms_level = if window == 0 { 1 } else { 2 };
            let rt = cycle as f64 * 3.0 + window as f64 * 0.05;
            let target = 400.0 + 25.0 * window as f64;
            mzml.push_str(&format!(
                r#"
      <spectrum index="{index}" id="scan={scan}" defaultArrayLength="{peaks}">
        <cvParam cvRef="MS" accession="MS:1000511" name="ms level" value="{ms_level}"/>
        <cvParam cvRef="MS" accession="MS:1000285" name="total ion current" value="{tic}"/>
        <scanList count="1">
          <scan>
            <cvParam cvRef="MS" accession="MS:1000016" name="scan start time" value="{rt}" unitCvRef="UO" unitAccession="UO:0000010" unitName="second"/>
          </scan>
        </scanList>
        <precursorList count="1">
          <precursor>
            <isolationWindow>
              <cvParam cvRef="MS" accession="MS:1000827" name="isolation window target m/z" value="{target}"/>
              <cvParam cvRef="MS" accession="MS:1000828" name="isolation window lower offset" value="12.5"/>
              <cvParam cvRef="MS" accession="MS:1000829" name="isolation window upper offset" value="12.5"/>
            </isolationWindow>
          </precursor>
        </precursorList>
        <binaryDataArrayList count="2">
          <binaryDataArray encodedLength="16">
            <binary>AAAAAAAAAAAAAAAAAAAAAA==</binary>
          </binaryDataArray>
        </binaryDataArrayList>
      </spectrum>"#,
                scan = index + 1,
                peaks = 100 + (index % 400),
                tic = 1.0e5 + (index % 97) as f64 * 1.0e3,
            ));
            index += 1;
        }
    }

    mzml.push_str(
        r#"
    </spectrumList>
  </run>
</mzML>"#,
    );

    mzml.into_bytes()
}

fn bench_read_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("mzml_read_run");

    for cycles in [100, 500, 1000] {
        let windows = 24;
        let mzml_bytes = Arc::new(generate_dia_mzml(cycles, windows));

        group.throughput(Throughput::Bytes(mzml_bytes.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(cycles), &mzml_bytes, |b, bytes| {
            b.iter_batched(
                || MzMLStreamer::new(Cursor::new(bytes.as_ref().clone()), "bench"),
                |streamer| black_box(streamer.read_run().unwrap().ms2_count()),
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn bench_summarize_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("summarize_run");

    for cycles in [100, 500, 1000] {
        let windows = 24;
        let records = MzMLStreamer::new(Cursor::new(generate_dia_mzml(cycles, windows)), "bench")
            .read_run()
            .unwrap();

        group.throughput(Throughput::Elements((cycles * (windows + 1)) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(cycles), &records, |b, records| {
            b.iter_batched(
                || records.clone(),
                |records| black_box(summarize_run(records, &QcOptions::default()).window_count()),
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_read_run, bench_summarize_run);
criterion_main!(benches);
