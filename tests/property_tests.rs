//! Property-based tests for partitioning and order statistics

use diametric::qc::stats::PeakCountQuartiles;
use diametric::qc::{
    partition_isolation_windows, summarize_run, QcOptions, ScanGroupStats, TimeOrderPolicy,
};
use diametric::run::{FragmentScan, PeakCountHistogram, RunRecords};
use proptest::prelude::*;

/// (target, mobility, time step, tic, peaks) per scan
fn fragment_specs() -> impl Strategy<Value = Vec<(f64, f64, f64, f64, u32)>> {
    prop::collection::vec(
        (
            prop::sample::select(vec![400.0, 425.0, 450.0, 475.0]),
            prop::sample::select(vec![0.0, -45.0, -65.0]),
            0.0..0.5f64,
            0.0..1.0e6f64,
            0..2000u32,
        ),
        0..200,
    )
}

/// Build time-ordered fragment scans; the native ID records input position
fn fragments(specs: &[(f64, f64, f64, f64, u32)]) -> Vec<FragmentScan> {
    let mut time = 0.0;
    specs
        .iter()
        .enumerate()
        .map(|(i, &(target, mobility, step, tic, peaks))| {
            time += step;
            FragmentScan {
                native_id: i.to_string(),
                isolation_target: target,
                isolation_lower_offset: 12.5,
                isolation_upper_offset: 12.5,
                mobility,
                acquisition_time: time,
                total_ion_current: tic,
                peak_count: peaks,
                ..Default::default()
            }
        })
        .collect()
}

fn position(scan: &FragmentScan) -> usize {
    scan.native_id.parse().unwrap()
}

proptest! {
    /// Every scan lands in exactly one group with its own key
    #[test]
    fn test_partition_is_complete(specs in fragment_specs()) {
        let scans = fragments(&specs);
        let groups = partition_isolation_windows(scans.clone());

        let total: usize = groups.iter().map(|g| g.len()).sum();
        prop_assert_eq!(total, scans.len());

        let mut seen = vec![false; scans.len()];
        for group in &groups {
            prop_assert!(!group.is_empty());
            for scan in group.scans() {
                prop_assert_eq!(scan.isolation_target, group.target_mz());
                prop_assert_eq!(scan.mobility, group.mobility());
                let i = position(scan);
                prop_assert!(!seen[i]);
                seen[i] = true;
            }
        }
        prop_assert!(seen.iter().all(|&s| s));
    }

    /// Groups follow first appearance; members keep input order
    #[test]
    fn test_partition_preserves_order(specs in fragment_specs()) {
        let groups = partition_isolation_windows(fragments(&specs));

        let firsts: Vec<usize> = groups.iter().map(|g| position(&g.scans()[0])).collect();
        prop_assert!(firsts.windows(2).all(|w| w[0] < w[1]));

        for group in &groups {
            let members: Vec<usize> = group.scans().iter().map(position).collect();
            prop_assert!(members.windows(2).all(|w| w[0] < w[1]));
        }
    }

    /// TIC percentile times are ordered and lie within the group's time span
    #[test]
    fn test_tic_percentiles_monotone(specs in fragment_specs()) {
        let scans = fragments(&specs);
        match ScanGroupStats::compute(&scans, TimeOrderPolicy::Sort) {
            None => prop_assert!(scans.is_empty()),
            Some(stats) => {
                let p = stats.tic_percentile_times;
                prop_assert!(p.p25 <= p.p50);
                prop_assert!(p.p50 <= p.p75);
                prop_assert!(stats.first_time <= p.p25);
                prop_assert!(p.p75 <= stats.last_time);
                prop_assert!(!stats.reordered);
                if scans.len() == 1 {
                    prop_assert!(stats.cycle_time_median.is_none());
                } else {
                    prop_assert!(stats.cycle_time_median.unwrap() >= 0.0);
                }
            }
        }
    }

    /// Window totals add up to the run's MS2 totals
    #[test]
    fn test_window_sums_are_conserved(specs in fragment_specs()) {
        let scans = fragments(&specs);
        let expected_tic: f64 = scans.iter().map(|s| s.total_ion_current).sum();

        let mut records = RunRecords::new("prop", 10_000);
        records.fragment_scans = scans;
        let run = summarize_run(records, &QcOptions::default());

        let scan_total: usize = run.windows.iter().map(|w| w.stats.scan_count).sum();
        prop_assert_eq!(scan_total, run.ms2_count);

        let tic_total: f64 = run.windows.iter().map(|w| w.stats.total_ion_current).sum();
        prop_assert!((tic_total - expected_tic).abs() <= 1e-6 * expected_tic.max(1.0));

        if let (Some(min), Some(max)) = (run.extrema.scan_count.min, run.extrema.scan_count.max) {
            prop_assert!(min <= max);
            prop_assert!(run.windows.iter().all(|w| (min..=max).contains(&w.stats.scan_count)));
        } else {
            prop_assert_eq!(run.window_count(), 0);
        }
    }

    /// Quartiles are ordered, and the histogram agrees with sorting below the ceiling
    #[test]
    fn test_peak_count_quartiles(counts in prop::collection::vec(0..5000u32, 1..300)) {
        let quartiles = PeakCountQuartiles::from_counts(&counts).unwrap();
        prop_assert!(quartiles.min <= quartiles.q1);
        prop_assert!(quartiles.q1 <= quartiles.median);
        prop_assert!(quartiles.median <= quartiles.q3);
        prop_assert!(quartiles.q3 <= quartiles.max);

        let mut histogram = PeakCountHistogram::new(10_000);
        for &count in &counts {
            histogram.record(count);
        }
        prop_assert_eq!(histogram.quartiles(), Some(quartiles));
    }
}
