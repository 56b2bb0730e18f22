//! Isolation-window partitioning.
//!
//! Fragmentation scans are grouped by exact (isolation target, mobility)
//! pair. Groups come out in order of first appearance and each keeps the
//! relative order of its scans. Records are moved into their group, never
//! copied.

use std::collections::HashMap;

use crate::run::FragmentScan;

/// Exact-equality key over (isolation target, mobility).
///
/// `-0.0` and `0.0` map to the same key; NaN matches NaN with the same bit
/// pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IsolationWindowKey {
    target_bits: u64,
    mobility_bits: u64,
}

impl IsolationWindowKey {
    /// Key of a fragmentation scan
    pub fn of(scan: &FragmentScan) -> Self {
        Self {
            target_bits: canonical_bits(scan.isolation_target),
            mobility_bits: canonical_bits(scan.mobility),
        }
    }
}

fn canonical_bits(value: f64) -> u64 {
    if value == 0.0 {
        0.0f64.to_bits()
    } else {
        value.to_bits()
    }
}

/// All fragmentation scans sharing one (isolation target, mobility) pair
#[derive(Debug, Clone, PartialEq)]
pub struct IsolationWindowGroup {
    target_mz: f64,
    mobility: f64,
    lower_offset: f64,
    upper_offset: f64,
    scans: Vec<FragmentScan>,
}

impl IsolationWindowGroup {
    fn new(first: FragmentScan) -> Self {
        Self {
            target_mz: first.isolation_target,
            mobility: first.mobility,
            lower_offset: first.isolation_lower_offset,
            upper_offset: first.isolation_upper_offset,
            scans: vec![first],
        }
    }

    /// Isolation target m/z shared by every member
    pub fn target_mz(&self) -> f64 {
        self.target_mz
    }

    /// Mobility value shared by every member
    pub fn mobility(&self) -> f64 {
        self.mobility
    }

    /// Lower edge: target minus the first member's lower offset
    pub fn low_mz(&self) -> f64 {
        self.target_mz - self.lower_offset
    }

    /// Upper edge: target plus the first member's upper offset
    pub fn high_mz(&self) -> f64 {
        self.target_mz + self.upper_offset
    }

    /// Number of member scans (at least one)
    pub fn len(&self) -> usize {
        self.scans.len()
    }

    /// Always false; a group is created with its first member
    pub fn is_empty(&self) -> bool {
        self.scans.is_empty()
    }

    /// Member scans in original order
    pub fn scans(&self) -> &[FragmentScan] {
        &self.scans
    }

    /// Take the member scans
    pub fn into_scans(self) -> Vec<FragmentScan> {
        self.scans
    }
}

/// Partition fragmentation scans into isolation-window groups.
///
/// Consumes the input. Every scan lands in exactly one group; groups are
/// ordered by the position of their first member in the input.
pub fn partition_isolation_windows(scans: Vec<FragmentScan>) -> Vec<IsolationWindowGroup> {
    let mut groups: Vec<IsolationWindowGroup> = Vec::new();
    let mut index: HashMap<IsolationWindowKey, usize> = HashMap::new();

    for scan in scans {
        let key = IsolationWindowKey::of(&scan);
        match index.get(&key) {
            Some(&slot) => groups[slot].scans.push(scan),
            None => {
                index.insert(key, groups.len());
                groups.push(IsolationWindowGroup::new(scan));
            }
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(target: f64, mobility: f64, time: f64) -> FragmentScan {
        FragmentScan {
            isolation_target: target,
            mobility,
            acquisition_time: time,
            isolation_lower_offset: 10.0,
            isolation_upper_offset: 10.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_groups_in_first_appearance_order() {
        let scans = vec![
            scan(700.0, 0.0, 1.0),
            scan(500.0, 0.0, 2.0),
            scan(700.0, 0.0, 3.0),
            scan(600.0, 0.0, 4.0),
            scan(500.0, 0.0, 5.0),
        ];
        let groups = partition_isolation_windows(scans);

        let targets: Vec<f64> = groups.iter().map(|g| g.target_mz()).collect();
        assert_eq!(targets, vec![700.0, 500.0, 600.0]);
        let times: Vec<f64> = groups[0].scans().iter().map(|s| s.acquisition_time).collect();
        assert_eq!(times, vec![1.0, 3.0]);
        assert_eq!(groups[1].len(), 2);
        assert_eq!(groups[2].len(), 1);
    }

    #[test]
    fn test_mobility_splits_windows() {
        let scans = vec![
            scan(500.0, -45.0, 1.0),
            scan(500.0, -60.0, 2.0),
            scan(500.0, -45.0, 3.0),
        ];
        let groups = partition_isolation_windows(scans);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].mobility(), -45.0);
        assert_eq!(groups[0].len(), 2);
        assert_eq!(groups[1].mobility(), -60.0);
    }

    #[test]
    fn test_no_tolerance_on_target() {
        let groups = partition_isolation_windows(vec![scan(500.0, 0.0, 1.0), scan(500.0001, 0.0, 2.0)]);
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn test_signed_zero_is_one_key() {
        let groups = partition_isolation_windows(vec![scan(0.0, 0.0, 1.0), scan(-0.0, -0.0, 2.0)]);
        assert_eq!(groups.len(), 1);
    }

    #[test]
    fn test_window_edges_from_first_member() {
        let mut second = scan(500.0, 0.0, 2.0);
        second.isolation_lower_offset = 1.0;
        let groups = partition_isolation_windows(vec![scan(500.0, 0.0, 1.0), second]);

        assert_eq!(groups[0].low_mz(), 490.0);
        assert_eq!(groups[0].high_mz(), 510.0);
    }

    #[test]
    fn test_empty_input() {
        assert!(partition_isolation_windows(Vec::new()).is_empty());
    }
}
