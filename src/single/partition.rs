//! Weekly-period partitioning.
//!
//! Enumerates the legal ways to split one subject's weekly period count
//! into an ordered sequence of contiguous sub-block sizes, and builds the
//! combination space over all subjects. The space is the cartesian product
//! of per-subject options; past a fixed cap it degrades to bounded random
//! sampling without replacement, trading completeness for bounded runtime.

use itertools::Itertools;
use rand::Rng;
use std::collections::HashSet;

use crate::single::block::{BlockKind, SubjectBlock};

/// Upper bound on enumerated or sampled partition combinations.
pub const MAX_PARTITION_COMBINATIONS: usize = 6000;

/// All non-increasing partitions of `total` into parts of at most
/// `max_part`, largest-first within each level.
fn descending_partitions(total: u32, max_part: u32) -> Vec<Vec<u32>> {
    fn fill(remaining: u32, max_part: u32, current: &mut Vec<u32>, out: &mut Vec<Vec<u32>>) {
        if remaining == 0 {
            out.push(current.clone());
            return;
        }
        for part in (1..=max_part.min(remaining)).rev() {
            current.push(part);
            fill(remaining - part, part, current, out);
            current.pop();
        }
    }

    let mut out = Vec::new();
    fill(total, max_part, &mut Vec::new(), &mut out);
    out
}

/// Legal sub-block size sequences for one subject block.
///
/// - Labs of 4 periods split exactly 2+2; other even lab totals up to 8
///   offer the all-pairs split plus a single long run as fallback; odd
///   totals only the long run.
/// - Open electives, projects: exactly 2+2 (totals validated upstream).
/// - The merged library+mentoring pair: one 2-period block.
/// - Everything else: every non-increasing partition with parts of at
///   most 3, or the whole total if none exist.
pub fn partitions_for(block: &SubjectBlock) -> Vec<Vec<u32>> {
    match block.kind {
        BlockKind::Lab => {
            if block.periods == 4 {
                vec![vec![2, 2]]
            } else {
                let mut options = Vec::new();
                if block.periods % 2 == 0 && block.periods / 2 <= 4 {
                    options.push(vec![2; (block.periods / 2) as usize]);
                }
                options.push(vec![block.periods]);
                options
            }
        }
        BlockKind::OpenElective | BlockKind::Project => vec![vec![2, 2]],
        BlockKind::LibraryMentoring => vec![vec![2]],
        BlockKind::Main
        | BlockKind::ProfessionalElective
        | BlockKind::Library
        | BlockKind::Mentoring
        | BlockKind::Other => {
            let options = descending_partitions(block.periods, 3);
            if options.is_empty() {
                vec![vec![block.periods]]
            } else {
                options
            }
        }
    }
}

/// Builds the combination space over per-subject partition options.
///
/// Each combination picks one option index per subject. When the full
/// product fits under `cap` it is enumerated in order; otherwise up to
/// `cap` sampling attempts draw random combinations, deduplicated, so the
/// search stays bounded on explosive inputs.
pub fn partition_combinations<R: Rng>(
    options: &[Vec<Vec<u32>>],
    cap: usize,
    rng: &mut R,
) -> Vec<Vec<usize>> {
    if options.is_empty() {
        // An empty subject list has exactly one (empty) combination.
        return vec![Vec::new()];
    }

    let mut product: usize = 1;
    let mut exceeds_cap = false;
    for o in options {
        match product.checked_mul(o.len().max(1)) {
            Some(p) if p <= cap => product = p,
            _ => {
                exceeds_cap = true;
                break;
            }
        }
    }

    if !exceeds_cap {
        return options
            .iter()
            .map(|o| 0..o.len())
            .multi_cartesian_product()
            .collect();
    }

    let mut seen = HashSet::with_capacity(cap);
    let mut combinations = Vec::new();
    for _ in 0..cap {
        let combo: Vec<usize> = options
            .iter()
            .map(|o| rng.random_range(0..o.len()))
            .collect();
        if seen.insert(combo.clone()) {
            combinations.push(combo);
        }
    }
    combinations
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn block(kind: BlockKind, periods: u32) -> SubjectBlock {
        SubjectBlock {
            subject: "S".into(),
            staff: "P".into(),
            periods,
            kind,
            pairing: None,
        }
    }

    #[test]
    fn test_descending_partitions_of_four() {
        assert_eq!(
            descending_partitions(4, 3),
            vec![
                vec![3, 1],
                vec![2, 2],
                vec![2, 1, 1],
                vec![1, 1, 1, 1],
            ]
        );
    }

    #[test]
    fn test_partitions_never_increase() {
        for p in 1..=10 {
            for partition in descending_partitions(p, 3) {
                assert_eq!(partition.iter().sum::<u32>(), p);
                assert!(partition.windows(2).all(|w| w[0] >= w[1]));
                assert!(partition.iter().all(|&part| part <= 3));
            }
        }
    }

    #[test]
    fn test_lab_partitions() {
        assert_eq!(partitions_for(&block(BlockKind::Lab, 4)), vec![vec![2, 2]]);
        assert_eq!(
            partitions_for(&block(BlockKind::Lab, 6)),
            vec![vec![2, 2, 2], vec![6]]
        );
        // Odd totals only offer the long run.
        assert_eq!(partitions_for(&block(BlockKind::Lab, 3)), vec![vec![3]]);
        // Too many pairs to spread: long run only.
        assert_eq!(partitions_for(&block(BlockKind::Lab, 10)), vec![vec![10]]);
    }

    #[test]
    fn test_fixed_two_plus_two_kinds() {
        for kind in [BlockKind::OpenElective, BlockKind::Project] {
            assert_eq!(partitions_for(&block(kind, 4)), vec![vec![2, 2]]);
        }
        assert_eq!(
            partitions_for(&block(BlockKind::LibraryMentoring, 2)),
            vec![vec![2]]
        );
    }

    #[test]
    fn test_main_subject_partitions() {
        let options = partitions_for(&block(BlockKind::Main, 6));
        assert_eq!(options.len(), 7);
        assert!(options.contains(&vec![3, 3]));
        assert!(options.contains(&vec![2, 2, 2]));
        assert!(options.contains(&vec![1, 1, 1, 1, 1, 1]));
    }

    #[test]
    fn test_combination_enumeration_in_order() {
        let options = vec![
            vec![vec![2u32], vec![1, 1]],
            vec![vec![3u32], vec![2, 1], vec![1, 1, 1]],
        ];
        let mut rng = SmallRng::seed_from_u64(0);
        let combos = partition_combinations(&options, MAX_PARTITION_COMBINATIONS, &mut rng);
        assert_eq!(combos.len(), 6);
        assert_eq!(combos[0], vec![0, 0]);
        assert_eq!(combos[5], vec![1, 2]);
    }

    #[test]
    fn test_combination_sampling_respects_cap() {
        // 4^8 = 65536 combinations, far over a cap of 100.
        let options: Vec<Vec<Vec<u32>>> =
            (0..8).map(|_| vec![vec![1], vec![2], vec![3], vec![4]]).collect();
        let mut rng = SmallRng::seed_from_u64(42);
        let combos = partition_combinations(&options, 100, &mut rng);

        assert!(combos.len() <= 100);
        assert!(!combos.is_empty());
        let unique: HashSet<&Vec<usize>> = combos.iter().collect();
        assert_eq!(unique.len(), combos.len());
        assert!(combos.iter().all(|c| c.iter().all(|&i| i < 4)));
    }

    #[test]
    fn test_empty_subject_list_has_one_combination() {
        let mut rng = SmallRng::seed_from_u64(0);
        let combos = partition_combinations(&[], 10, &mut rng);
        assert_eq!(combos, vec![Vec::<usize>::new()]);
    }
}
