//! Constrained backtracking placement for one class.
//!
//! # Algorithm
//!
//! For each partition combination, materialize one block instance per
//! sub-block, order them largest-first, and run exhaustive backtracking
//! over the day × period grid. Several shuffled-then-resorted orderings of
//! the same instances are tried to escape dead ends a single fixed order
//! runs into. The first complete placement wins; it is a feasible
//! schedule, not an optimal one.
//!
//! The backtracking mutates one schedule in place: every failed branch
//! frees its slots and restores the per-day subject counters before the
//! scan continues.

use log::{debug, info};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::HashMap;

use crate::error::EngineError;
use crate::models::{SubjectRequest, WeekGrid};
use crate::single::block::{build_blocks, BlockKind, SubjectBlock};
use crate::single::partition::{
    partition_combinations, partitions_for, MAX_PARTITION_COMBINATIONS,
};

/// Maximum periods of one main-subject or professional-elective per day.
const SUBJECT_PER_DAY_CAP: u32 = 3;

/// One sub-block to place: a run of `size` contiguous periods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockInstance {
    /// Subject label.
    pub subject: String,
    /// Staff label.
    pub staff: String,
    /// Contiguous periods this instance occupies.
    pub size: usize,
    /// Packing kind inherited from the subject block.
    pub kind: BlockKind,
    /// Paired labels for the merged library+mentoring instance.
    pub pairing: Option<(String, String)>,
}

impl BlockInstance {
    /// Cell labels for this instance, one per occupied period.
    ///
    /// The merged pair of size 2 writes its two recorded labels in order;
    /// every other case repeats the subject label.
    fn labels(&self) -> Vec<String> {
        if self.kind == BlockKind::LibraryMentoring && self.size == 2 {
            if let Some((first, second)) = &self.pairing {
                return vec![
                    format!("{first} ({})", self.staff),
                    format!("{second} ({})", self.staff),
                ];
            }
        }
        vec![format!("{} ({})", self.subject, self.staff); self.size]
    }
}

/// A completed single-class week: day × period cells of occupant labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSchedule {
    /// Ordered day labels.
    pub days: Vec<String>,
    /// Periods in each day.
    pub periods_per_day: usize,
    cells: Vec<Vec<Option<String>>>,
}

impl ClassSchedule {
    /// The label at (day, period), if occupied.
    pub fn cell(&self, day: usize, period: usize) -> Option<&str> {
        self.cells.get(day)?.get(period)?.as_deref()
    }

    /// All rows, one per day in order.
    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.cells
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .filter(|c| c.is_some())
            .count()
    }
}

/// Partition-and-backtrack scheduler for a single class.
///
/// # Example
///
/// ```
/// use timetable_engine::models::{SubjectCategory, SubjectRequest, WeekGrid};
/// use timetable_engine::single::ClassScheduler;
///
/// let subjects = vec![
///     SubjectRequest::new(SubjectCategory::MainSubject, "Maths", "Prof. X", 6),
///     SubjectRequest::new(SubjectCategory::Laboratory, "Physics Lab", "Prof. Y", 4),
/// ];
/// let grid = WeekGrid::new(["Mon", "Tue", "Wed", "Thu", "Fri"], 8);
///
/// let schedule = ClassScheduler::new().schedule(&subjects, &grid).unwrap();
/// assert_eq!(schedule.occupied_count(), 10);
/// ```
#[derive(Debug, Clone)]
pub struct ClassScheduler {
    seed: u64,
    shuffled_orderings: usize,
    max_combinations: usize,
}

impl ClassScheduler {
    /// Creates a scheduler with default search bounds.
    pub fn new() -> Self {
        Self {
            seed: 0,
            shuffled_orderings: 8,
            max_combinations: MAX_PARTITION_COMBINATIONS,
        }
    }

    /// Sets the seed driving ordering shuffles and combination sampling.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets how many shuffled orderings to try per combination, in
    /// addition to the sorted one.
    pub fn with_shuffled_orderings(mut self, count: usize) -> Self {
        self.shuffled_orderings = count;
        self
    }

    /// Sets the cap on enumerated or sampled partition combinations.
    pub fn with_max_combinations(mut self, cap: usize) -> Self {
        self.max_combinations = cap.max(1);
        self
    }

    /// Searches for a conflict-free week for the given subjects.
    ///
    /// Fails before searching when the subject list exceeds the grid or a
    /// category rule is violated; fails with
    /// [`EngineError::SearchExhausted`] when no combination and ordering
    /// places every sub-block.
    pub fn schedule(
        &self,
        subjects: &[SubjectRequest],
        grid: &WeekGrid,
    ) -> Result<ClassSchedule, EngineError> {
        let requested: u32 = subjects.iter().map(|s| s.periods_per_week).sum();
        let available = grid.slot_count() as u32;
        if requested > available {
            return Err(EngineError::CapacityExceeded {
                requested,
                available,
            });
        }

        let blocks = build_blocks(subjects)?;
        let options: Vec<Vec<Vec<u32>>> = blocks.iter().map(partitions_for).collect();

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let combinations = partition_combinations(&options, self.max_combinations, &mut rng);
        info!(
            "searching {} partition combinations for {} subject blocks",
            combinations.len(),
            blocks.len(),
        );

        for combination in combinations {
            let instances = materialize(&blocks, &options, &combination);
            // The merged pair keeps its two input periods, so a consistent
            // combination always sums back to the requested total.
            let placed_total: u32 = instances.iter().map(|i| i.size as u32).sum();
            if placed_total != requested {
                continue;
            }

            for ordering in orderings(&instances, self.shuffled_orderings, &mut rng) {
                if let Some(cells) = try_place(&ordering, grid) {
                    debug!("placed all {} instances", ordering.len());
                    return Ok(ClassSchedule {
                        days: grid.days.clone(),
                        periods_per_day: grid.periods_per_day,
                        cells,
                    });
                }
            }
        }

        Err(EngineError::SearchExhausted)
    }
}

impl Default for ClassScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// Expands one partition combination into placeable instances,
/// largest-first with the kind order as deterministic tiebreak.
fn materialize(
    blocks: &[SubjectBlock],
    options: &[Vec<Vec<u32>>],
    combination: &[usize],
) -> Vec<BlockInstance> {
    let mut instances = Vec::new();
    for ((block, choices), &choice) in blocks.iter().zip(options).zip(combination) {
        for &size in &choices[choice] {
            instances.push(BlockInstance {
                subject: block.subject.clone(),
                staff: block.staff.clone(),
                size: size as usize,
                kind: block.kind,
                pairing: block.pairing.clone(),
            });
        }
    }
    instances.sort_by(|a, b| b.size.cmp(&a.size).then(a.kind.cmp(&b.kind)));
    instances
}

/// The sorted ordering plus `extra` shuffled-then-resorted variants.
/// Resorting by size only keeps the large-blocks-first shape while the
/// shuffle permutes equally sized instances.
fn orderings(
    instances: &[BlockInstance],
    extra: usize,
    rng: &mut SmallRng,
) -> Vec<Vec<BlockInstance>> {
    let mut all = Vec::with_capacity(extra + 1);
    all.push(instances.to_vec());
    for _ in 0..extra {
        let mut variant = instances.to_vec();
        variant.shuffle(rng);
        variant.sort_by_key(|i| Reverse(i.size));
        all.push(variant);
    }
    all
}

/// Exhaustive backtracking over the day × period grid.
///
/// Day order at every step prefers days with more free slots, spreading
/// load; slot offsets scan left to right. Returns the filled cells on
/// success, `None` when the ordering admits no complete placement.
fn try_place(instances: &[BlockInstance], grid: &WeekGrid) -> Option<Vec<Vec<Option<String>>>> {
    let mut cells = vec![vec![None; grid.periods_per_day]; grid.day_count()];
    let mut per_day_counts: Vec<HashMap<String, u32>> = vec![HashMap::new(); grid.day_count()];

    if place_from(instances, 0, &mut cells, &mut per_day_counts, grid.periods_per_day) {
        Some(cells)
    } else {
        None
    }
}

fn place_from(
    instances: &[BlockInstance],
    index: usize,
    cells: &mut [Vec<Option<String>>],
    per_day_counts: &mut [HashMap<String, u32>],
    periods_per_day: usize,
) -> bool {
    let Some(instance) = instances.get(index) else {
        return true;
    };
    if instance.size > periods_per_day {
        return false;
    }

    let mut day_order: Vec<usize> = (0..cells.len()).collect();
    day_order.sort_by_key(|&d| Reverse(cells[d].iter().filter(|c| c.is_none()).count()));

    for &day in &day_order {
        for start in 0..=periods_per_day - instance.size {
            if cells[day][start..start + instance.size]
                .iter()
                .any(Option::is_some)
            {
                continue;
            }
            if instance.kind.capped_per_day() {
                let already = per_day_counts[day]
                    .get(&instance.subject)
                    .copied()
                    .unwrap_or(0);
                if already + instance.size as u32 > SUBJECT_PER_DAY_CAP {
                    continue;
                }
            }

            for (offset, label) in instance.labels().into_iter().enumerate() {
                cells[day][start + offset] = Some(label);
            }
            *per_day_counts[day]
                .entry(instance.subject.clone())
                .or_insert(0) += instance.size as u32;

            if place_from(instances, index + 1, cells, per_day_counts, periods_per_day) {
                return true;
            }

            // Dead end below: free the slots and roll the counter back.
            for offset in 0..instance.size {
                cells[day][start + offset] = None;
            }
            if let Some(count) = per_day_counts[day].get_mut(&instance.subject) {
                *count -= instance.size as u32;
                if *count == 0 {
                    per_day_counts[day].remove(&instance.subject);
                }
            }
        }
    }
    false
}
