//! One randomized greedy placement trial.
//!
//! # Algorithm
//!
//! 1. Expand all assignments into a pooled unit list; shuffle it, then
//!    stable-sort descending by block size. Hard-to-place 2-period blocks
//!    go first, while the shuffle keeps ordering random within each size.
//! 2. For each unit, scan the slot indices in a freshly shuffled order and
//!    take the first legal position: the block must not cross a day
//!    boundary, every covered slot must be free in both the class row and
//!    the teacher row, and the class must not already have the subject
//!    that day.
//! 3. Units with no legal position land on the remaining list; one
//!    unplaceable unit never aborts the trial.
//!
//! A trial is deterministic given its seed and shares no state with any
//! other trial: both occupancy tables are built fresh on entry.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::cmp::Reverse;

use crate::models::{Assignment, ClassGroup, OccupancyTable, SlotEntry, Teacher, WeekGrid};
use crate::solver::unit::{expand_units, PlacementUnit};

/// Result of one placement trial.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialOutcome {
    /// Per-class slot rows.
    pub class_tables: OccupancyTable,
    /// Per-teacher slot rows.
    pub teacher_tables: OccupancyTable,
    /// Units the trial could not place.
    pub remaining: Vec<PlacementUnit>,
}

impl TrialOutcome {
    /// Number of occupied class-table slots.
    pub fn placed_count(&self) -> usize {
        self.class_tables.occupied_count()
    }

    /// Whether every unit was placed.
    pub fn is_complete(&self) -> bool {
        self.remaining.is_empty()
    }
}

/// Runs one seeded randomized greedy trial over fresh tables.
pub fn run_trial(
    classes: &[ClassGroup],
    teachers: &[Teacher],
    assignments: &[Assignment],
    grid: &WeekGrid,
    seed: u64,
) -> TrialOutcome {
    let mut rng = SmallRng::seed_from_u64(seed);
    let slot_count = grid.slot_count();

    let mut class_tables = OccupancyTable::new(classes.iter().map(|c| c.id.as_str()), slot_count);
    let mut teacher_tables =
        OccupancyTable::new(teachers.iter().map(|t| t.id.as_str()), slot_count);

    let mut units = expand_units(assignments);
    units.shuffle(&mut rng);
    // Stable sort: shuffle order survives within each block size.
    units.sort_by_key(|u| Reverse(u.block));

    let mut slot_order: Vec<usize> = (0..slot_count).collect();
    let mut remaining = Vec::new();

    for unit in units {
        slot_order.shuffle(&mut rng);
        let position = slot_order.iter().copied().find(|&start| {
            is_legal(&class_tables, &teacher_tables, grid, &unit, start)
        });
        match position {
            Some(start) => place(&mut class_tables, &mut teacher_tables, &unit, start),
            None => remaining.push(unit),
        }
    }

    TrialOutcome {
        class_tables,
        teacher_tables,
        remaining,
    }
}

fn is_legal(
    class_tables: &OccupancyTable,
    teacher_tables: &OccupancyTable,
    grid: &WeekGrid,
    unit: &PlacementUnit,
    start: usize,
) -> bool {
    if !grid.block_fits(start, unit.block) {
        return false;
    }
    if !class_tables.is_block_free(&unit.class_id, start, unit.block)
        || !teacher_tables.is_block_free(&unit.teacher_id, start, unit.block)
    {
        return false;
    }
    // At most one occurrence of a subject per class per day.
    let day = grid.day_of(start);
    !class_tables.has_subject_in(&unit.class_id, grid.day_slots(day), &unit.subject)
}

fn place(
    class_tables: &mut OccupancyTable,
    teacher_tables: &mut OccupancyTable,
    unit: &PlacementUnit,
    start: usize,
) {
    for index in start..start + unit.block {
        class_tables.occupy(
            &unit.class_id,
            index,
            SlotEntry::new(&unit.subject, &unit.teacher_id),
        );
        teacher_tables.occupy(
            &unit.teacher_id,
            index,
            SlotEntry::new(&unit.subject, &unit.class_id),
        );
    }
}
