//! Slot-occupancy tables.
//!
//! A timetable has two sides: per-class rows and per-teacher rows over the
//! same slot sequence. Each occupied cell names the subject and the
//! counterpart entity (the teacher in a class row, the class in a teacher
//! row), so the two sides stay mutually consistent by construction.
//!
//! Tables are built fresh for each placement trial and are read-only once
//! the trial returns.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ops::Range;

/// One occupied cell: which subject is taught, and with whom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotEntry {
    /// Subject name.
    pub subject: String,
    /// Counterpart entity id: teacher id in a class row, class id in a
    /// teacher row.
    pub counterpart: String,
}

impl SlotEntry {
    /// Creates a cell entry.
    pub fn new(subject: impl Into<String>, counterpart: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            counterpart: counterpart.into(),
        }
    }
}

/// Slot-indexed occupancy rows for one side of a timetable.
///
/// Maps each entity id to an ordered row with one cell per slot. Rows are
/// allocated empty and filled only through [`occupy`](Self::occupy) during
/// a placement trial.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OccupancyTable {
    rows: HashMap<String, Vec<Option<SlotEntry>>>,
    slot_count: usize,
}

impl OccupancyTable {
    /// Creates a table with an empty row of `slot_count` cells per entity.
    pub fn new<I, S>(ids: I, slot_count: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: ids
                .into_iter()
                .map(|id| (id.into(), vec![None; slot_count]))
                .collect(),
            slot_count,
        }
    }

    /// Number of slots per row.
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    /// The row for one entity, if present.
    pub fn row(&self, id: &str) -> Option<&[Option<SlotEntry>]> {
        self.rows.get(id).map(Vec::as_slice)
    }

    /// All entity ids with a row in this table.
    pub fn entity_ids(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    /// Whether `size` consecutive cells starting at `start` are all free
    /// for the given entity. Unknown entities have no free cells.
    pub fn is_block_free(&self, id: &str, start: usize, size: usize) -> bool {
        match self.rows.get(id) {
            Some(row) => {
                start + size <= row.len() && row[start..start + size].iter().all(Option::is_none)
            }
            None => false,
        }
    }

    /// Whether the entity already has `subject` anywhere in the given
    /// slot range (used for the one-occurrence-per-day rule).
    pub fn has_subject_in(&self, id: &str, slots: Range<usize>, subject: &str) -> bool {
        self.rows
            .get(id)
            .and_then(|row| row.get(slots))
            .is_some_and(|cells| cells.iter().flatten().any(|e| e.subject == subject))
    }

    /// Total number of occupied cells across all rows.
    pub fn occupied_count(&self) -> usize {
        self.rows
            .values()
            .flat_map(|row| row.iter())
            .filter(|cell| cell.is_some())
            .count()
    }

    /// Fills one cell. Out-of-range indices and unknown ids are ignored;
    /// trials only ever write through indices they validated as free.
    pub(crate) fn occupy(&mut self, id: &str, index: usize, entry: SlotEntry) {
        if let Some(cell) = self.rows.get_mut(id).and_then(|row| row.get_mut(index)) {
            *cell = Some(entry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> OccupancyTable {
        OccupancyTable::new(["c1", "c2"], 12)
    }

    #[test]
    fn test_new_rows_are_empty() {
        let t = table();
        assert_eq!(t.slot_count(), 12);
        assert_eq!(t.occupied_count(), 0);
        assert!(t.row("c1").unwrap().iter().all(Option::is_none));
        assert!(t.row("zz").is_none());
    }

    #[test]
    fn test_occupy_and_query() {
        let mut t = table();
        t.occupy("c1", 3, SlotEntry::new("DBMS", "t1"));
        t.occupy("c1", 4, SlotEntry::new("DBMS", "t1"));

        assert_eq!(t.occupied_count(), 2);
        assert!(!t.is_block_free("c1", 3, 1));
        assert!(!t.is_block_free("c1", 2, 2));
        assert!(t.is_block_free("c1", 5, 2));
        assert!(t.is_block_free("c2", 3, 2));

        let entry = t.row("c1").unwrap()[3].as_ref().unwrap();
        assert_eq!(entry.subject, "DBMS");
        assert_eq!(entry.counterpart, "t1");
    }

    #[test]
    fn test_block_free_at_row_end() {
        let t = table();
        assert!(t.is_block_free("c1", 10, 2));
        assert!(!t.is_block_free("c1", 11, 2));
        assert!(!t.is_block_free("nope", 0, 1));
    }

    #[test]
    fn test_has_subject_in_range() {
        let mut t = table();
        t.occupy("c1", 7, SlotEntry::new("OS", "t2"));

        assert!(t.has_subject_in("c1", 6..12, "OS"));
        assert!(!t.has_subject_in("c1", 0..6, "OS"));
        assert!(!t.has_subject_in("c1", 6..12, "DBMS"));
        assert!(!t.has_subject_in("c2", 6..12, "OS"));
    }

    #[test]
    fn test_occupy_ignores_unknown_targets() {
        let mut t = table();
        t.occupy("zz", 0, SlotEntry::new("OS", "t1"));
        t.occupy("c1", 99, SlotEntry::new("OS", "t1"));
        assert_eq!(t.occupied_count(), 0);
    }

    #[test]
    fn test_serde_round_trip() {
        let mut t = table();
        t.occupy("c2", 0, SlotEntry::new("Maths", "t3"));
        let json = serde_json::to_string(&t).unwrap();
        let back: OccupancyTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }
}
