//! Weekly time grid.
//!
//! Maps an ordered list of day labels and a fixed periods-per-day count
//! onto a flat sequence of slot indices, and back. All placement code
//! works on flat indices; days and periods exist only at the boundary.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// The weekly slot grid shared by every timetable.
///
/// Slots are numbered row-major: all periods of the first day, then the
/// second day, and so on. For a slot index `i`,
/// `day = i / periods_per_day` and `period = i % periods_per_day`.
///
/// A block of `size` contiguous periods fits at index `i` only when it does
/// not run past the end of the day: `period(i) + size <= periods_per_day`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekGrid {
    /// Ordered day labels, e.g. `["Mon", "Tue", "Wed", "Thu", "Fri"]`.
    pub days: Vec<String>,
    /// Number of teaching periods in each day.
    pub periods_per_day: usize,
}

impl WeekGrid {
    /// Creates a grid from ordered day labels and a periods-per-day count.
    pub fn new<I, S>(days: I, periods_per_day: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            days: days.into_iter().map(Into::into).collect(),
            periods_per_day,
        }
    }

    /// Number of days in the week.
    #[inline]
    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    /// Total number of slots: `days × periods_per_day`.
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.days.len() * self.periods_per_day
    }

    /// Day index of a slot.
    #[inline]
    pub fn day_of(&self, index: usize) -> usize {
        index / self.periods_per_day
    }

    /// Zero-based period-within-day of a slot.
    #[inline]
    pub fn period_of(&self, index: usize) -> usize {
        index % self.periods_per_day
    }

    /// Flat slot index of (day, period).
    #[inline]
    pub fn slot_index(&self, day: usize, period: usize) -> usize {
        day * self.periods_per_day + period
    }

    /// Range of slot indices belonging to one day.
    #[inline]
    pub fn day_slots(&self, day: usize) -> Range<usize> {
        let start = day * self.periods_per_day;
        start..start + self.periods_per_day
    }

    /// Whether a block of `size` contiguous periods starting at `index`
    /// stays within one day.
    #[inline]
    pub fn block_fits(&self, index: usize, size: usize) -> bool {
        index + size <= self.slot_count() && self.period_of(index) + size <= self.periods_per_day
    }

    /// Display label for a slot: `"{day}-P{n}"` with a 1-based period.
    pub fn slot_label(&self, index: usize) -> String {
        format!("{}-P{}", self.days[self.day_of(index)], self.period_of(index) + 1)
    }

    /// Labels for every slot, in index order.
    pub fn labels(&self) -> Vec<String> {
        (0..self.slot_count()).map(|i| self.slot_label(i)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn week() -> WeekGrid {
        WeekGrid::new(["Mon", "Tue", "Wed", "Thu", "Fri"], 6)
    }

    #[test]
    fn test_slot_count() {
        assert_eq!(week().slot_count(), 30);
        assert_eq!(WeekGrid::new(["Mon"], 8).slot_count(), 8);
    }

    #[test]
    fn test_day_period_mapping() {
        let g = week();
        assert_eq!(g.day_of(0), 0);
        assert_eq!(g.period_of(0), 0);
        assert_eq!(g.day_of(7), 1);
        assert_eq!(g.period_of(7), 1);
        assert_eq!(g.day_of(29), 4);
        assert_eq!(g.period_of(29), 5);
        assert_eq!(g.slot_index(1, 1), 7);
    }

    #[test]
    fn test_day_slots() {
        let g = week();
        assert_eq!(g.day_slots(0), 0..6);
        assert_eq!(g.day_slots(2), 12..18);
    }

    #[test]
    fn test_block_fits_inside_day() {
        let g = week();
        assert!(g.block_fits(0, 2));
        assert!(g.block_fits(4, 2)); // P5+P6 of Monday
        assert!(!g.block_fits(5, 2)); // would cross into Tuesday
        assert!(g.block_fits(5, 1));
        assert!(!g.block_fits(29, 2)); // end of week
    }

    #[test]
    fn test_labels() {
        let g = week();
        assert_eq!(g.slot_label(0), "Mon-P1");
        assert_eq!(g.slot_label(6), "Tue-P1");
        assert_eq!(g.slot_label(29), "Fri-P6");
        let labels = g.labels();
        assert_eq!(labels.len(), 30);
        assert_eq!(labels[11], "Tue-P6");
    }

    #[test]
    fn test_serde_round_trip() {
        let g = week();
        let json = serde_json::to_string(&g).unwrap();
        let back: WeekGrid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, g);
    }
}
