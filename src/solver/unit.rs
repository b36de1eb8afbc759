//! Placement-unit expansion.
//!
//! Turns each weekly assignment into the atomic units a trial actually
//! places: labs split into contiguous 2-period blocks, library and
//! mentoring collapse to one weekly period, ordinary subjects fan out one
//! unit per period. Expansion is deterministic; all randomness lives in
//! the trial that consumes the units.

use serde::{Deserialize, Serialize};

use crate::models::{Assignment, Category};

/// How a placement unit behaves once on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitKind {
    /// An ordinary single-or-double period of classroom teaching.
    Theory,
    /// A contiguous laboratory block.
    Lab,
}

/// One atomic placement unit: a block of 1 or 2 contiguous periods for one
/// teacher and one class.
///
/// Extracted from [`Assignment`] rows so trials shuffle and place compact
/// descriptors instead of cloning domain objects around.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementUnit {
    /// Teacher delivering the unit.
    pub teacher_id: String,
    /// Class receiving the unit.
    pub class_id: String,
    /// Subject name.
    pub subject: String,
    /// Contiguous block size in periods (1 or 2).
    pub block: usize,
    /// Behavioral kind.
    pub kind: UnitKind,
}

/// Whether a subject schedules as double periods regardless of category.
///
/// Matching is insensitive to case and surrounding whitespace, so "tp" and
/// " TP " rows behave identically.
fn is_double_period_subject(subject: &str) -> bool {
    subject.trim().eq_ignore_ascii_case("TP")
}

/// Expands assignments into the pooled unit list for one trial.
///
/// Rules, with `P = periods_per_week`:
/// - `Lab`: `P / 2` blocks of size 2; an odd remainder becomes one
///   single-period unit that schedules like ordinary theory.
/// - `Library` / `Mentoring`: exactly one single-period unit, whatever P is.
/// - Subjects named "TP": the same even/odd splitting as labs.
/// - Everything else: P single-period units.
pub fn expand_units(assignments: &[Assignment]) -> Vec<PlacementUnit> {
    let mut units = Vec::new();
    for a in assignments {
        let p = a.periods_per_week as usize;
        match a.category {
            Category::Lab => {
                push_units(&mut units, a, p / 2, 2, UnitKind::Lab);
                if p % 2 == 1 {
                    push_units(&mut units, a, 1, 1, UnitKind::Theory);
                }
            }
            Category::Library | Category::Mentoring => {
                push_units(&mut units, a, 1, 1, UnitKind::Theory);
            }
            Category::Theory => {
                if is_double_period_subject(&a.subject) {
                    push_units(&mut units, a, p / 2, 2, UnitKind::Theory);
                    if p % 2 == 1 {
                        push_units(&mut units, a, 1, 1, UnitKind::Theory);
                    }
                } else {
                    push_units(&mut units, a, p, 1, UnitKind::Theory);
                }
            }
        }
    }
    units
}

fn push_units(
    units: &mut Vec<PlacementUnit>,
    a: &Assignment,
    count: usize,
    block: usize,
    kind: UnitKind,
) {
    for _ in 0..count {
        units.push(PlacementUnit {
            teacher_id: a.teacher_id.clone(),
            class_id: a.class_id.clone(),
            subject: a.subject.clone(),
            block,
            kind,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment(subject: &str, category: Category, periods: u32) -> Assignment {
        Assignment::new("a1", "t1", "c1", subject)
            .with_category(category)
            .with_periods_per_week(periods)
    }

    fn blocks(units: &[PlacementUnit]) -> Vec<usize> {
        units.iter().map(|u| u.block).collect()
    }

    #[test]
    fn test_lab_even_periods_split_into_pairs() {
        let units = expand_units(&[assignment("Physics Lab", Category::Lab, 4)]);
        assert_eq!(blocks(&units), vec![2, 2]);
        assert!(units.iter().all(|u| u.kind == UnitKind::Lab));
    }

    #[test]
    fn test_lab_odd_remainder_is_a_single_theory_period() {
        let units = expand_units(&[assignment("Physics Lab", Category::Lab, 3)]);
        assert_eq!(blocks(&units), vec![2, 1]);
        assert_eq!(units[0].kind, UnitKind::Lab);
        assert_eq!(units[1].kind, UnitKind::Theory);
    }

    #[test]
    fn test_library_and_mentoring_emit_one_unit() {
        for category in [Category::Library, Category::Mentoring] {
            let units = expand_units(&[assignment("Library", category, 5)]);
            assert_eq!(blocks(&units), vec![1]);
        }
    }

    #[test]
    fn test_theory_fans_out_one_unit_per_period() {
        let units = expand_units(&[assignment("DBMS", Category::Theory, 5)]);
        assert_eq!(blocks(&units), vec![1, 1, 1, 1, 1]);
        assert!(units.iter().all(|u| u.subject == "DBMS"));
    }

    #[test]
    fn test_tp_subject_splits_like_a_lab() {
        let units = expand_units(&[assignment(" tp ", Category::Theory, 5)]);
        assert_eq!(blocks(&units), vec![2, 2, 1]);
        assert!(units.iter().all(|u| u.kind == UnitKind::Theory));
    }

    #[test]
    fn test_units_carry_assignment_identity() {
        let a = Assignment::new("a7", "t3", "c2", "OS").with_periods_per_week(2);
        let units = expand_units(&[a]);
        assert_eq!(units.len(), 2);
        assert!(units.iter().all(|u| u.teacher_id == "t3" && u.class_id == "c2"));
    }

    #[test]
    fn test_expansion_is_deterministic() {
        let input = [
            assignment("Physics Lab", Category::Lab, 5),
            assignment("TP", Category::Theory, 4),
        ];
        assert_eq!(expand_units(&input), expand_units(&input));
    }
}
