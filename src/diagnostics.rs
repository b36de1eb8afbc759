//! Pre-search feasibility diagnostics.
//!
//! Checks structural integrity of the input before any randomized search
//! runs. Detects:
//! - Classes or teachers whose requested weekly periods exceed the slot
//!   capacity of the grid (overload)
//! - Assignments referencing unknown teacher or class ids
//! - Duplicate entity ids
//!
//! Overload is a hard precondition: the orchestrator refuses to search an
//! overloaded input and returns the report instead of a schedule.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::error::EngineError;
use crate::models::{Assignment, ClassGroup, Teacher};

/// Requested-versus-available load for one class or teacher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    /// Entity id.
    pub id: String,
    /// Entity display name.
    pub name: String,
    /// Total periods per week requested across all assignments.
    pub requested: u32,
    /// Slots available in the weekly grid.
    pub available: u32,
    /// Shortfall: `max(0, requested - available)`.
    pub overload: u32,
}

/// Per-entity load figures for a scheduling input.
///
/// Rows are sorted worst-first (descending overload, then descending
/// requested load) so the most problematic entities lead the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticsReport {
    /// Slots available per entity in the weekly grid.
    pub slot_count: u32,
    /// Load per class, worst-first.
    pub classes: Vec<LoadReport>,
    /// Load per teacher, worst-first.
    pub teachers: Vec<LoadReport>,
}

impl DiagnosticsReport {
    /// Whether any class or teacher requests more periods than fit.
    pub fn has_overload(&self) -> bool {
        self.classes
            .iter()
            .chain(self.teachers.iter())
            .any(|r| r.overload > 0)
    }

    /// All overloaded entities, classes first.
    pub fn overloaded(&self) -> impl Iterator<Item = &LoadReport> {
        self.classes
            .iter()
            .chain(self.teachers.iter())
            .filter(|r| r.overload > 0)
    }
}

impl fmt::Display for DiagnosticsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for r in self.overloaded() {
            if !first {
                write!(f, "; ")?;
            }
            first = false;
            write!(
                f,
                "'{}' requests {} of {} available periods (overload {})",
                r.name, r.requested, r.available, r.overload
            )?;
        }
        if first {
            write!(f, "no overloaded classes or teachers")?;
        }
        Ok(())
    }
}

/// Computes per-entity load figures for the given input.
///
/// Entities with no assignments report a requested load of zero. The
/// computation is pure: re-running it on unchanged input yields an
/// identical report.
pub fn diagnose(
    classes: &[ClassGroup],
    teachers: &[Teacher],
    assignments: &[Assignment],
    slot_count: usize,
) -> DiagnosticsReport {
    let mut class_totals: HashMap<&str, u32> = HashMap::new();
    let mut teacher_totals: HashMap<&str, u32> = HashMap::new();
    for a in assignments {
        *class_totals.entry(a.class_id.as_str()).or_insert(0) += a.periods_per_week;
        *teacher_totals.entry(a.teacher_id.as_str()).or_insert(0) += a.periods_per_week;
    }

    let available = slot_count as u32;
    let load = |id: &str, name: &str, requested: u32| LoadReport {
        id: id.to_string(),
        name: name.to_string(),
        requested,
        available,
        overload: requested.saturating_sub(available),
    };

    let mut class_rows: Vec<LoadReport> = classes
        .iter()
        .map(|c| load(&c.id, &c.name, class_totals.get(c.id.as_str()).copied().unwrap_or(0)))
        .collect();
    let mut teacher_rows: Vec<LoadReport> = teachers
        .iter()
        .map(|t| load(&t.id, &t.name, teacher_totals.get(t.id.as_str()).copied().unwrap_or(0)))
        .collect();

    let worst_first = |a: &LoadReport, b: &LoadReport| {
        b.overload.cmp(&a.overload).then(b.requested.cmp(&a.requested))
    };
    class_rows.sort_by(worst_first);
    teacher_rows.sort_by(worst_first);

    DiagnosticsReport {
        slot_count: available,
        classes: class_rows,
        teachers: teacher_rows,
    }
}

/// Validates that entity ids are unique and every assignment references an
/// existing teacher and class.
///
/// Returns the first violation found. The randomized solver indexes tables
/// by these ids, so a dangling reference would otherwise surface as a
/// silently unplaceable unit.
pub fn validate_references(
    classes: &[ClassGroup],
    teachers: &[Teacher],
    assignments: &[Assignment],
) -> Result<(), EngineError> {
    let mut class_ids = HashSet::new();
    for c in classes {
        if !class_ids.insert(c.id.as_str()) {
            return Err(EngineError::DuplicateId {
                entity: "class",
                id: c.id.clone(),
            });
        }
    }
    let mut teacher_ids = HashSet::new();
    for t in teachers {
        if !teacher_ids.insert(t.id.as_str()) {
            return Err(EngineError::DuplicateId {
                entity: "teacher",
                id: t.id.clone(),
            });
        }
    }

    for a in assignments {
        if !teacher_ids.contains(a.teacher_id.as_str()) {
            return Err(EngineError::UnknownReference {
                assignment: a.id.clone(),
                entity: "teacher",
                id: a.teacher_id.clone(),
            });
        }
        if !class_ids.contains(a.class_id.as_str()) {
            return Err(EngineError::UnknownReference {
                assignment: a.id.clone(),
                entity: "class",
                id: a.class_id.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn sample_input() -> (Vec<ClassGroup>, Vec<Teacher>, Vec<Assignment>) {
        let classes = vec![
            ClassGroup::new("c1").with_name("CSE-1"),
            ClassGroup::new("c2").with_name("CSE-2"),
        ];
        let teachers = vec![
            Teacher::new("t1").with_name("Alice"),
            Teacher::new("t2").with_name("Bob"),
        ];
        let assignments = vec![
            Assignment::new("a1", "t1", "c1", "DBMS").with_periods_per_week(5),
            Assignment::new("a2", "t2", "c1", "OS").with_periods_per_week(4),
            Assignment::new("a3", "t1", "c2", "DBMS").with_periods_per_week(3),
        ];
        (classes, teachers, assignments)
    }

    #[test]
    fn test_totals_per_entity() {
        let (classes, teachers, assignments) = sample_input();
        let report = diagnose(&classes, &teachers, &assignments, 30);

        let c1 = report.classes.iter().find(|r| r.id == "c1").unwrap();
        assert_eq!(c1.requested, 9);
        assert_eq!(c1.overload, 0);

        let t1 = report.teachers.iter().find(|r| r.id == "t1").unwrap();
        assert_eq!(t1.requested, 8);
        let t2 = report.teachers.iter().find(|r| r.id == "t2").unwrap();
        assert_eq!(t2.requested, 4);
        assert!(!report.has_overload());
    }

    #[test]
    fn test_overload_detected_and_sorted_first() {
        let classes = vec![ClassGroup::new("c1").with_name("CSE-1")];
        let teachers = vec![Teacher::new("t1").with_name("Alice")];
        // 40 periods against a 30-slot week.
        let assignments = vec![
            Assignment::new("a1", "t1", "c1", "DBMS").with_periods_per_week(40),
        ];
        let report = diagnose(&classes, &teachers, &assignments, 30);

        assert!(report.has_overload());
        assert_eq!(report.classes[0].overload, 10);
        assert_eq!(report.teachers[0].overload, 10);
        assert!(report.to_string().contains("overload 10"));
    }

    #[test]
    fn test_unassigned_entities_report_zero() {
        let (mut classes, teachers, assignments) = sample_input();
        classes.push(ClassGroup::new("c3").with_name("CSE-3"));
        let report = diagnose(&classes, &teachers, &assignments, 30);

        let c3 = report.classes.iter().find(|r| r.id == "c3").unwrap();
        assert_eq!(c3.requested, 0);
        assert_eq!(c3.overload, 0);
        // Worst-first ordering puts the idle class last.
        assert_eq!(report.classes.last().unwrap().id, "c3");
    }

    #[test]
    fn test_diagnose_is_idempotent() {
        let (classes, teachers, assignments) = sample_input();
        let first = diagnose(&classes, &teachers, &assignments, 30);
        let second = diagnose(&classes, &teachers, &assignments, 30);
        assert_eq!(first, second);
    }

    #[test]
    fn test_category_does_not_change_totals() {
        let classes = vec![ClassGroup::new("c1")];
        let teachers = vec![Teacher::new("t1")];
        let assignments = vec![
            Assignment::new("a1", "t1", "c1", "Physics Lab")
                .with_category(Category::Lab)
                .with_periods_per_week(3),
        ];
        let report = diagnose(&classes, &teachers, &assignments, 30);
        assert_eq!(report.classes[0].requested, 3);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let classes = vec![ClassGroup::new("c1"), ClassGroup::new("c1")];
        let teachers = vec![Teacher::new("t1")];
        let err = validate_references(&classes, &teachers, &[]).unwrap_err();
        assert_eq!(
            err,
            EngineError::DuplicateId {
                entity: "class",
                id: "c1".into()
            }
        );
    }

    #[test]
    fn test_dangling_reference_rejected() {
        let classes = vec![ClassGroup::new("c1")];
        let teachers = vec![Teacher::new("t1")];
        let assignments = vec![Assignment::new("a1", "t9", "c1", "OS")];
        let err = validate_references(&classes, &teachers, &assignments).unwrap_err();
        assert_eq!(
            err,
            EngineError::UnknownReference {
                assignment: "a1".into(),
                entity: "teacher",
                id: "t9".into()
            }
        );
    }

    #[test]
    fn test_valid_references_accepted() {
        let (classes, teachers, assignments) = sample_input();
        assert!(validate_references(&classes, &teachers, &assignments).is_ok());
    }
}
