//! Weekly teaching assignments.
//!
//! An assignment is the source of truth for what must be scheduled:
//! one teacher teaching one subject to one class for a fixed number of
//! periods per week. Assignments are owned by the data-entry layer and
//! read-only to the engine.

use serde::{Deserialize, Serialize};

/// Scheduling category of an assignment.
///
/// The category decides how weekly periods expand into placement units:
/// labs form contiguous 2-period blocks, library and mentoring occupy a
/// single weekly period, everything else schedules period by period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    /// Ordinary classroom teaching, one period at a time.
    #[default]
    Theory,
    /// Laboratory work, placed as contiguous 2-period blocks.
    Lab,
    /// Library hour; a single period per week.
    Library,
    /// Mentoring hour; a single period per week.
    Mentoring,
}

/// One weekly teaching demand: teacher × class × subject × periods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Unique assignment identifier.
    pub id: String,
    /// Teacher delivering the subject.
    pub teacher_id: String,
    /// Class group receiving the subject.
    pub class_id: String,
    /// Subject name as it appears in the timetable.
    pub subject: String,
    /// Scheduling category. Rows with no category default to theory.
    #[serde(default)]
    pub category: Category,
    /// Requested periods per week.
    pub periods_per_week: u32,
}

impl Assignment {
    /// Creates a theory assignment of one period per week.
    pub fn new(
        id: impl Into<String>,
        teacher_id: impl Into<String>,
        class_id: impl Into<String>,
        subject: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            teacher_id: teacher_id.into(),
            class_id: class_id.into(),
            subject: subject.into(),
            category: Category::Theory,
            periods_per_week: 1,
        }
    }

    /// Sets the scheduling category.
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Sets the requested periods per week.
    pub fn with_periods_per_week(mut self, periods: u32) -> Self {
        self.periods_per_week = periods;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assignment_builder() {
        let a = Assignment::new("a1", "t1", "c1", "DBMS")
            .with_category(Category::Lab)
            .with_periods_per_week(4);
        assert_eq!(a.id, "a1");
        assert_eq!(a.teacher_id, "t1");
        assert_eq!(a.class_id, "c1");
        assert_eq!(a.subject, "DBMS");
        assert_eq!(a.category, Category::Lab);
        assert_eq!(a.periods_per_week, 4);
    }

    #[test]
    fn test_category_defaults_to_theory() {
        // Rows from older exports carry no category field.
        let a: Assignment = serde_json::from_str(
            r#"{"id":"a1","teacher_id":"t1","class_id":"c1","subject":"OS","periods_per_week":3}"#,
        )
        .unwrap();
        assert_eq!(a.category, Category::Theory);
    }

    #[test]
    fn test_serde_round_trip() {
        let a = Assignment::new("a2", "t1", "c1", "TP").with_periods_per_week(5);
        let json = serde_json::to_string(&a).unwrap();
        let back: Assignment = serde_json::from_str(&json).unwrap();
        assert_eq!(back, a);
    }
}
