//! Single-class subject rows.
//!
//! Input to the single-class scheduler: one row per subject with its
//! category, staff label, and weekly period count. Categories carry
//! richer packing rules than the multi-class [`Category`](super::Category)
//! set (electives and projects must split 2+2, library and mentoring are
//! placed together as an adjacent pair).

use serde::{Deserialize, Serialize};

/// Subject category for single-class scheduling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubjectCategory {
    /// Laboratory work; needs at least 2 periods, prefers 2-period blocks.
    Laboratory,
    /// Open elective; exactly 4 periods, placed as 2+2.
    OpenElective,
    /// Library hour; paired with mentoring into one adjacent 2-period block.
    Library,
    /// Mentoring hour; paired with library into one adjacent 2-period block.
    Mentoring,
    /// A main (core) subject; at most 3 periods of it on any single day.
    MainSubject,
    /// A professional elective; same per-day cap as main subjects.
    ProfessionalElective,
    /// Project work; exactly 4 periods, placed as 2+2.
    Project,
    /// Anything else; schedules like a main subject without the per-day cap.
    Other,
}

/// One subject row for a single class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectRequest {
    /// Packing category.
    pub category: SubjectCategory,
    /// Subject name as it appears in the timetable.
    pub subject: String,
    /// Staff label shown next to the subject.
    pub staff: String,
    /// Requested periods per week.
    pub periods_per_week: u32,
}

impl SubjectRequest {
    /// Creates a subject row.
    pub fn new(
        category: SubjectCategory,
        subject: impl Into<String>,
        staff: impl Into<String>,
        periods_per_week: u32,
    ) -> Self {
        Self {
            category,
            subject: subject.into(),
            staff: staff.into(),
            periods_per_week,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_request() {
        let s = SubjectRequest::new(SubjectCategory::MainSubject, "Data Structures", "Prof. X", 6);
        assert_eq!(s.category, SubjectCategory::MainSubject);
        assert_eq!(s.subject, "Data Structures");
        assert_eq!(s.staff, "Prof. X");
        assert_eq!(s.periods_per_week, 6);
    }

    #[test]
    fn test_serde_round_trip() {
        let s = SubjectRequest::new(SubjectCategory::OpenElective, "IoT", "Prof. Y", 4);
        let json = serde_json::to_string(&s).unwrap();
        let back: SubjectRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
