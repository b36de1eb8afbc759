//! Engine error types.

use crate::diagnostics::DiagnosticsReport;

/// Errors surfaced by the scheduling engine.
///
/// Structural and configuration errors are fatal and reported before any
/// search runs. Partial placement in multi-class mode is not an error: the
/// solver degrades to a best-effort timetable plus an explicit list of
/// unplaced units.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// A class or teacher requests more weekly periods than the grid holds.
    #[error("schedule is structurally infeasible: {0}")]
    Overloaded(DiagnosticsReport),

    /// Single-class mode: the subject list as a whole exceeds the grid.
    #[error("requested {requested} periods per week but only {available} slots are available")]
    CapacityExceeded { requested: u32, available: u32 },

    /// Two classes or two teachers share an id.
    #[error("duplicate {entity} id '{id}'")]
    DuplicateId { entity: &'static str, id: String },

    /// An assignment references a teacher or class that does not exist.
    #[error("assignment '{assignment}' references unknown {entity} '{id}'")]
    UnknownReference {
        assignment: String,
        entity: &'static str,
        id: String,
    },

    /// A laboratory subject with fewer than 2 weekly periods.
    #[error("lab '{subject}' has {periods} periods per week; a lab needs at least 2")]
    LabTooShort { subject: String, periods: u32 },

    /// An open elective whose weekly periods cannot split into 2+2.
    #[error("open elective '{subject}' must be exactly 4 periods per week, placed as 2+2")]
    OpenElectiveNotTwoPlusTwo { subject: String, periods: u32 },

    /// A project whose weekly periods cannot split into 2+2.
    #[error("project '{subject}' must be exactly 4 periods per week, placed as 2+2")]
    ProjectNotTwoPlusTwo { subject: String, periods: u32 },

    /// Library without mentoring, or mentoring without library; the two are
    /// placed together as one adjacent pair and cannot stand alone.
    #[error("library and mentoring must both be present; they are placed together as an adjacent pair")]
    UnpairedLibraryMentoring,

    /// A library or mentoring row with a period count other than 1.
    #[error("'{subject}' has {periods} periods per week; library and mentoring take exactly 1 each, paired into a shared 2-period block")]
    PairedSubjectPeriods { subject: String, periods: u32 },

    /// Single-class mode exhausted every partition combination and ordering
    /// without finding a conflict-free placement.
    #[error("no feasible arrangement found for the given subjects and partition rules")]
    SearchExhausted,
}
