//! Weekly timetable scheduling engine.
//!
//! Places recurring teaching periods (subject × teacher × class, with a
//! weekly period count) onto a fixed weekly grid of time slots. Hard
//! constraints: no double-booking of a teacher or a class, contiguous
//! multi-period blocks for lab-style subjects, and at most one occurrence
//! of a subject per class per day. Placement is best-effort: the engine
//! minimizes unplaced periods within a bounded trial budget, it does not
//! guarantee a maximum packing.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Teacher`, `ClassGroup`, `Assignment`,
//!   `WeekGrid`, `OccupancyTable`, `SubjectRequest`
//! - **`diagnostics`**: Pre-search feasibility checks (requested periods vs.
//!   available slots, dangling references)
//! - **`solver`**: Multi-class engine — unit expansion, seeded randomized
//!   greedy trials, best-of-N orchestration
//! - **`single`**: Single-class engine — per-subject partition rules and a
//!   constrained backtracking placer
//! - **`error`**: Crate-wide error type
//!
//! # Architecture
//!
//! Diagnostics gate the solvers: a structurally overloaded input is rejected
//! before any randomized search runs. The multi-class solver repeats
//! independent seeded trials and keeps the best result; trials are stateless
//! and fan out in parallel. The single-class solver enumerates legal
//! partitions of each subject's weekly periods and backtracks over the
//! day × period grid.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Brucker (2007), "Scheduling Algorithms"

pub mod diagnostics;
pub mod error;
pub mod models;
pub mod single;
pub mod solver;
