//! Multi-class scheduling engine.
//!
//! Expands weekly assignments into atomic placement units, places them
//! with a randomized greedy pass, and repeats the pass as a best-of-N
//! search over independent seeds.

mod best_of;
mod trial;
mod unit;

pub use best_of::{
    BestOfScheduler, SolveMeta, TimetableRequest, TimetableSolution, DEFAULT_TRIALS,
};
pub use trial::{run_trial, TrialOutcome};
pub use unit::{expand_units, PlacementUnit, UnitKind};
