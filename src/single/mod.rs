//! Single-class scheduling engine.
//!
//! Richer per-subject packing rules than the multi-class solver: weekly
//! period counts split into legal sub-block partitions per category, and a
//! constrained backtracking search places every sub-block onto one class's
//! day × period grid.

mod block;
mod partition;
mod placer;

pub use block::{build_blocks, BlockKind, SubjectBlock};
pub use partition::{partition_combinations, partitions_for, MAX_PARTITION_COMBINATIONS};
pub use placer::{BlockInstance, ClassSchedule, ClassScheduler};
