//! Best-of-N trial orchestration.
//!
//! Runs up to N independent seeded trials and keeps the best result,
//! scored lexicographically: fewest unplaced units first, ties broken by
//! more placed slots. A perfect (zero-remaining) trial stops the search
//! early.
//!
//! Trials are stateless and independent, so they fan out across threads;
//! the only shared state is a cooperative stop flag and the final
//! best-result reduction. Cancellation is non-atomic: a perfect result
//! stops further trials from starting, while in-flight trials simply
//! finish and lose the reduction.

use log::{debug, info};
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use std::cmp::Reverse;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use crate::diagnostics::{diagnose, validate_references};
use crate::error::EngineError;
use crate::models::{Assignment, ClassGroup, OccupancyTable, Teacher, WeekGrid};
use crate::solver::trial::{run_trial, TrialOutcome};
use crate::solver::unit::PlacementUnit;

/// Default trial budget.
pub const DEFAULT_TRIALS: usize = 300;

/// Input container for multi-class scheduling.
#[derive(Debug, Clone)]
pub struct TimetableRequest {
    /// Available teachers.
    pub teachers: Vec<Teacher>,
    /// Class groups to schedule.
    pub classes: Vec<ClassGroup>,
    /// Weekly teaching demands.
    pub assignments: Vec<Assignment>,
    /// The weekly slot grid.
    pub grid: WeekGrid,
}

impl TimetableRequest {
    /// Creates a new request.
    pub fn new(
        teachers: Vec<Teacher>,
        classes: Vec<ClassGroup>,
        assignments: Vec<Assignment>,
        grid: WeekGrid,
    ) -> Self {
        Self {
            teachers,
            classes,
            assignments,
            grid,
        }
    }
}

/// Observability record for one solve run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveMeta {
    /// Trials actually executed (early exit may cut the budget short).
    pub trials_run: usize,
    /// Wall time spent running trials.
    pub elapsed: Duration,
    /// Unplaced units in the winning trial.
    pub best_remaining: usize,
    /// Occupied class-table slots in the winning trial.
    pub placed: usize,
}

/// A solved (possibly partial) multi-class timetable.
#[derive(Debug, Clone)]
pub struct TimetableSolution {
    /// Per-class slot rows.
    pub class_tables: OccupancyTable,
    /// Per-teacher slot rows.
    pub teacher_tables: OccupancyTable,
    /// Units the winning trial could not place.
    pub remaining: Vec<PlacementUnit>,
    /// Run statistics.
    pub meta: SolveMeta,
}

impl TimetableSolution {
    /// Whether every unit was placed.
    pub fn is_complete(&self) -> bool {
        self.remaining.is_empty()
    }
}

/// Lexicographic trial score: fewer unplaced wins, then more placed slots.
type Score = (usize, Reverse<usize>);

fn score(outcome: &TrialOutcome) -> Score {
    (outcome.remaining.len(), Reverse(outcome.placed_count()))
}

/// Best-of-N randomized scheduler.
///
/// Repeats independent greedy trials with derived seeds and returns the
/// best result found within the budget.
///
/// # Example
///
/// ```
/// use timetable_engine::models::{Assignment, ClassGroup, Teacher, WeekGrid};
/// use timetable_engine::solver::{BestOfScheduler, TimetableRequest};
///
/// let request = TimetableRequest::new(
///     vec![Teacher::new("t1").with_name("Alice")],
///     vec![ClassGroup::new("c1").with_name("CSE-1")],
///     vec![Assignment::new("a1", "t1", "c1", "DBMS").with_periods_per_week(5)],
///     WeekGrid::new(["Mon", "Tue", "Wed", "Thu", "Fri"], 6),
/// );
///
/// let solution = BestOfScheduler::new()
///     .with_trials(50)
///     .with_seed(1)
///     .solve(&request)
///     .unwrap();
/// assert!(solution.is_complete());
/// ```
#[derive(Debug, Clone)]
pub struct BestOfScheduler {
    trials: usize,
    seed: u64,
    parallel: bool,
}

impl BestOfScheduler {
    /// Creates a scheduler with the default budget, seed 0, parallel trials.
    pub fn new() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            seed: 0,
            parallel: true,
        }
    }

    /// Sets the trial budget.
    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    /// Sets the base seed. Trial `i` runs with `seed + i`, so a run is
    /// reproducible from the base seed alone.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Enables or disables parallel trial execution.
    ///
    /// Sequential runs keep the first best result on score ties and are
    /// fully deterministic given the base seed; parallel runs guarantee
    /// only the winning score.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Solves the request, returning the best timetable found.
    ///
    /// Fails fast without running any trial when references are invalid or
    /// diagnostics report an overloaded class or teacher.
    pub fn solve(&self, request: &TimetableRequest) -> Result<TimetableSolution, EngineError> {
        validate_references(&request.classes, &request.teachers, &request.assignments)?;

        let report = diagnose(
            &request.classes,
            &request.teachers,
            &request.assignments,
            request.grid.slot_count(),
        );
        if report.has_overload() {
            return Err(EngineError::Overloaded(report));
        }

        let trials = self.trials.max(1);
        info!(
            "scheduling {} assignments for {} classes / {} teachers over {} slots ({} trials)",
            request.assignments.len(),
            request.classes.len(),
            request.teachers.len(),
            request.grid.slot_count(),
            trials,
        );

        let started = Instant::now();
        let (best, trials_run) = if self.parallel {
            self.run_parallel(request, trials)
        } else {
            self.run_sequential(request, trials)
        };
        let elapsed = started.elapsed();

        // At least one trial always runs, so a best outcome always exists.
        let Some((_, outcome)) = best else {
            return Err(EngineError::SearchExhausted);
        };

        let meta = SolveMeta {
            trials_run,
            elapsed,
            best_remaining: outcome.remaining.len(),
            placed: outcome.placed_count(),
        };
        info!(
            "best trial: {} unplaced, {} placed slots after {} trials in {:.2?}",
            meta.best_remaining, meta.placed, meta.trials_run, meta.elapsed,
        );

        Ok(TimetableSolution {
            class_tables: outcome.class_tables,
            teacher_tables: outcome.teacher_tables,
            remaining: outcome.remaining,
            meta,
        })
    }

    fn run_sequential(
        &self,
        request: &TimetableRequest,
        trials: usize,
    ) -> (Option<(Score, TrialOutcome)>, usize) {
        let mut best: Option<(Score, TrialOutcome)> = None;
        let mut trials_run = 0;

        for i in 0..trials {
            let outcome = run_trial(
                &request.classes,
                &request.teachers,
                &request.assignments,
                &request.grid,
                self.seed.wrapping_add(i as u64),
            );
            trials_run += 1;

            let s = score(&outcome);
            if best.as_ref().is_none_or(|(b, _)| s < *b) {
                debug!("trial {i}: new best with {} unplaced", outcome.remaining.len());
                let perfect = outcome.is_complete();
                best = Some((s, outcome));
                if perfect {
                    break;
                }
            }
        }
        (best, trials_run)
    }

    fn run_parallel(
        &self,
        request: &TimetableRequest,
        trials: usize,
    ) -> (Option<(Score, TrialOutcome)>, usize) {
        let stop = AtomicBool::new(false);
        let trials_run = AtomicUsize::new(0);

        let best = (0..trials)
            .into_par_iter()
            .filter_map(|i| {
                // Cooperative early exit: skip trials not yet started once
                // a perfect result exists; in-flight trials run to the end.
                if stop.load(Ordering::Relaxed) {
                    return None;
                }
                trials_run.fetch_add(1, Ordering::Relaxed);
                let outcome = run_trial(
                    &request.classes,
                    &request.teachers,
                    &request.assignments,
                    &request.grid,
                    self.seed.wrapping_add(i as u64),
                );
                if outcome.is_complete() {
                    stop.store(true, Ordering::Relaxed);
                }
                Some((score(&outcome), outcome))
            })
            .reduce_with(|a, b| if b.0 < a.0 { b } else { a });

        (best, trials_run.into_inner())
    }
}

impl Default for BestOfScheduler {
    fn default() -> Self {
        Self::new()
    }
}
