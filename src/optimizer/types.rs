//! The optimizer contract and its shared bookkeeping types.

use crate::problem::{KnapsackProblem, Score, Solution};

/// Best solution observed by an engine so far.
///
/// Starts at "none found" with value `f64::NEG_INFINITY` and only moves
/// on strict improvement, so ties keep the earlier solution.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BestRecord {
    /// The best solution, `None` until a first candidate is scored.
    pub solution: Option<Solution>,
    /// Its evaluated value, `f64::NEG_INFINITY` until then.
    pub value: f64,
}

impl Default for BestRecord {
    fn default() -> Self {
        Self {
            solution: None,
            value: f64::NEG_INFINITY,
        }
    }
}

/// Best-found tracking plus the iteration history, embedded by every
/// engine.
///
/// Engines report every scored candidate through [`observe`](Self::observe);
/// the provided [`Optimizer::run`] appends one history snapshot per
/// completed `step()`.
#[derive(Debug, Clone, Default)]
pub struct Progress {
    best: BestRecord,
    history: Vec<f64>,
}

impl Progress {
    /// Records a candidate, updating the best record on strict improvement.
    ///
    /// Returns `true` when the candidate became the new best.
    pub fn observe(&mut self, solution: &Solution, value: f64) -> bool {
        if value > self.best.value {
            self.best.solution = Some(solution.clone());
            self.best.value = value;
            true
        } else {
            false
        }
    }

    /// Appends the current best value to the history. Called once per
    /// completed iteration.
    pub fn record_iteration(&mut self) {
        self.history.push(self.best.value);
    }

    /// Clears both the best record and the history, returning to the
    /// freshly-constructed state. Called from `initialize()`.
    pub fn reset(&mut self) {
        self.best = BestRecord::default();
        self.history.clear();
    }

    /// The best record so far.
    pub fn best(&self) -> &BestRecord {
        &self.best
    }

    /// Best-value snapshots, one per completed iteration.
    pub fn history(&self) -> &[f64] {
        &self.history
    }
}

/// Outcome of [`Optimizer::run`].
///
/// `history` has exactly one entry per iteration and is non-decreasing,
/// since it snapshots the best-so-far value. If no candidate was ever
/// scored (zero iterations on the constructive ant engine), `best` is
/// the all-zero selection and `best_value` stays `f64::NEG_INFINITY`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunResult {
    /// Best solution found across the whole run.
    pub best: Solution,
    /// Evaluated value of `best`.
    pub best_value: f64,
    /// Best value after each completed iteration; length equals the
    /// `max_iterations` passed to `run`.
    pub history: Vec<f64>,
}

/// Common lifecycle implemented by every engine.
///
/// The state machine is `Uninitialized → Initialized → Iterating →
/// Terminated`: construction leaves the engine uninitialized,
/// [`initialize`](Self::initialize) builds the starting population state,
/// each [`step`](Self::step) advances it one generation, and
/// [`run`](Self::run) drives the whole sequence. There is no cancellation
/// or convergence-based early exit; the iteration bound is the only
/// stopping control.
///
/// The trait is object-safe (engines hold their own seeded RNG rather
/// than taking one per call), so the registry can hand out
/// `Box<dyn Optimizer>`.
pub trait Optimizer {
    /// The problem instance this engine searches.
    fn problem(&self) -> &KnapsackProblem;

    /// Shared best/history bookkeeping.
    fn progress(&self) -> &Progress;

    /// Mutable access for the provided `run` loop.
    fn progress_mut(&mut self) -> &mut Progress;

    /// Builds the starting population state, evaluates it, and seeds the
    /// best record from it. Also resets the history, so an engine can be
    /// re-run from scratch.
    fn initialize(&mut self);

    /// Advances the population state by exactly one generation/iteration,
    /// updating the best record on strict improvement.
    ///
    /// Requires a prior [`initialize`](Self::initialize).
    fn step(&mut self);

    /// Scores a solution against the problem. Pass-through to
    /// [`KnapsackProblem::evaluate`].
    fn evaluate(&self, solution: &Solution) -> Score {
        self.problem().evaluate(solution)
    }

    /// Restores feasibility in place. Pass-through to
    /// [`KnapsackProblem::repair`].
    fn repair(&self, solution: &mut Solution) {
        self.problem().repair(solution);
    }

    /// Best value observed so far (`f64::NEG_INFINITY` before any
    /// candidate is scored).
    fn best_value(&self) -> f64 {
        self.progress().best().value
    }

    /// Best solution observed so far.
    fn best_solution(&self) -> Option<&Solution> {
        self.progress().best().solution.as_ref()
    }

    /// Initializes, then steps exactly `max_iterations` times, recording
    /// the best value after each step.
    ///
    /// `max_iterations == 0` yields an empty history and the initialized
    /// best.
    fn run(&mut self, max_iterations: usize) -> RunResult {
        self.initialize();
        for _ in 0..max_iterations {
            self.step();
            self.progress_mut().record_iteration();
        }

        let n = self.problem().n_items();
        let record = self.progress().best();
        RunResult {
            best: record.solution.clone().unwrap_or_else(|| vec![false; n]),
            best_value: record.value,
            history: self.progress().history().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::KnapsackProblem;
    use std::sync::Arc;

    fn problem() -> Arc<KnapsackProblem> {
        Arc::new(
            KnapsackProblem::new(vec![2.0, 3.0, 4.0, 5.0], vec![3.0, 4.0, 5.0, 6.0], 5.0)
                .unwrap(),
        )
    }

    /// Minimal engine: every step scores one more item prefix.
    struct PrefixEngine {
        problem: Arc<KnapsackProblem>,
        progress: Progress,
        next: usize,
    }

    impl Optimizer for PrefixEngine {
        fn problem(&self) -> &KnapsackProblem {
            &self.problem
        }
        fn progress(&self) -> &Progress {
            &self.progress
        }
        fn progress_mut(&mut self) -> &mut Progress {
            &mut self.progress
        }
        fn initialize(&mut self) {
            self.progress.reset();
            self.next = 0;
            let empty = vec![false; self.problem.n_items()];
            let value = self.evaluate(&empty).value;
            self.progress.observe(&empty, value);
        }
        fn step(&mut self) {
            let n = self.problem.n_items();
            let mut candidate: Solution = (0..n).map(|i| i <= self.next % n).collect();
            self.repair(&mut candidate);
            let value = self.evaluate(&candidate).value;
            self.progress.observe(&candidate, value);
            self.next += 1;
        }
    }

    fn engine() -> PrefixEngine {
        PrefixEngine {
            problem: problem(),
            progress: Progress::default(),
            next: 0,
        }
    }

    #[test]
    fn test_best_record_starts_empty() {
        let record = BestRecord::default();
        assert!(record.solution.is_none());
        assert_eq!(record.value, f64::NEG_INFINITY);
    }

    #[test]
    fn test_observe_requires_strict_improvement() {
        let mut progress = Progress::default();
        let a = vec![true, false];
        let b = vec![false, true];

        assert!(progress.observe(&a, 5.0));
        assert!(!progress.observe(&b, 5.0), "tie must keep the earlier solution");
        assert_eq!(progress.best().solution.as_ref(), Some(&a));
        assert!(progress.observe(&b, 6.0));
        assert_eq!(progress.best().solution.as_ref(), Some(&b));
    }

    #[test]
    fn test_run_history_length() {
        let result = engine().run(10);
        assert_eq!(result.history.len(), 10);
    }

    #[test]
    fn test_run_zero_iterations() {
        let result = engine().run(0);
        assert!(result.history.is_empty());
        // Initialization scored the empty selection.
        assert_eq!(result.best_value, 0.0);
    }

    #[test]
    fn test_run_history_non_decreasing() {
        let result = engine().run(20);
        for window in result.history.windows(2) {
            assert!(window[1] >= window[0]);
        }
    }

    #[test]
    fn test_run_reinitializes() {
        let mut e = engine();
        let first = e.run(8);
        let second = e.run(8);
        assert_eq!(second.history.len(), 8);
        assert_eq!(first.history.len(), 8);
    }

    #[test]
    fn test_run_best_is_valid() {
        let mut e = engine();
        let result = e.run(12);
        assert!(e.problem.is_valid(&result.best));
    }
}
