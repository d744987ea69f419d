//! Ant construction and pheromone update loop.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::AcoConfig;
use crate::optimizer::{Optimizer, Progress};
use crate::problem::{KnapsackProblem, Solution};

/// Ant colony engine.
///
/// Holds a pheromone weight per item (all ones at the start of a run) and
/// a static heuristic vector, the value/weight ratio normalized by its
/// maximum. Every iteration, each ant constructs one solution under the
/// pseudo-random proportional rule; afterwards the trail evaporates and
/// every ant with a positive value deposits `value / best_of_iteration`
/// onto its selected items. Not only the iteration winner deposits, which
/// trades faster reinforcement against diversity.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use knapsack_metaheur::aco::{AcoConfig, AcoEngine};
/// use knapsack_metaheur::optimizer::Optimizer;
/// use knapsack_metaheur::problem::KnapsackProblem;
///
/// let problem = Arc::new(KnapsackProblem::new(
///     vec![2.0, 3.0, 4.0, 5.0],
///     vec![3.0, 4.0, 5.0, 6.0],
///     5.0,
/// ).unwrap());
///
/// let mut engine = AcoEngine::new(problem, AcoConfig::default().with_seed(42));
/// let result = engine.run(50);
/// assert!(result.best_value >= 6.3);
/// ```
pub struct AcoEngine {
    problem: Arc<KnapsackProblem>,
    config: AcoConfig,
    rng: StdRng,
    pheromone: Vec<f64>,
    heuristic: Vec<f64>,
    progress: Progress,
}

impl AcoEngine {
    /// Creates an engine for `problem`.
    ///
    /// # Panics
    /// Panics if the configuration is invalid (call [`AcoConfig::validate`]
    /// first to get a descriptive error).
    pub fn new(problem: Arc<KnapsackProblem>, config: AcoConfig) -> Self {
        config.validate().expect("invalid AcoConfig");

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let n = problem.n_items();
        let max_ratio = problem
            .ratios()
            .iter()
            .cloned()
            .fold(f64::NEG_INFINITY, f64::max);
        let heuristic = problem.ratios().iter().map(|r| r / max_ratio).collect();

        Self {
            problem,
            config,
            rng,
            pheromone: vec![1.0; n],
            heuristic,
            progress: Progress::default(),
        }
    }

    /// One ant's construction: add feasible items until none fits.
    fn construct_solution(&mut self) -> Solution {
        let problem = Arc::clone(&self.problem);
        let weights = problem.weights();
        let n = problem.n_items();

        let mut solution = vec![false; n];
        let mut remaining = problem.capacity();

        // Desirability is fixed for the whole construction; the trail
        // only changes between iterations.
        let scores: Vec<f64> = (0..n)
            .map(|i| {
                self.pheromone[i].powf(self.config.alpha)
                    * self.heuristic[i].powf(self.config.beta)
            })
            .collect();

        loop {
            let feasible: Vec<usize> = (0..n)
                .filter(|&i| !solution[i] && weights[i] <= remaining)
                .collect();
            if feasible.is_empty() {
                break;
            }

            let item = if self.rng.random_range(0.0..1.0) < self.config.q0 {
                greedy_choice(&feasible, &scores)
            } else {
                roulette_choice(&feasible, &scores, &mut self.rng)
            };

            solution[item] = true;
            remaining -= weights[item];
        }

        solution
    }
}

/// Feasible item with the maximum score; the first wins ties.
fn greedy_choice(feasible: &[usize], scores: &[f64]) -> usize {
    let mut best = feasible[0];
    for &i in &feasible[1..] {
        if scores[i] > scores[best] {
            best = i;
        }
    }
    best
}

/// Score-proportional sample among the feasible items.
fn roulette_choice<R: Rng>(feasible: &[usize], scores: &[f64], rng: &mut R) -> usize {
    let total: f64 = feasible.iter().map(|&i| scores[i]).sum();
    if total <= 0.0 {
        // All scores underflowed; fall back to uniform.
        return feasible[rng.random_range(0..feasible.len())];
    }

    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for &i in feasible {
        cumulative += scores[i];
        if cumulative > threshold {
            return i;
        }
    }

    feasible[feasible.len() - 1] // floating-point fallback
}

impl Optimizer for AcoEngine {
    fn problem(&self) -> &KnapsackProblem {
        &self.problem
    }

    fn progress(&self) -> &Progress {
        &self.progress
    }

    fn progress_mut(&mut self) -> &mut Progress {
        &mut self.progress
    }

    /// Resets the trail to all ones and clears the best record. There is
    /// no initial population; the first candidates appear in the first
    /// [`step`](Optimizer::step).
    fn initialize(&mut self) {
        self.progress.reset();
        self.pheromone = vec![1.0; self.problem.n_items()];
    }

    fn step(&mut self) {
        let n_ants = self.config.n_ants;
        let mut solutions = Vec::with_capacity(n_ants);
        let mut values = Vec::with_capacity(n_ants);

        for _ in 0..n_ants {
            let solution = self.construct_solution();
            let value = self.problem.evaluate(&solution).value;
            self.progress.observe(&solution, value);
            solutions.push(solution);
            values.push(value);
        }

        // Evaporation.
        for trail in self.pheromone.iter_mut() {
            *trail *= 1.0 - self.config.rho;
        }

        // Deposit: every ant with a positive value reinforces its items,
        // scaled by the iteration's best value.
        let max_value = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        for (solution, &value) in solutions.iter().zip(values.iter()) {
            if value > 0.0 {
                let delta = value / max_value;
                for (trail, &selected) in self.pheromone.iter_mut().zip(solution.iter()) {
                    if selected {
                        *trail += delta;
                    }
                }
            }
        }
    }
}
