//! Generational evolution loop.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};

use super::config::GaConfig;
use crate::optimizer::{Optimizer, Progress};
use crate::problem::{KnapsackProblem, Solution};

/// Genetic engine over binary knapsack selections.
///
/// Each generation copies the `elite_count` fittest individuals unchanged,
/// then fills the remaining slots two offspring at a time: two parents via
/// 3-candidate tournament, single-point crossover, independent per-bit
/// mutation, and greedy repair.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use knapsack_metaheur::ga::{GaConfig, GaEngine};
/// use knapsack_metaheur::optimizer::Optimizer;
/// use knapsack_metaheur::problem::KnapsackProblem;
///
/// let problem = Arc::new(KnapsackProblem::new(
///     vec![2.0, 3.0, 4.0, 5.0],
///     vec![3.0, 4.0, 5.0, 6.0],
///     5.0,
/// ).unwrap());
///
/// let mut engine = GaEngine::new(problem, GaConfig::default().with_seed(42));
/// let result = engine.run(50);
/// assert!(result.best_value >= 6.3);
/// ```
pub struct GaEngine {
    problem: Arc<KnapsackProblem>,
    config: GaConfig,
    rng: StdRng,
    population: Vec<Solution>,
    fitness: Vec<f64>,
    progress: Progress,
}

impl GaEngine {
    /// Creates an engine for `problem`.
    ///
    /// # Panics
    /// Panics if the configuration is invalid (call [`GaConfig::validate`]
    /// first to get a descriptive error).
    pub fn new(problem: Arc<KnapsackProblem>, config: GaConfig) -> Self {
        config.validate().expect("invalid GaConfig");

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            problem,
            config,
            rng,
            population: Vec::new(),
            fitness: Vec::new(),
            progress: Progress::default(),
        }
    }

    /// 3-candidate tournament: draw three distinct indices, keep the
    /// fittest (first wins ties).
    fn tournament(&mut self) -> usize {
        let candidates = index::sample(&mut self.rng, self.population.len(), 3);
        let mut winner = candidates.index(0);
        for k in 1..candidates.len() {
            let idx = candidates.index(k);
            if self.fitness[idx] > self.fitness[winner] {
                winner = idx;
            }
        }
        winner
    }

    /// Single-point crossover with a cut uniform in [1, n-1].
    ///
    /// With fewer than two items no interior cut exists and the children
    /// are parent clones.
    fn crossover(&mut self, p1: usize, p2: usize) -> (Solution, Solution) {
        let n = self.problem.n_items();
        let mut c1 = self.population[p1].clone();
        let mut c2 = self.population[p2].clone();
        if n >= 2 {
            let cut = self.rng.random_range(1..n);
            for i in cut..n {
                c1[i] = self.population[p2][i];
                c2[i] = self.population[p1][i];
            }
        }
        (c1, c2)
    }

    /// Independent per-bit flip with probability `mutation_rate`.
    fn mutate(&mut self, solution: &mut Solution) {
        for bit in solution.iter_mut() {
            if self.rng.random_range(0.0..1.0) < self.config.mutation_rate {
                *bit = !*bit;
            }
        }
    }

    fn evaluate_population(&mut self) {
        self.fitness = self
            .population
            .iter()
            .map(|s| self.problem.evaluate(s).value)
            .collect();
    }

    fn observe_population(&mut self) {
        for (solution, &value) in self.population.iter().zip(self.fitness.iter()) {
            self.progress.observe(solution, value);
        }
    }
}

impl Optimizer for GaEngine {
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

        let n = self.problem.n_items();
        let mut population = Vec::with_capacity(self.config.population_size);
        for _ in 0..self.config.population_size {
            let mut solution: Solution = (0..n).map(|_| self.rng.random_bool(0.5)).collect();
            self.problem.repair(&mut solution);
            population.push(solution);
        }
        self.population = population;

        self.evaluate_population();
        self.observe_population();
    }

    fn step(&mut self) {
        assert!(
            !self.population.is_empty(),
            "initialize must be called before step"
        );

        let pop_size = self.config.population_size;

        // Elites first; stable sort keeps original order on ties.
        let mut order: Vec<usize> = (0..self.population.len()).collect();
        order.sort_by(|&a, &b| {
            self.fitness[b]
                .partial_cmp(&self.fitness[a])
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let mut next_gen: Vec<Solution> = order
            .iter()
            .take(self.config.elite_count)
            .map(|&i| self.population[i].clone())
            .collect();

        while next_gen.len() < pop_size {
            let p1 = self.tournament();
            let p2 = self.tournament();

            let (mut c1, mut c2) = self.crossover(p1, p2);

            self.mutate(&mut c1);
            self.mutate(&mut c2);

            self.problem.repair(&mut c1);
            self.problem.repair(&mut c2);

            next_gen.push(c1);
            next_gen.push(c2);
        }
        // Offspring arrive in pairs, so an odd number of open slots
        // overflows by one.
        next_gen.truncate(pop_size);

        self.population = next_gen;
        self.evaluate_population();
        self.observe_population();
    }
}
