//! Lévy walk and nest replacement loop.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use super::config::CuckooConfig;
use crate::optimizer::{Optimizer, Progress};
use crate::problem::{KnapsackProblem, Solution};

/// Mantegna's scale σ for Lévy-stable step generation:
/// `(Γ(1+β)·sin(πβ/2) / (Γ((1+β)/2)·β·2^((β−1)/2)))^(1/β)`.
fn mantegna_sigma(beta: f64) -> f64 {
    let numerator = libm::tgamma(1.0 + beta) * (std::f64::consts::PI * beta / 2.0).sin();
    let denominator =
        libm::tgamma((1.0 + beta) / 2.0) * beta * 2.0_f64.powf((beta - 1.0) / 2.0);
    (numerator / denominator).powf(1.0 / beta)
}

/// Cuckoo search engine.
///
/// Every iteration walks each nest through a Lévy-flight bit flip: per
/// dimension the step is `u / |v|^(1/β)` with `u ~ N(0, σ)`,
/// `v ~ N(0, 1)`, and the bit flips where a uniform draw falls below the
/// absolute step. Improved candidates replace their nest greedily; then
/// the worst `floor(n_nests · pa)` nests are abandoned for fresh random
/// ones, even a nest improved moments earlier in the same iteration.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use knapsack_metaheur::cuckoo::{CuckooConfig, CuckooEngine};
/// use knapsack_metaheur::optimizer::Optimizer;
/// use knapsack_metaheur::problem::KnapsackProblem;
///
/// let problem = Arc::new(KnapsackProblem::new(
///     vec![2.0, 3.0, 4.0, 5.0],
///     vec![3.0, 4.0, 5.0, 6.0],
///     5.0,
/// ).unwrap());
///
/// let mut engine = CuckooEngine::new(problem, CuckooConfig::default().with_seed(42));
/// let result = engine.run(50);
/// assert!(result.best_value >= 6.3);
/// ```
pub struct CuckooEngine {
    problem: Arc<KnapsackProblem>,
    config: CuckooConfig,
    rng: StdRng,
    nests: Vec<Solution>,
    values: Vec<f64>,
    levy_u: Normal<f64>,
    levy_v: Normal<f64>,
    progress: Progress,
}

impl CuckooEngine {
    /// Creates an engine for `problem`.
    ///
    /// # Panics
    /// Panics if the configuration is invalid (call
    /// [`CuckooConfig::validate`] first to get a descriptive error).
    pub fn new(problem: Arc<KnapsackProblem>, config: CuckooConfig) -> Self {
        config.validate().expect("invalid CuckooConfig");

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let sigma = mantegna_sigma(config.levy_beta);
        let levy_u = Normal::new(0.0, sigma).expect("sigma is positive for levy_beta in (0, 2]");
        let levy_v = Normal::new(0.0, 1.0).expect("unit deviation is valid");

        Self {
            problem,
            config,
            rng,
            nests: Vec::new(),
            values: Vec::new(),
            levy_u,
            levy_v,
            progress: Progress::default(),
        }
    }

    /// One heavy-tailed step per dimension. A zero `v` draw yields an
    /// infinite step, which simply forces the flip below.
    fn levy_step(&mut self, n: usize) -> Vec<f64> {
        let inv_beta = 1.0 / self.config.levy_beta;
        (0..n)
            .map(|_| {
                let u = self.levy_u.sample(&mut self.rng);
                let v: f64 = self.levy_v.sample(&mut self.rng);
                u / v.abs().powf(inv_beta)
            })
            .collect()
    }

    fn random_nest(&mut self) -> Solution {
        let n = self.problem.n_items();
        let mut nest: Solution = (0..n).map(|_| self.rng.random_bool(0.5)).collect();
        self.problem.repair(&mut nest);
        nest
    }
}

impl Optimizer for CuckooEngine {
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

        self.nests.clear();
        self.values.clear();
        for _ in 0..self.config.n_nests {
            let nest = self.random_nest();
            let value = self.problem.evaluate(&nest).value;
            self.nests.push(nest);
            self.values.push(value);
        }

        for (nest, &value) in self.nests.iter().zip(self.values.iter()) {
            self.progress.observe(nest, value);
        }
    }

    fn step(&mut self) {
        assert!(
            !self.nests.is_empty(),
            "initialize must be called before step"
        );

        let n = self.problem.n_items();

        // Lévy walk: greedy elitist replacement per nest.
        for i in 0..self.nests.len() {
            let _partner = self.rng.random_range(0..self.nests.len());

            let step = self.levy_step(n);
            let mut candidate = self.nests[i].clone();
            for (bit, &s) in candidate.iter_mut().zip(step.iter()) {
                if self.rng.random_range(0.0..1.0) < s.abs() {
                    *bit = !*bit;
                }
            }

            self.problem.repair(&mut candidate);
            let value = self.problem.evaluate(&candidate).value;

            if value > self.values[i] {
                self.nests[i] = candidate;
                self.values[i] = value;
            }
        }

        // Abandon the worst floor(N·pa) nests, including nests the walk
        // just improved.
        let abandon_count = (self.nests.len() as f64 * self.config.pa) as usize;
        let mut order: Vec<usize> = (0..self.nests.len()).collect();
        order.sort_by(|&a, &b| {
            self.values[a]
                .partial_cmp(&self.values[b])
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        for k in 0..abandon_count {
            let i = order[k];
            let fresh = self.random_nest();
            self.values[i] = self.problem.evaluate(&fresh).value;
            self.nests[i] = fresh;
        }

        // Best record sees only the surviving nest set.
        for (nest, &value) in self.nests.iter().zip(self.values.iter()) {
            self.progress.observe(nest, value);
        }
    }
}
