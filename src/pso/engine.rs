//! Swarm update loop.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::PsoConfig;
use crate::optimizer::{Optimizer, Progress};
use crate::problem::{KnapsackProblem, Solution};

/// One member of the swarm.
#[derive(Debug, Clone)]
struct Particle {
    position: Solution,
    velocity: Vec<f64>,
    best: Solution,
    best_value: f64,
}

/// Binary particle swarm engine.
///
/// The shared best record doubles as the swarm's global best: it is
/// updated in place as particles are processed, so later particles in
/// the same step are already pulled toward improvements found by earlier
/// ones.
///
/// Positions are binary; the velocity update treats them as 0/1 reals
/// and the new position re-samples every bit with probability
/// `sigmoid(velocity)`.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use knapsack_metaheur::pso::{PsoConfig, PsoEngine};
/// use knapsack_metaheur::optimizer::Optimizer;
/// use knapsack_metaheur::problem::KnapsackProblem;
///
/// let problem = Arc::new(KnapsackProblem::new(
///     vec![2.0, 3.0, 4.0, 5.0],
///     vec![3.0, 4.0, 5.0, 6.0],
///     5.0,
/// ).unwrap());
///
/// let mut engine = PsoEngine::new(problem, PsoConfig::default().with_seed(42));
/// let result = engine.run(50);
/// assert!(result.best_value >= 6.3);
/// ```
pub struct PsoEngine {
    problem: Arc<KnapsackProblem>,
    config: PsoConfig,
    rng: StdRng,
    particles: Vec<Particle>,
    progress: Progress,
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn bit(selected: bool) -> f64 {
    if selected {
        1.0
    } else {
        0.0
    }
}

impl PsoEngine {
    /// Creates an engine for `problem`.
    ///
    /// # Panics
    /// Panics if the configuration is invalid (call [`PsoConfig::validate`]
    /// first to get a descriptive error).
    pub fn new(problem: Arc<KnapsackProblem>, config: PsoConfig) -> Self {
        config.validate().expect("invalid PsoConfig");

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            problem,
            config,
            rng,
            particles: Vec::new(),
            progress: Progress::default(),
        }
    }
}

impl Optimizer for PsoEngine {
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
        self.particles.clear();
        for _ in 0..self.config.n_particles {
            let mut position: Solution = (0..n).map(|_| self.rng.random_bool(0.5)).collect();
            self.problem.repair(&mut position);
            let velocity: Vec<f64> = (0..n).map(|_| self.rng.random_range(-1.0..1.0)).collect();
            let value = self.problem.evaluate(&position).value;

            self.particles.push(Particle {
                best: position.clone(),
                best_value: value,
                position,
                velocity,
            });
        }

        // Global best = best personal best.
        for particle in &self.particles {
            self.progress.observe(&particle.best, particle.best_value);
        }
    }

    fn step(&mut self) {
        assert!(
            !self.particles.is_empty(),
            "initialize must be called before step"
        );

        let w = self.config.inertia;
        let c1 = self.config.cognitive;
        let c2 = self.config.social;

        for i in 0..self.particles.len() {
            let r1: f64 = self.rng.random_range(0.0..1.0);
            let r2: f64 = self.rng.random_range(0.0..1.0);
            // Snapshot of the current global best; earlier particles in
            // this same step may already have moved it.
            let global_best = self
                .progress
                .best()
                .solution
                .clone()
                .expect("global best set by initialize");

            let particle = &mut self.particles[i];
            for d in 0..particle.velocity.len() {
                let position = bit(particle.position[d]);
                let cognitive = c1 * r1 * (bit(particle.best[d]) - position);
                let social = c2 * r2 * (bit(global_best[d]) - position);
                let velocity = w * particle.velocity[d] + cognitive + social;
                particle.velocity[d] = velocity;

                particle.position[d] = self.rng.random_range(0.0..1.0) < sigmoid(velocity);
            }

            self.problem.repair(&mut particle.position);
            let value = self.problem.evaluate(&particle.position).value;

            if value > particle.best_value {
                particle.best = particle.position.clone();
                particle.best_value = value;
                // A new personal best is the only way to beat the swarm
                // best.
                self.progress.observe(&particle.best, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple_problem() -> Arc<KnapsackProblem> {
        Arc::new(
            KnapsackProblem::new(vec![2.0, 3.0, 4.0, 5.0], vec![3.0, 4.0, 5.0, 6.0], 5.0)
                .unwrap(),
        )
    }

    fn medium_problem() -> Arc<KnapsackProblem> {
        Arc::new(
            KnapsackProblem::new(
                (1..=10).map(|i| (i * 10) as f64).collect(),
                (1..=10).map(|i| (i * 10 + 10) as f64).collect(),
                200.0,
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_sigmoid_range() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-12);
        assert!(sigmoid(10.0) > 0.999);
        assert!(sigmoid(-10.0) < 0.001);
    }

    #[test]
    fn test_simple_instance_convergence() {
        let problem = simple_problem();
        let optimum = problem.best_possible_value();
        let mut engine = PsoEngine::new(problem.clone(), PsoConfig::default().with_seed(42));

        let result = engine.run(50);

        assert!(problem.is_valid(&result.best));
        assert!(
            result.best_value >= 0.9 * optimum,
            "expected >= {}, got {}",
            0.9 * optimum,
            result.best_value
        );
    }

    #[test]
    fn test_medium_instance_convergence() {
        let problem = medium_problem();
        let optimum = problem.best_possible_value();
        let mut engine = PsoEngine::new(problem.clone(), PsoConfig::default().with_seed(42));

        let result = engine.run(100);

        assert!(problem.is_valid(&result.best));
        assert!(
            result.best_value >= 0.8 * optimum,
            "expected >= {}, got {}",
            0.8 * optimum,
            result.best_value
        );
    }

    #[test]
    fn test_personal_bests_never_regress() {
        let mut engine = PsoEngine::new(simple_problem(), PsoConfig::default().with_seed(8));

        engine.initialize();
        let mut previous: Vec<f64> = engine.particles.iter().map(|p| p.best_value).collect();
        for _ in 0..15 {
            engine.step();
            for (particle, &before) in engine.particles.iter().zip(previous.iter()) {
                assert!(particle.best_value >= before);
            }
            previous = engine.particles.iter().map(|p| p.best_value).collect();
        }
    }

    #[test]
    fn test_positions_stay_valid_after_step() {
        let problem = simple_problem();
        let mut engine = PsoEngine::new(problem.clone(), PsoConfig::default().with_seed(13));

        engine.initialize();
        for _ in 0..10 {
            engine.step();
            for particle in &engine.particles {
                assert!(problem.is_valid(&particle.position));
            }
            let best = engine.best_solution().expect("best set after initialize");
            assert!(problem.is_valid(best));
        }
    }

    #[test]
    fn test_history_is_monotone() {
        let mut engine = PsoEngine::new(simple_problem(), PsoConfig::default().with_seed(21));
        let result = engine.run(30);

        assert_eq!(result.history.len(), 30);
        for window in result.history.windows(2) {
            assert!(window[1] >= window[0]);
        }
    }

    #[test]
    fn test_zero_capacity_degenerates_gracefully() {
        let problem =
            Arc::new(KnapsackProblem::new(vec![2.0, 3.0], vec![3.0, 4.0], 0.0).unwrap());
        let mut engine = PsoEngine::new(problem, PsoConfig::default().with_seed(2));

        let result = engine.run(5);

        assert_eq!(result.best, vec![false, false]);
        assert_eq!(result.best_value, 0.0);
    }

    #[test]
    fn test_seed_reproducibility() {
        let problem = simple_problem();
        let run = |seed| {
            PsoEngine::new(problem.clone(), PsoConfig::default().with_seed(seed)).run(15)
        };
        let a = run(55);
        let b = run(55);
        assert_eq!(a.history, b.history);
        assert_eq!(a.best, b.best);
    }

    #[test]
    #[should_panic(expected = "initialize must be called before step")]
    fn test_step_before_initialize_panics() {
        let mut engine = PsoEngine::new(simple_problem(), PsoConfig::default().with_seed(1));
        engine.step();
    }
}
