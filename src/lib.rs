//! Bio-inspired metaheuristics for the 0/1 knapsack problem.
//!
//! Four independent population-based engines share one problem model and
//! one optimizer lifecycle:
//!
//! - **Genetic Algorithm (GA)**: generational evolution with elitism,
//!   tournament selection, single-point crossover, and bit-flip mutation.
//! - **Ant Colony Optimization (ACO)**: constructive search guided by a
//!   pheromone trail and a value/weight heuristic under the
//!   pseudo-random proportional rule.
//! - **Binary Particle Swarm (PSO)**: velocity-driven search with
//!   sigmoid binarization and personal/global bests.
//! - **Cuckoo Search (CS)**: Lévy-flight perturbation with greedy nest
//!   replacement and worst-fraction abandonment.
//!
//! # Architecture
//!
//! [`problem::KnapsackProblem`] holds the immutable instance data and the
//! shared evaluation, feasibility, and greedy-repair logic. Every engine
//! implements [`optimizer::Optimizer`]: `initialize()`, `step()`, and a
//! provided `run(max_iterations)` that tracks the best solution found and
//! a per-iteration history of the best value. Engines own their state and
//! their seeded RNG exclusively, so independent runs are reproducible and
//! trivially parallelizable at whole-run granularity.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use knapsack_metaheur::ga::{GaConfig, GaEngine};
//! use knapsack_metaheur::optimizer::Optimizer;
//! use knapsack_metaheur::problem::KnapsackProblem;
//!
//! let problem = Arc::new(KnapsackProblem::new(
//!     vec![2.0, 3.0, 4.0, 5.0],
//!     vec![3.0, 4.0, 5.0, 6.0],
//!     5.0,
//! )?);
//!
//! let mut engine = GaEngine::new(problem.clone(), GaConfig::default().with_seed(42));
//! let result = engine.run(100);
//!
//! assert!(problem.is_valid(&result.best));
//! assert_eq!(result.history.len(), 100);
//! # Ok::<(), knapsack_metaheur::problem::ProblemError>(())
//! ```
//!
//! Engines can also be instantiated by name through
//! [`optimizer::OptimizerRegistry`], the seam used by experiment drivers.

pub mod aco;
pub mod cuckoo;
pub mod ga;
pub mod optimizer;
pub mod problem;
pub mod pso;
