//! Shared optimizer lifecycle and the name-based engine registry.
//!
//! All four engines implement one contract, [`Optimizer`]:
//!
//! - `initialize()` builds the engine's starting population state and
//!   resets the best-found bookkeeping;
//! - `step()` advances the state by exactly one generation/iteration;
//! - `run(max_iterations)` chains both and returns a [`RunResult`] with
//!   the best solution, its value, and the per-iteration history of the
//!   best value so far.
//!
//! Best-found tracking and the iteration history are shared bookkeeping,
//! not per-engine logic: each engine embeds a [`Progress`] and reports
//! improvements through it.
//!
//! [`OptimizerRegistry`] maps short algorithm names ("GA", "ACO", "PSO",
//! "CS") to engine factories so an experiment driver can instantiate
//! engines generically.

mod registry;
mod types;

pub use registry::{OptimizerRegistry, RegistryError};
pub use types::{BestRecord, Optimizer, Progress, RunResult};
