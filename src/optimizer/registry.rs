//! Name-to-factory lookup for engines.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use super::types::Optimizer;
use crate::aco::{AcoConfig, AcoEngine};
use crate::cuckoo::{CuckooConfig, CuckooEngine};
use crate::ga::{GaConfig, GaEngine};
use crate::problem::KnapsackProblem;
use crate::pso::{PsoConfig, PsoEngine};

/// Errors raised by [`OptimizerRegistry`] lookups.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The requested algorithm name was never registered.
    #[error("algorithm '{0}' is not registered")]
    UnknownAlgorithm(String),
}

/// Factory producing a ready-to-run engine for a given problem and seed.
type EngineFactory =
    Box<dyn Fn(Arc<KnapsackProblem>, Option<u64>) -> Box<dyn Optimizer> + Send + Sync>;

/// Maps algorithm names to engine factories.
///
/// The registry is an explicit value, constructed once at the composition
/// root and passed to whatever needs generic instantiation; there is no
/// process-wide singleton. Conformance of registered factories is
/// enforced statically: a factory must return `Box<dyn Optimizer>`, so a
/// "constructor" producing anything else is a compile error rather than a
/// runtime type error.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use knapsack_metaheur::optimizer::{Optimizer, OptimizerRegistry};
/// use knapsack_metaheur::problem::KnapsackProblem;
///
/// let problem = Arc::new(KnapsackProblem::new(
///     vec![2.0, 3.0, 4.0, 5.0],
///     vec![3.0, 4.0, 5.0, 6.0],
///     5.0,
/// ).unwrap());
///
/// let registry = OptimizerRegistry::with_defaults();
/// let mut engine = registry.get("GA", problem, Some(42)).unwrap();
/// let result = engine.run(50);
/// assert_eq!(result.history.len(), 50);
/// ```
#[derive(Default)]
pub struct OptimizerRegistry {
    factories: HashMap<String, EngineFactory>,
}

impl OptimizerRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-populated with the four standard engines under
    /// their short names, each with its default configuration:
    ///
    /// | name  | engine                |
    /// |-------|-----------------------|
    /// | `GA`  | [`GaEngine`]          |
    /// | `ACO` | [`AcoEngine`]         |
    /// | `PSO` | [`PsoEngine`]         |
    /// | `CS`  | [`CuckooEngine`]      |
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("GA", |problem, seed| {
            let mut config = GaConfig::default();
            config.seed = seed;
            Box::new(GaEngine::new(problem, config))
        });
        registry.register("ACO", |problem, seed| {
            let mut config = AcoConfig::default();
            config.seed = seed;
            Box::new(AcoEngine::new(problem, config))
        });
        registry.register("PSO", |problem, seed| {
            let mut config = PsoConfig::default();
            config.seed = seed;
            Box::new(PsoEngine::new(problem, config))
        });
        registry.register("CS", |problem, seed| {
            let mut config = CuckooConfig::default();
            config.seed = seed;
            Box::new(CuckooEngine::new(problem, config))
        });
        registry
    }

    /// Registers (or replaces) a factory under `name`.
    ///
    /// Custom configurations are captured by the closure:
    ///
    /// ```
    /// use knapsack_metaheur::ga::{GaConfig, GaEngine};
    /// use knapsack_metaheur::optimizer::OptimizerRegistry;
    ///
    /// let mut registry = OptimizerRegistry::new();
    /// registry.register("GA-small", |problem, seed| {
    ///     let mut config = GaConfig::default().with_population_size(20);
    ///     config.seed = seed;
    ///     Box::new(GaEngine::new(problem, config))
    /// });
    /// ```
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(Arc<KnapsackProblem>, Option<u64>) -> Box<dyn Optimizer> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Box::new(factory));
    }

    /// Instantiates the engine registered under `name` for `problem`.
    ///
    /// `seed` feeds the engine's own RNG for reproducible runs; `None`
    /// seeds from the OS.
    pub fn get(
        &self,
        name: &str,
        problem: Arc<KnapsackProblem>,
        seed: Option<u64>,
    ) -> Result<Box<dyn Optimizer>, RegistryError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| RegistryError::UnknownAlgorithm(name.to_string()))?;
        Ok(factory(problem, seed))
    }

    /// Registered names, in no particular order.
    pub fn list(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }
}
