//! GA configuration.

/// Configuration for the genetic engine.
///
/// # Defaults
///
/// ```
/// use knapsack_metaheur::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.mutation_rate, 0.1);
/// assert_eq!(config.elite_count, 10);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use knapsack_metaheur::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_mutation_rate(0.05)
///     .with_elite_count(20)
///     .with_seed(42);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of individuals in the population.
    ///
    /// Must be at least 3 so tournament selection can draw three distinct
    /// candidates.
    pub population_size: usize,

    /// Per-bit flip probability applied to every offspring (0.0–1.0).
    pub mutation_rate: f64,

    /// Number of top individuals copied unchanged into each next
    /// generation (0 ≤ elite_count ≤ population_size).
    pub elite_count: usize,

    /// Random seed for reproducibility. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            mutation_rate: 0.1,
            elite_count: 10,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the per-bit mutation probability, clamped to [0, 1].
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the elite count.
    pub fn with_elite_count(mut self, n: usize) -> Self {
        self.elite_count = n;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.population_size < 3 {
            return Err("population_size must be at least 3 for tournament selection".into());
        }
        if self.elite_count > self.population_size {
            return Err("elite_count cannot exceed population_size".into());
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err("mutation_rate must be within [0, 1]".into());
        }
        Ok(())
    }
}
