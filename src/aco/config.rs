//! Ant colony configuration.

/// Configuration for the ant colony engine.
///
/// # Defaults
///
/// ```
/// use knapsack_metaheur::aco::AcoConfig;
///
/// let config = AcoConfig::default();
/// assert_eq!(config.n_ants, 50);
/// assert_eq!(config.alpha, 1.0);
/// assert_eq!(config.beta, 2.0);
/// assert_eq!(config.rho, 0.1);
/// assert_eq!(config.q0, 0.9);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcoConfig {
    /// Number of ants, i.e. solutions constructed per iteration.
    pub n_ants: usize,

    /// Pheromone exponent α: weight of the learned trail in the
    /// desirability score.
    pub alpha: f64,

    /// Heuristic exponent β: weight of the static value/weight ratio.
    pub beta: f64,

    /// Evaporation rate ρ (0.0–1.0). Each iteration the trail is scaled
    /// by `1 - ρ` before deposits.
    pub rho: f64,

    /// Greedy-choice probability q0 (0.0–1.0). With probability q0 an ant
    /// takes the feasible item with the best score; otherwise it samples
    /// proportionally (pseudo-random proportional rule).
    pub q0: f64,

    /// Random seed for reproducibility. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            n_ants: 50,
            alpha: 1.0,
            beta: 2.0,
            rho: 0.1,
            q0: 0.9,
            seed: None,
        }
    }
}

impl AcoConfig {
    /// Sets the number of ants.
    pub fn with_n_ants(mut self, n: usize) -> Self {
        self.n_ants = n;
        self
    }

    /// Sets the pheromone exponent.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the heuristic exponent.
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Sets the evaporation rate, clamped to [0, 1].
    pub fn with_rho(mut self, rho: f64) -> Self {
        self.rho = rho.clamp(0.0, 1.0);
        self
    }

    /// Sets the greedy-choice probability, clamped to [0, 1].
    pub fn with_q0(mut self, q0: f64) -> Self {
        self.q0 = q0.clamp(0.0, 1.0);
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
        if self.n_ants == 0 {
            return Err("n_ants must be at least 1".into());
        }
        if !self.alpha.is_finite() || !self.beta.is_finite() {
            return Err("alpha and beta must be finite".into());
        }
        if !(0.0..=1.0).contains(&self.rho) {
            return Err("rho must be within [0, 1]".into());
        }
        if !(0.0..=1.0).contains(&self.q0) {
            return Err("q0 must be within [0, 1]".into());
        }
        Ok(())
    }
}
