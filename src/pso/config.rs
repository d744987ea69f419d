//! PSO configuration.

/// Configuration for the particle swarm engine.
///
/// # Defaults
///
/// ```
/// use knapsack_metaheur::pso::PsoConfig;
///
/// let config = PsoConfig::default();
/// assert_eq!(config.n_particles, 50);
/// assert_eq!(config.inertia, 0.7);
/// assert_eq!(config.cognitive, 1.5);
/// assert_eq!(config.social, 1.5);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PsoConfig {
    /// Number of particles in the swarm.
    pub n_particles: usize,

    /// Inertia weight w: how much of the previous velocity survives.
    pub inertia: f64,

    /// Cognitive coefficient c1: pull toward the particle's personal best.
    pub cognitive: f64,

    /// Social coefficient c2: pull toward the swarm's global best.
    pub social: f64,

    /// Random seed for reproducibility. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for PsoConfig {
    fn default() -> Self {
        Self {
            n_particles: 50,
            inertia: 0.7,
            cognitive: 1.5,
            social: 1.5,
            seed: None,
        }
    }
}

impl PsoConfig {
    /// Sets the number of particles.
    pub fn with_n_particles(mut self, n: usize) -> Self {
        self.n_particles = n;
        self
    }

    /// Sets the inertia weight.
    pub fn with_inertia(mut self, w: f64) -> Self {
        self.inertia = w;
        self
    }

    /// Sets the cognitive coefficient.
    pub fn with_cognitive(mut self, c1: f64) -> Self {
        self.cognitive = c1;
        self
    }

    /// Sets the social coefficient.
    pub fn with_social(mut self, c2: f64) -> Self {
        self.social = c2;
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
        if self.n_particles == 0 {
            return Err("n_particles must be at least 1".into());
        }
        if !self.inertia.is_finite() {
            return Err("inertia must be finite".into());
        }
        if !self.cognitive.is_finite() || !self.social.is_finite() {
            return Err("cognitive and social coefficients must be finite".into());
        }
        Ok(())
    }
}
