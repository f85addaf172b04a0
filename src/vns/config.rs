//! Variable Neighborhood Search configuration.

use crate::error::{ParetoError, Result};

/// Configuration parameters for Variable Neighborhood Search.
///
/// # Examples
///
/// ```
/// use u_pareto::vns::VnsConfig;
///
/// let config = VnsConfig::default()
///     .with_max_iterations(1000)
///     .with_max_no_improve(100);
/// assert_eq!(config.max_iterations, 1000);
/// assert_eq!(config.max_no_improve, 100);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VnsConfig {
    /// Maximum number of outer iterations (complete passes through
    /// all shake levels).
    pub max_iterations: usize,
    /// Consecutive outer iterations without a strict improvement of the
    /// best solution before stopping.
    pub max_no_improve: usize,
    /// Number of shake intensity levels (k_max).
    pub shake_levels: usize,
    /// Probability of accepting a trial that is not strictly worse than
    /// the current solution.
    pub plateau_acceptance: f64,
    /// Probability that a shake closes teams instead of shifting assets.
    pub consolidate_rate: f64,
    /// Probability that a shifted asset opens an unused base.
    pub activation_rate: f64,
    /// Cap on improving moves per local search.
    pub max_descent_steps: usize,
    /// Random seed (None for default seed).
    pub seed: Option<u64>,
}

impl Default for VnsConfig {
    fn default() -> Self {
        Self {
            max_iterations: 300,
            max_no_improve: 20,
            shake_levels: 3,
            plateau_acceptance: 0.05,
            consolidate_rate: 0.3,
            activation_rate: 0.1,
            max_descent_steps: 50,
            seed: None,
        }
    }
}

impl VnsConfig {
    /// Sets the maximum number of outer iterations.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the maximum iterations without improvement.
    pub fn with_max_no_improve(mut self, n: usize) -> Self {
        self.max_no_improve = n;
        self
    }

    pub fn with_shake_levels(mut self, levels: usize) -> Self {
        self.shake_levels = levels;
        self
    }

    pub fn with_plateau_acceptance(mut self, p: f64) -> Self {
        self.plateau_acceptance = p;
        self
    }

    pub fn with_consolidate_rate(mut self, p: f64) -> Self {
        self.consolidate_rate = p;
        self
    }

    pub fn with_activation_rate(mut self, p: f64) -> Self {
        self.activation_rate = p;
        self
    }

    pub fn with_max_descent_steps(mut self, n: usize) -> Self {
        self.max_descent_steps = n;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ParetoError::InvalidConfiguration`] if a budget is zero or
    /// a probability lies outside `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(ParetoError::config("max_iterations must be at least 1"));
        }
        if self.max_no_improve == 0 {
            return Err(ParetoError::config("max_no_improve must be at least 1"));
        }
        if self.shake_levels == 0 {
            return Err(ParetoError::config("shake_levels must be at least 1"));
        }
        for (name, p) in [
            ("plateau_acceptance", self.plateau_acceptance),
            ("consolidate_rate", self.consolidate_rate),
            ("activation_rate", self.activation_rate),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(ParetoError::config(format!(
                    "{name} must be in [0, 1], got {p}"
                )));
            }
        }
        Ok(())
    }
}
