//! Sweep configuration.

use crate::error::{ParetoError, Result};
use crate::front::DEFAULT_FRONT_SIZE;
use crate::scalarize::{EpsilonHandling, Method, ObjectiveBounds};
use crate::vns::VnsConfig;

/// Configuration of one method's parameter sweep.
///
/// # Examples
///
/// ```
/// use u_pareto::scalarize::{Method, ObjectiveBounds};
/// use u_pareto::sweep::SweepConfig;
///
/// let config = SweepConfig::new(Method::WeightedSum, ObjectiveBounds::new(10.0, 100.0, 1.0, 3.0))
///     .with_grid_points(5)
///     .with_repetitions(2)
///     .with_base_seed(7);
/// assert_eq!(config.grid_points, 5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SweepConfig {
    /// Scalarization method swept.
    pub method: Method,
    /// Number of uniformly spaced parameter values.
    pub grid_points: usize,
    /// Independent runs per parameter value.
    pub repetitions: usize,
    /// Objective ranges from the mono-objective phase.
    pub bounds: ObjectiveBounds,
    /// Engine configuration shared by every run; its seed is replaced per
    /// run.
    pub vns: VnsConfig,
    /// Seed from which every run's seed is derived.
    pub base_seed: u64,
    /// Target size of the published front.
    pub front_size: usize,
    /// Pad a short front from rank 1.
    pub backfill: bool,
    /// Execute runs on the rayon pool (requires the `parallel` feature).
    pub parallel: bool,
    /// Handling of epsilon-bound violations.
    pub epsilon_handling: EpsilonHandling,
}

impl SweepConfig {
    pub fn new(method: Method, bounds: ObjectiveBounds) -> Self {
        Self {
            method,
            grid_points: 20,
            repetitions: 5,
            bounds,
            vns: VnsConfig::default(),
            base_seed: 42,
            front_size: DEFAULT_FRONT_SIZE,
            backfill: false,
            parallel: true,
            epsilon_handling: EpsilonHandling::default(),
        }
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn with_grid_points(mut self, n: usize) -> Self {
        self.grid_points = n;
        self
    }

    pub fn with_repetitions(mut self, n: usize) -> Self {
        self.repetitions = n;
        self
    }

    pub fn with_bounds(mut self, bounds: ObjectiveBounds) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_vns(mut self, vns: VnsConfig) -> Self {
        self.vns = vns;
        self
    }

    pub fn with_base_seed(mut self, seed: u64) -> Self {
        self.base_seed = seed;
        self
    }

    pub fn with_front_size(mut self, n: usize) -> Self {
        self.front_size = n;
        self
    }

    pub fn with_backfill(mut self, backfill: bool) -> Self {
        self.backfill = backfill;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_epsilon_handling(mut self, handling: EpsilonHandling) -> Self {
        self.epsilon_handling = handling;
        self
    }

    /// Total number of engine runs.
    pub fn run_count(&self) -> usize {
        self.grid_points * self.repetitions
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ParetoError::InvalidConfiguration`] for zero counts, a
    /// front target below 2, malformed bounds, an invalid engine config,
    /// or a negative penalty weight.
    pub fn validate(&self) -> Result<()> {
        if self.grid_points == 0 {
            return Err(ParetoError::config("grid_points must be at least 1"));
        }
        if self.repetitions == 0 {
            return Err(ParetoError::config("repetitions must be at least 1"));
        }
        if self.front_size < 2 {
            return Err(ParetoError::config(format!(
                "front_size must be at least 2, got {}",
                self.front_size
            )));
        }
        self.epsilon_handling.validate()?;
        self.bounds.validate()?;
        self.vns.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SweepConfig {
        SweepConfig::new(
            Method::EpsilonConstraint,
            ObjectiveBounds::new(10.0, 100.0, 1.0, 3.0),
        )
    }

    #[test]
    fn test_defaults() {
        let c = config();
        assert_eq!(c.grid_points, 20);
        assert_eq!(c.repetitions, 5);
        assert_eq!(c.front_size, 20);
        assert_eq!(c.run_count(), 100);
        assert_eq!(c.vns.max_iterations, 300);
        assert_eq!(c.vns.max_no_improve, 20);
        assert!(c.parallel);
        assert!(!c.backfill);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_counts() {
        assert!(config().with_grid_points(0).validate().is_err());
        assert!(config().with_repetitions(0).validate().is_err());
        assert!(config().with_front_size(1).validate().is_err());
    }

    #[test]
    fn test_rejects_bad_bounds_and_penalty() {
        let inverted = config().with_bounds(ObjectiveBounds::new(100.0, 10.0, 1.0, 3.0));
        assert!(matches!(
            inverted.validate(),
            Err(ParetoError::InvalidConfiguration { .. })
        ));
        let penalty = config().with_epsilon_handling(EpsilonHandling::Penalty(-1.0));
        assert!(penalty.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_engine_config() {
        let c = config().with_vns(VnsConfig::default().with_max_iterations(0));
        assert!(c.validate().is_err());
    }
}
