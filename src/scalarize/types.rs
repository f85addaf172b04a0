//! Scalarization parameters, objective bounds, and evaluation records.

use std::fmt;

use crate::error::{ParetoError, Result};
use crate::model::{Instance, Objectives, Solution};

/// Tolerance used when comparing scalar fitness or violation values.
pub(crate) const TOLERANCE: f64 = 1e-12;

/// The two scalarization methods swept by the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Method {
    /// Min-max normalized weighted sum of f1 and f2.
    WeightedSum,
    /// Minimize f1 subject to f2 <= epsilon.
    EpsilonConstraint,
}

impl Method {
    /// Generates `points` uniformly spaced parameters for this method.
    ///
    /// Weights run from `(0, 1)` to `(1, 0)`; epsilons run from `f2_min` to
    /// `f2_max`. A single point yields the lower end of the range.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_pareto::scalarize::{Method, ObjectiveBounds, Scalarization};
    ///
    /// let bounds = ObjectiveBounds::new(10.0, 100.0, 1.0, 3.0);
    /// let grid = Method::EpsilonConstraint.grid(&bounds, 5);
    /// assert_eq!(grid.len(), 5);
    /// assert_eq!(grid[4], Scalarization::EpsilonConstraint { epsilon: 3.0 });
    /// ```
    pub fn grid(&self, bounds: &ObjectiveBounds, points: usize) -> Vec<Scalarization> {
        let denom = points.saturating_sub(1).max(1) as f64;
        (0..points)
            .map(|i| {
                let t = i as f64 / denom;
                match self {
                    Method::WeightedSum => Scalarization::WeightedSum {
                        w1: t,
                        w2: 1.0 - t,
                    },
                    Method::EpsilonConstraint => Scalarization::EpsilonConstraint {
                        epsilon: bounds.f2_min + t * (bounds.f2_max - bounds.f2_min),
                    },
                }
            })
            .collect()
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::WeightedSum => write!(f, "weighted-sum"),
            Method::EpsilonConstraint => write!(f, "epsilon-constraint"),
        }
    }
}

/// One scalarization parameter value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Scalarization {
    /// `w1 * f1' + w2 * f2'` over min-max normalized objectives.
    WeightedSum { w1: f64, w2: f64 },
    /// Minimize f1 with `f2 <= epsilon`.
    EpsilonConstraint { epsilon: f64 },
}

impl Scalarization {
    pub fn method(&self) -> Method {
        match self {
            Scalarization::WeightedSum { .. } => Method::WeightedSum,
            Scalarization::EpsilonConstraint { .. } => Method::EpsilonConstraint,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match *self {
            Scalarization::WeightedSum { w1, w2 } => {
                if !(0.0..=1.0).contains(&w1) || !(0.0..=1.0).contains(&w2) {
                    return Err(ParetoError::config(format!(
                        "weights must lie in [0, 1], got ({w1}, {w2})"
                    )));
                }
                if (w1 + w2 - 1.0).abs() > 1e-9 {
                    return Err(ParetoError::config(format!(
                        "weights must sum to 1, got {}",
                        w1 + w2
                    )));
                }
            }
            Scalarization::EpsilonConstraint { epsilon } => {
                if !epsilon.is_finite() {
                    return Err(ParetoError::config("epsilon must be finite"));
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Scalarization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalarization::WeightedSum { w1, w2 } => {
                write!(f, "weighted-sum (w1={w1:.3}, w2={w2:.3})")
            }
            Scalarization::EpsilonConstraint { epsilon } => {
                write!(f, "epsilon-constraint (epsilon={epsilon:.3})")
            }
        }
    }
}

/// Objective ranges used for normalization and the epsilon grid.
///
/// Usually obtained from a prior mono-objective phase (see
/// [`estimate_bounds`](crate::sweep::estimate_bounds)).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectiveBounds {
    pub f1_min: f64,
    pub f1_max: f64,
    pub f2_min: f64,
    pub f2_max: f64,
}

impl ObjectiveBounds {
    pub fn new(f1_min: f64, f1_max: f64, f2_min: f64, f2_max: f64) -> Self {
        Self {
            f1_min,
            f1_max,
            f2_min,
            f2_max,
        }
    }

    /// Rejects non-finite values and empty ranges.
    pub fn validate(&self) -> Result<()> {
        let values = [self.f1_min, self.f1_max, self.f2_min, self.f2_max];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ParetoError::config("objective bounds must be finite"));
        }
        if self.f1_max <= self.f1_min {
            return Err(ParetoError::config(format!(
                "f1_max ({}) must exceed f1_min ({})",
                self.f1_max, self.f1_min
            )));
        }
        if self.f2_max <= self.f2_min {
            return Err(ParetoError::config(format!(
                "f2_max ({}) must exceed f2_min ({})",
                self.f2_max, self.f2_min
            )));
        }
        Ok(())
    }

    /// Min-max scales both objectives to the bound ranges.
    pub fn normalize(&self, objectives: &Objectives) -> (f64, f64) {
        let scale = |v: f64, lo: f64, hi: f64| {
            if hi - lo > 1e-10 {
                (v - lo) / (hi - lo)
            } else {
                0.0
            }
        };
        (
            scale(objectives.f1, self.f1_min, self.f1_max),
            scale(objectives.f2 as f64, self.f2_min, self.f2_max),
        )
    }
}

/// How an epsilon-constraint violation is handled during the search.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EpsilonHandling {
    /// The squared excess joins the constraint violation, so the
    /// feasibility-first comparison rejects violating trials.
    #[default]
    Reject,
    /// `weight * excess` is added to the fitness, pushing the search back
    /// toward the bound while still allowing it to cross.
    Penalty(f64),
}

impl EpsilonHandling {
    /// Rejects penalty weights that are negative or not finite.
    pub fn validate(&self) -> Result<()> {
        if let EpsilonHandling::Penalty(weight) = *self {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ParetoError::config(format!(
                    "penalty weight must be finite and non-negative, got {weight}"
                )));
            }
        }
        Ok(())
    }
}

/// A scored solution as seen by the search.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Evaluation {
    /// Raw objective values.
    pub objectives: Objectives,
    /// Scalar fitness (lower is better).
    pub fitness: f64,
    /// Constraint violation used for feasibility-first comparison.
    pub violation: f64,
    /// How far `f2` exceeds epsilon (always zero in weighted-sum mode).
    pub epsilon_excess: f64,
}

impl Evaluation {
    /// Feasible for both the structural constraints and the epsilon bound.
    pub fn is_feasible(&self) -> bool {
        self.violation == 0.0 && self.epsilon_excess == 0.0
    }

    /// Feasibility-first tournament comparison.
    ///
    /// Both feasible: lower fitness wins. Feasible beats infeasible. Both
    /// infeasible: lower violation wins, ties broken by fitness.
    pub fn beats(&self, other: &Evaluation) -> bool {
        let self_ok = self.violation == 0.0;
        let other_ok = other.violation == 0.0;
        match (self_ok, other_ok) {
            (true, true) => self.fitness < other.fitness - TOLERANCE,
            (true, false) => true,
            (false, true) => false,
            (false, false) => {
                if (self.violation - other.violation).abs() > TOLERANCE {
                    self.violation < other.violation
                } else {
                    self.fitness < other.fitness - TOLERANCE
                }
            }
        }
    }
}

/// Turns `(f1, f2)` plus a scalarization parameter into an [`Evaluation`].
///
/// Each run owns its own immutable scalarizer; nothing is shared between
/// runs.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scalarizer {
    scalarization: Scalarization,
    bounds: ObjectiveBounds,
    epsilon_handling: EpsilonHandling,
}

impl Scalarizer {
    /// Creates a scalarizer after validating the parameter and bounds.
    pub fn new(scalarization: Scalarization, bounds: ObjectiveBounds) -> Result<Self> {
        scalarization.validate()?;
        bounds.validate()?;
        Ok(Self {
            scalarization,
            bounds,
            epsilon_handling: EpsilonHandling::default(),
        })
    }

    /// Sets how epsilon excess is scored. The weight is checked by
    /// [`Scalarizer::validate`].
    pub fn with_epsilon_handling(mut self, handling: EpsilonHandling) -> Self {
        self.epsilon_handling = handling;
        self
    }

    pub fn epsilon_handling(&self) -> EpsilonHandling {
        self.epsilon_handling
    }

    /// Re-checks the parameter, bounds, and epsilon handling.
    pub fn validate(&self) -> Result<()> {
        self.scalarization.validate()?;
        self.bounds.validate()?;
        self.epsilon_handling.validate()
    }

    pub fn scalarization(&self) -> Scalarization {
        self.scalarization
    }

    pub fn bounds(&self) -> &ObjectiveBounds {
        &self.bounds
    }

    /// Evaluates a solution against an instance and scores it.
    pub fn score(&self, instance: &Instance, solution: &Solution) -> Evaluation {
        self.evaluate(instance.evaluate(solution), instance.violation(solution))
    }

    /// Scores objectives given the structural violation of the solution.
    pub fn evaluate(&self, objectives: Objectives, violation: f64) -> Evaluation {
        match self.scalarization {
            Scalarization::WeightedSum { w1, w2 } => {
                let (f1n, f2n) = self.bounds.normalize(&objectives);
                Evaluation {
                    objectives,
                    fitness: w1 * f1n + w2 * f2n,
                    violation,
                    epsilon_excess: 0.0,
                }
            }
            Scalarization::EpsilonConstraint { epsilon } => {
                let excess = (objectives.f2 as f64 - epsilon).max(0.0);
                let (fitness, violation) = match self.epsilon_handling {
                    EpsilonHandling::Reject => (objectives.f1, violation + excess * excess),
                    EpsilonHandling::Penalty(weight) => {
                        (objectives.f1 + weight * excess, violation)
                    }
                };
                Evaluation {
                    objectives,
                    fitness,
                    violation,
                    epsilon_excess: excess,
                }
            }
        }
    }
}
