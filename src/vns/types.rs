//! Core trait for Variable Neighborhood Search.

use rand::Rng;

use crate::scalarize::Evaluation;

/// Defines a Variable Neighborhood Search problem.
///
/// Solutions are compared with the feasibility-first rule of
/// [`Evaluation::beats`]: a feasible solution always beats an infeasible
/// one, two feasible solutions compare on fitness, two infeasible ones on
/// violation.
///
/// # References
///
/// Mladenović, N. & Hansen, P. (1997). "Variable neighborhood search",
/// *Computers & Operations Research* 24(11), 1097-1100.
pub trait VnsProblem: Send + Sync {
    /// The solution representation type.
    type Solution: Clone + Send;

    /// Creates an initial solution.
    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Self::Solution;

    /// Scores a solution. Lower fitness is better.
    fn evaluate(&self, solution: &Self::Solution) -> Evaluation;

    /// Returns the number of shake levels (k_max).
    ///
    /// Levels run from `1` to `neighborhood_count()`; higher levels
    /// perturb more strongly.
    fn neighborhood_count(&self) -> usize;

    /// Generates a random neighbor at shake level `k` (1-based).
    fn shake<R: Rng>(&self, solution: &Self::Solution, k: usize, rng: &mut R) -> Self::Solution;

    /// Performs local search starting from the given solution.
    ///
    /// Returns the locally optimal solution. Returning the input unchanged
    /// degenerates VNS to repeated shaking.
    fn local_search(&self, solution: &Self::Solution) -> Self::Solution;
}
