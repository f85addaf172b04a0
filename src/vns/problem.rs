//! Team assignment as a [`VnsProblem`].

use rand::Rng;

use crate::error::{ParetoError, Result};
use crate::model::{Instance, Solution};
use crate::neighborhood::{
    consolidate, intensity, perturbation_count, shift, variable_neighborhood_descent,
    ShakeOperator,
};
use crate::scalarize::{Evaluation, Scalarization, Scalarizer};

use super::config::VnsConfig;
use super::runner::{VnsResult, VnsRunner};
use super::types::VnsProblem;

/// Weight above which a weighted-sum seed leans fully toward one objective.
const BIAS_THRESHOLD: f64 = 0.7;

/// Assignment of assets to teams under one scalarization.
///
/// Borrows the shared instance read-only and owns its scalarizer and
/// configuration, so independent runs never share mutable state.
#[derive(Debug, Clone)]
pub struct AssignmentProblem<'a> {
    instance: &'a Instance,
    scalarizer: Scalarizer,
    config: VnsConfig,
}

impl<'a> AssignmentProblem<'a> {
    pub fn new(instance: &'a Instance, scalarizer: Scalarizer, config: VnsConfig) -> Self {
        Self {
            instance,
            scalarizer,
            config,
        }
    }

    pub fn instance(&self) -> &Instance {
        self.instance
    }

    pub fn scalarizer(&self) -> &Scalarizer {
        &self.scalarizer
    }

    /// Team count targeted by the initial solution, and whether the seed
    /// should favour distance (spread bases) over concentration.
    ///
    /// Weight on `f2` or a low epsilon pulls the seed toward few teams;
    /// weight on `f1` or a high epsilon toward many.
    fn seed_plan<R: Rng>(&self, rng: &mut R) -> (usize, bool) {
        let s = self.instance.max_teams();
        let (target, favour_distance) = match self.scalarizer.scalarization() {
            Scalarization::WeightedSum { w2, .. } if w2 > BIAS_THRESHOLD => {
                (pick(rng, 1, (s / 3).max(2)), false)
            }
            Scalarization::WeightedSum { w1, .. } if w1 > BIAS_THRESHOLD => {
                (pick(rng, s / 2, s + 1), true)
            }
            Scalarization::WeightedSum { w1, w2 } => (pick(rng, 2, s), w1 >= w2),
            Scalarization::EpsilonConstraint { epsilon } => {
                (epsilon.floor().max(1.0) as usize, true)
            }
        };
        (target.clamp(1, s), favour_distance)
    }

    /// Greedy p-median: repeatedly opens the base that most reduces the
    /// total distance to the nearest open base.
    fn spread_bases(&self, count: usize) -> Vec<usize> {
        let n = self.instance.asset_count();
        let mut nearest = vec![f64::INFINITY; n];
        let mut chosen: Vec<usize> = Vec::with_capacity(count);

        let total_with = |nearest: &[f64], base: usize| -> f64 {
            nearest
                .iter()
                .enumerate()
                .map(|(asset, &d)| d.min(self.instance.distance(asset, base)))
                .sum()
        };

        for _ in 0..count {
            let next = (0..self.instance.base_count())
                .filter(|j| !chosen.contains(j))
                .min_by(|&a, &b| total_with(&nearest, a).total_cmp(&total_with(&nearest, b)));
            let Some(base) = next else { break };
            for (asset, d) in nearest.iter_mut().enumerate() {
                *d = d.min(self.instance.distance(asset, base));
            }
            chosen.push(base);
        }
        chosen
    }

    fn central_bases(&self, count: usize) -> Vec<usize> {
        self.instance
            .bases_by_centrality()
            .iter()
            .take(count)
            .copied()
            .collect()
    }
}

fn pick<R: Rng>(rng: &mut R, low: usize, high: usize) -> usize {
    if high <= low {
        low
    } else {
        rng.random_range(low..high)
    }
}

impl VnsProblem for AssignmentProblem<'_> {
    type Solution = Solution;

    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Solution {
        let (target, favour_distance) = self.seed_plan(rng);
        let bases = if favour_distance {
            self.spread_bases(target)
        } else {
            self.central_bases(target)
        };
        Solution::assign_nearest(self.instance, &bases)
    }

    fn evaluate(&self, solution: &Solution) -> Evaluation {
        self.scalarizer.score(self.instance, solution)
    }

    fn neighborhood_count(&self) -> usize {
        self.config.shake_levels
    }

    fn shake<R: Rng>(&self, solution: &Solution, k: usize, rng: &mut R) -> Solution {
        let operator =
            if solution.team_count() > 1 && rng.random_bool(self.config.consolidate_rate) {
                ShakeOperator::Consolidate
            } else {
                ShakeOperator::Shift
            };

        let mut next = solution.clone();
        match operator {
            ShakeOperator::Shift => {
                let level = intensity(k, self.config.shake_levels);
                let count = perturbation_count(next.asset_count(), level);
                shift(
                    self.instance,
                    &mut next,
                    count,
                    self.config.activation_rate,
                    rng,
                );
            }
            ShakeOperator::Consolidate => consolidate(self.instance, &mut next, k, rng),
        }
        next
    }

    fn local_search(&self, solution: &Solution) -> Solution {
        let (improved, _) = variable_neighborhood_descent(
            self.instance,
            &self.scalarizer,
            solution.clone(),
            self.config.max_descent_steps,
        );
        improved
    }
}

/// Runs one VNS invocation for a single scalarization.
///
/// # Errors
///
/// Returns [`ParetoError::InvalidConfiguration`] for a malformed config or
/// scalarizer and [`ParetoError::InfeasibleRun`] when no trial satisfied
/// both the structural constraints and the epsilon bound.
///
/// Under [`EpsilonHandling::Penalty`](crate::scalarize::EpsilonHandling)
/// the search may settle on a solution that exceeds epsilon; the best
/// feasible trial seen along the way is returned instead.
pub fn solve(
    instance: &Instance,
    scalarizer: Scalarizer,
    config: &VnsConfig,
) -> Result<VnsResult<Solution>> {
    config.validate()?;
    scalarizer.validate()?;
    let problem = AssignmentProblem::new(instance, scalarizer, config.clone());
    let mut result = VnsRunner::run(&problem, config);

    if !result.best_evaluation.is_feasible() {
        let Some((best, evaluation)) = result.best_feasible.clone() else {
            return Err(ParetoError::InfeasibleRun {
                parameter: scalarizer.scalarization(),
            });
        };
        log::debug!(
            "{}: penalized best exceeds epsilon, falling back to feasible f1 {:.3}",
            scalarizer.scalarization(),
            evaluation.objectives.f1
        );
        result.best = best;
        result.best_evaluation = evaluation;
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{grid_instance, tiny_instance};
    use crate::random::create_rng;
    use crate::scalarize::{EpsilonHandling, ObjectiveBounds};

    fn scalarizer(scalarization: Scalarization) -> Scalarizer {
        Scalarizer::new(scalarization, ObjectiveBounds::new(0.0, 20.0, 1.0, 2.0)).unwrap()
    }

    fn config() -> VnsConfig {
        VnsConfig::default().with_max_iterations(40).with_seed(17)
    }

    #[test]
    fn test_pure_f1_weights_minimize_distance() {
        let inst = tiny_instance();
        let s = scalarizer(Scalarization::WeightedSum { w1: 1.0, w2: 0.0 });
        let result = solve(&inst, s, &config()).unwrap();
        assert_eq!(result.best.assignment(), &[0, 0, 1, 1]);
        assert!((result.best_evaluation.objectives.f1 - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_pure_f2_weights_minimize_teams() {
        let inst = tiny_instance();
        let s = scalarizer(Scalarization::WeightedSum { w1: 0.0, w2: 1.0 });
        let result = solve(&inst, s, &config()).unwrap();
        assert_eq!(result.best_evaluation.objectives.f2, 1);
    }

    #[test]
    fn test_epsilon_bound_is_respected() {
        let inst = tiny_instance();
        let at_most = |epsilon| scalarizer(Scalarization::EpsilonConstraint { epsilon });

        let one = solve(&inst, at_most(1.0), &config()).unwrap();
        assert_eq!(one.best_evaluation.objectives.f2, 1);
        assert!((one.best_evaluation.objectives.f1 - 20.0).abs() < 1e-9);

        let two = solve(&inst, at_most(2.0), &config()).unwrap();
        assert!((two.best_evaluation.objectives.f1 - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_epsilon_below_minimum_is_infeasible() {
        let inst = tiny_instance();
        let parameter = Scalarization::EpsilonConstraint { epsilon: 0.5 };
        let err = solve(&inst, scalarizer(parameter), &config()).unwrap_err();
        assert_eq!(err, ParetoError::InfeasibleRun { parameter });

        let penalized = scalarizer(parameter).with_epsilon_handling(EpsilonHandling::Penalty(1e3));
        assert!(matches!(
            solve(&inst, penalized, &config()),
            Err(ParetoError::InfeasibleRun { .. })
        ));
    }

    #[test]
    fn test_light_penalty_returns_feasible_solution() {
        let inst = tiny_instance();
        let parameter = Scalarization::EpsilonConstraint { epsilon: 1.0 };
        // Opening a second team saves 18 distance for a penalty of 0.1.
        let penalized = scalarizer(parameter).with_epsilon_handling(EpsilonHandling::Penalty(0.1));
        let result = solve(&inst, penalized, &config()).unwrap();

        assert!(result.best_evaluation.is_feasible());
        assert_eq!(result.best.team_count(), 1);
        assert_eq!(result.best_evaluation.objectives.f2, 1);
        assert!((result.best_evaluation.objectives.f1 - 20.0).abs() < 1e-9);
        assert_eq!(result.best_evaluation, penalized.score(&inst, &result.best));
    }

    #[test]
    fn test_invalid_penalty_weight_is_rejected() {
        let inst = tiny_instance();
        let parameter = Scalarization::EpsilonConstraint { epsilon: 1.0 };
        for weight in [-0.5, f64::NAN] {
            let s = scalarizer(parameter).with_epsilon_handling(EpsilonHandling::Penalty(weight));
            assert!(matches!(
                solve(&inst, s, &config()),
                Err(ParetoError::InvalidConfiguration { .. })
            ));
        }
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let inst = tiny_instance();
        let s = scalarizer(Scalarization::WeightedSum { w1: 0.5, w2: 0.5 });
        let bad = config().with_shake_levels(0);
        assert!(matches!(
            solve(&inst, s, &bad),
            Err(ParetoError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_seeding_follows_parameter() {
        let inst = tiny_instance();
        let mut rng = create_rng(1);

        let few = AssignmentProblem::new(
            &inst,
            scalarizer(Scalarization::WeightedSum { w1: 0.1, w2: 0.9 }),
            config(),
        );
        assert_eq!(few.initial_solution(&mut rng).team_count(), 1);

        let eps = AssignmentProblem::new(
            &inst,
            scalarizer(Scalarization::EpsilonConstraint { epsilon: 2.0 }),
            config(),
        );
        let seed = eps.initial_solution(&mut rng);
        assert_eq!(seed.assignment(), &[0, 0, 1, 1]);
    }

    #[test]
    fn test_spread_bases_covers_line() {
        let inst = grid_instance();
        let problem = AssignmentProblem::new(
            &inst,
            scalarizer(Scalarization::WeightedSum { w1: 1.0, w2: 0.0 }),
            config(),
        );
        assert_eq!(problem.spread_bases(1), vec![1]);
        let pair = problem.spread_bases(2);
        assert_eq!(pair.len(), 2);
        assert_eq!(pair[0], 1);
        assert_eq!(problem.spread_bases(5).len(), 3);
    }

    #[test]
    fn test_shake_keeps_solution_valid() {
        let inst = grid_instance();
        let problem = AssignmentProblem::new(
            &inst,
            scalarizer(Scalarization::WeightedSum { w1: 0.5, w2: 0.5 }),
            config().with_consolidate_rate(0.5).with_activation_rate(0.5),
        );
        let mut rng = create_rng(5);
        let mut sol = problem.initial_solution(&mut rng);
        for k in [1, 2, 3, 1, 2, 3] {
            sol = problem.shake(&sol, k, &mut rng);
            assert_eq!(sol.asset_count(), 10);
            assert!(sol.team_count() >= 1 && sol.team_count() <= 3);
        }
    }

    #[test]
    fn test_solve_is_reproducible() {
        let inst = grid_instance();
        let s = scalarizer(Scalarization::WeightedSum { w1: 0.5, w2: 0.5 });
        let a = solve(&inst, s, &config()).unwrap();
        let b = solve(&inst, s, &config()).unwrap();
        assert_eq!(a.best, b.best);
        assert_eq!(a.cost_history, b.cost_history);
    }
}
