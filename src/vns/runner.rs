//! Variable Neighborhood Search execution engine.
//!
//! # Algorithm
//!
//! 1. Generate initial solution x, apply local search
//! 2. Set k = 1
//! 3. While stopping criterion not met:
//!    a. **Shaking**: Generate x' randomly at level k around x
//!    b. **Local search**: Apply local search to x' → x''
//!    c. **Move or not**: If x'' beats x, set x = x'' and k = 1. If x'' is
//!    not strictly worse, accept it with probability `plateau_acceptance`
//!    and set k = 1. Otherwise k = k + 1
//!    d. When k passes k_max one outer iteration is done
//! 4. Stop after `max_iterations` outer iterations or `max_no_improve`
//!    consecutive outer iterations without a strict improvement
//! 5. Return best solution found
//!
//! Plateau moves reset k, so each outer iteration is additionally capped
//! at `k_max * SHAKES_PER_LEVEL` shakes.
//!
//! # Reference
//!
//! Mladenović, N. & Hansen, P. (1997). "Variable neighborhood search",
//! *Computers & Operations Research* 24(11), 1097-1100.

use rand::Rng;

use crate::random::create_rng;
use crate::scalarize::Evaluation;

use super::config::VnsConfig;
use super::types::VnsProblem;

const SHAKES_PER_LEVEL: usize = 8;
const DEFAULT_SEED: u64 = 42;

/// Result of a VNS run.
#[derive(Debug, Clone)]
pub struct VnsResult<S: Clone> {
    /// Best solution found.
    pub best: S,
    /// Evaluation of the best solution.
    pub best_evaluation: Evaluation,
    /// Best trial with no violation and no epsilon excess, if any was seen.
    ///
    /// Differs from `best` only when a penalty lets infeasible trials win.
    pub best_feasible: Option<(S, Evaluation)>,
    /// Total shakes executed.
    pub iterations: usize,
    /// Outer iteration at which the best solution was found.
    pub best_iteration: usize,
    /// Trials accepted without strict improvement.
    pub plateau_moves: usize,
    /// Whether the run ended on the no-improvement threshold.
    pub stagnated: bool,
    /// Best fitness at each outer iteration.
    pub cost_history: Vec<f64>,
}

/// Variable Neighborhood Search runner.
pub struct VnsRunner;

impl VnsRunner {
    /// Executes VNS on the given problem.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use u_pareto::model::Objectives;
    /// use u_pareto::scalarize::Evaluation;
    /// use u_pareto::vns::{VnsProblem, VnsConfig, VnsRunner};
    /// use rand::Rng;
    ///
    /// struct MyProblem;
    /// impl VnsProblem for MyProblem {
    ///     type Solution = Vec<usize>;
    ///     fn initial_solution<R: Rng>(&self, _rng: &mut R) -> Vec<usize> { vec![0, 1, 2] }
    ///     fn evaluate(&self, _sol: &Vec<usize>) -> Evaluation {
    ///         Evaluation {
    ///             objectives: Objectives::new(0.0, 1),
    ///             fitness: 0.0,
    ///             violation: 0.0,
    ///             epsilon_excess: 0.0,
    ///         }
    ///     }
    ///     fn neighborhood_count(&self) -> usize { 2 }
    ///     fn shake<R: Rng>(&self, sol: &Vec<usize>, _k: usize, _rng: &mut R) -> Vec<usize> {
    ///         sol.clone()
    ///     }
    ///     fn local_search(&self, sol: &Vec<usize>) -> Vec<usize> { sol.clone() }
    /// }
    ///
    /// let result = VnsRunner::run(&MyProblem, &VnsConfig::default());
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `problem.neighborhood_count()` is zero.
    pub fn run<P: VnsProblem>(problem: &P, config: &VnsConfig) -> VnsResult<P::Solution> {
        let mut rng = create_rng(config.seed.unwrap_or(DEFAULT_SEED));

        let k_max = problem.neighborhood_count();
        assert!(k_max > 0, "neighborhood_count must be at least 1");
        let pass_budget = k_max * SHAKES_PER_LEVEL;

        let initial = problem.initial_solution(&mut rng);
        let mut best_feasible = None;
        record_feasible(&mut best_feasible, &initial, problem.evaluate(&initial));

        let mut current = problem.local_search(&initial);
        let mut current_eval = problem.evaluate(&current);
        record_feasible(&mut best_feasible, &current, current_eval);
        let mut best = current.clone();
        let mut best_eval = current_eval;
        let mut best_iteration = 0;

        let mut cost_history = Vec::with_capacity(config.max_iterations);
        let mut no_improve_count = 0;
        let mut iterations = 0;
        let mut plateau_moves = 0;
        let mut stagnated = false;

        for outer in 0..config.max_iterations {
            let mut k = 1;
            let mut shakes = 0;
            let mut improved = false;

            while k <= k_max && shakes < pass_budget {
                let shaken = problem.shake(&current, k, &mut rng);
                let candidate = problem.local_search(&shaken);
                let candidate_eval = problem.evaluate(&candidate);
                record_feasible(&mut best_feasible, &candidate, candidate_eval);
                shakes += 1;

                if candidate_eval.beats(&current_eval) {
                    current = candidate;
                    current_eval = candidate_eval;
                    k = 1;

                    if current_eval.beats(&best_eval) {
                        log::debug!(
                            "vns iteration {outer}: fitness {:.6} -> {:.6} (f1 {:.3}, f2 {})",
                            best_eval.fitness,
                            current_eval.fitness,
                            current_eval.objectives.f1,
                            current_eval.objectives.f2
                        );
                        best = current.clone();
                        best_eval = current_eval;
                        best_iteration = outer;
                        improved = true;
                    }
                } else if !current_eval.beats(&candidate_eval)
                    && rng.random_bool(config.plateau_acceptance)
                {
                    current = candidate;
                    current_eval = candidate_eval;
                    plateau_moves += 1;
                    k = 1;
                } else {
                    k += 1;
                }
            }

            iterations += shakes;
            cost_history.push(best_eval.fitness);

            if improved {
                no_improve_count = 0;
            } else {
                no_improve_count += 1;
            }
            if no_improve_count >= config.max_no_improve {
                log::debug!(
                    "vns stopped after {} outer iterations without improvement",
                    no_improve_count
                );
                stagnated = true;
                break;
            }
        }

        VnsResult {
            best,
            best_evaluation: best_eval,
            best_feasible,
            iterations,
            best_iteration,
            plateau_moves,
            stagnated,
            cost_history,
        }
    }
}

fn record_feasible<S: Clone>(
    slot: &mut Option<(S, Evaluation)>,
    solution: &S,
    eval: Evaluation,
) {
    if !eval.is_feasible() {
        return;
    }
    if slot.as_ref().is_none_or(|(_, kept)| eval.beats(kept)) {
        *slot = Some((solution.clone(), eval));
    }
}
