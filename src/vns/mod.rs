//! Variable Neighborhood Search (VNS).
//!
//! A single-solution metaheuristic that systematically changes
//! neighborhood structures during the search. At each step, a random
//! perturbation (shaking) at the current level is followed by local
//! search. If improvement is found, the search resets to the first
//! (weakest) level; otherwise, it moves to the next (stronger) one.
//!
//! [`VnsRunner`] is generic over [`VnsProblem`]; [`AssignmentProblem`]
//! plugs in the team-assignment operators and a scalarized fitness, and
//! [`solve`] runs it once, reporting infeasible outcomes as errors.
//!
//! # References
//!
//! - Mladenović, N. & Hansen, P. (1997). "Variable neighborhood search",
//!   *Computers & Operations Research* 24(11), 1097-1100.
//! - Hansen, P. & Mladenović, N. (2001). "Variable neighborhood search:
//!   Principles and applications", *European Journal of Operational Research* 130(3), 449-467.

mod config;
mod problem;
mod runner;
mod types;

pub use config::VnsConfig;
pub use problem::{solve, AssignmentProblem};
pub use runner::{VnsResult, VnsRunner};
pub use types::VnsProblem;
