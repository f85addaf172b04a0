//! Scalarization of the two objectives.
//!
//! A [`Scalarization`] is a tagged parameter value: either a weight pair
//! for the weighted-sum method or an upper bound on `f2` for the
//! epsilon-constraint method. A [`Scalarizer`] combines it with
//! [`ObjectiveBounds`] and turns raw `(f1, f2)` values into an
//! [`Evaluation`]: one scalar fitness plus a violation measure compared
//! feasibility-first.
//!
//! # References
//!
//! - Miettinen, K. (1999). *Nonlinear Multiobjective Optimization*. Kluwer.
//! - Haimes, Y. Y., Lasdon, L. S. & Wismer, D. A. (1971). "On a bicriterion
//!   formulation of the problems of integrated system identification and
//!   system optimization", *IEEE Trans. SMC* 1(3), 296-297.
//! - Deb, K. (2000). "An efficient constraint handling method for genetic
//!   algorithms", *Comput. Methods Appl. Mech. Engrg.* 186, 311-338.

mod types;

pub(crate) use types::TOLERANCE;
pub use types::{EpsilonHandling, Evaluation, Method, ObjectiveBounds, Scalarization, Scalarizer};
