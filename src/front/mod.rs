//! Front aggregation.
//!
//! Merges the candidates of every parameter and repetition of one method,
//! keeps the non-dominated set, and thins it to a fixed size by crowding
//! distance so the published front stays evenly spread.
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II"
//! - IEEE Transactions on Evolutionary Computation, 6(2), 182-197

mod aggregator;
mod sort;
mod types;

pub use aggregator::{FrontAggregator, DEFAULT_FRONT_SIZE};
pub use sort::{crowding_distance, non_dominated_sort, NondominatedSortResult};
pub use types::{CandidateSolution, ParetoFront};
