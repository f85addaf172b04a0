//! Merges candidate pools into a fixed-size, well-spread front.

use crate::error::{ParetoError, Result};
use crate::model::Objectives;
use crate::scalarize::{Method, TOLERANCE};

use super::sort::{crowding_distance, non_dominated_sort};
use super::types::{CandidateSolution, ParetoFront};

/// Default number of front members.
pub const DEFAULT_FRONT_SIZE: usize = 20;

/// Builds a [`ParetoFront`] from the candidates of one method.
///
/// 1. Candidates with identical `(f1, f2)` collapse to the first one seen.
/// 2. Non-dominated sorting isolates rank 0.
/// 3. While rank 0 exceeds the target, the member with the smallest
///    crowding distance is dropped and distances are recomputed. Extreme
///    points carry infinite distance and survive as long as the target is
///    at least 2.
/// 4. With backfill enabled, a short front is supplemented from rank 1
///    under the same rule; those points are reported separately.
///
/// # Examples
///
/// ```
/// use u_pareto::front::{CandidateSolution, FrontAggregator};
/// use u_pareto::model::Objectives;
/// use u_pareto::scalarize::{Method, Scalarization};
///
/// let candidate = |f1: f64, f2: usize| CandidateSolution {
///     objectives: Objectives::new(f1, f2),
///     parameter: Scalarization::EpsilonConstraint { epsilon: f2 as f64 },
///     repetition: 0,
///     seed: 0,
///     assignment: Vec::new(),
/// };
///
/// let pool = vec![candidate(40.0, 1), candidate(25.0, 2), candidate(30.0, 2)];
/// let front = FrontAggregator::new(20)
///     .aggregate(Method::EpsilonConstraint, pool)
///     .unwrap();
/// assert_eq!(front.len(), 2);
/// assert_eq!(front.members()[0].f1(), 25.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrontAggregator {
    target_size: usize,
    backfill: bool,
}

impl Default for FrontAggregator {
    fn default() -> Self {
        Self::new(DEFAULT_FRONT_SIZE)
    }
}

impl FrontAggregator {
    pub fn new(target_size: usize) -> Self {
        Self {
            target_size,
            backfill: false,
        }
    }

    /// Enables padding a short front from rank 1.
    pub fn with_backfill(mut self, backfill: bool) -> Self {
        self.backfill = backfill;
        self
    }

    pub fn target_size(&self) -> usize {
        self.target_size
    }

    /// Aggregates the full candidate pool of `method`.
    ///
    /// # Errors
    ///
    /// - [`ParetoError::InvalidConfiguration`] if the target is below 2.
    /// - [`ParetoError::EmptyFront`] if `candidates` is empty.
    pub fn aggregate(
        &self,
        method: Method,
        candidates: Vec<CandidateSolution>,
    ) -> Result<ParetoFront> {
        if self.target_size < 2 {
            return Err(ParetoError::config(format!(
                "front size must be at least 2, got {}",
                self.target_size
            )));
        }
        if candidates.is_empty() {
            return Err(ParetoError::EmptyFront { method });
        }

        let submitted = candidates.len();
        let pool = collapse_duplicates(candidates);
        let points: Vec<Objectives> = pool.iter().map(|c| c.objectives).collect();
        let sorted = non_dominated_sort(&points);
        let Some(rank0) = sorted.fronts.first() else {
            return Err(ParetoError::EmptyFront { method });
        };

        let kept = select_by_crowding(&points, rank0, self.target_size);
        let members = ordered(&pool, &kept);

        let mut backfill = Vec::new();
        if self.backfill && members.len() < self.target_size {
            if let Some(rank1) = sorted.fronts.get(1) {
                let extra = select_by_crowding(&points, rank1, self.target_size - members.len());
                backfill = ordered(&pool, &extra);
            }
        }

        log::debug!(
            "{method}: {submitted} candidates, {} distinct, rank 0 of {}, kept {} (+{} backfill)",
            pool.len(),
            rank0.len(),
            members.len(),
            backfill.len()
        );

        Ok(ParetoFront::new(method, members, backfill))
    }
}

fn same_point(a: &Objectives, b: &Objectives) -> bool {
    a.f2 == b.f2 && (a.f1 - b.f1).abs() <= TOLERANCE * a.f1.abs().max(1.0)
}

fn collapse_duplicates(candidates: Vec<CandidateSolution>) -> Vec<CandidateSolution> {
    let mut pool: Vec<CandidateSolution> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if !pool
            .iter()
            .any(|kept| same_point(&kept.objectives, &candidate.objectives))
        {
            pool.push(candidate);
        }
    }
    pool
}

/// Drops the most crowded point until `target` remain.
///
/// Ties on distance remove the point with the larger `f1`.
fn select_by_crowding(points: &[Objectives], indices: &[usize], target: usize) -> Vec<usize> {
    let mut kept = indices.to_vec();
    while kept.len() > target {
        let subset: Vec<Objectives> = kept.iter().map(|&i| points[i]).collect();
        let distances = crowding_distance(&subset);
        let most_crowded = (0..kept.len()).min_by(|&a, &b| {
            distances[a]
                .total_cmp(&distances[b])
                .then_with(|| subset[b].f1.total_cmp(&subset[a].f1))
        });
        match most_crowded {
            Some(pos) => {
                kept.remove(pos);
            }
            None => break,
        }
    }
    kept
}

fn ordered(pool: &[CandidateSolution], indices: &[usize]) -> Vec<CandidateSolution> {
    let mut picked: Vec<CandidateSolution> = indices.iter().map(|&i| pool[i].clone()).collect();
    picked.sort_by(|a, b| a.f1().total_cmp(&b.f1()).then(a.f2().cmp(&b.f2())));
    picked
}
