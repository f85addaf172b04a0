//! Non-dominated sorting and crowding distance over `(f1, f2)` points.
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II"
//! - IEEE Transactions on Evolutionary Computation, 6(2), 182-197

use crate::model::Objectives;

/// Result of non-dominated sorting.
///
/// Each element of `ranks` corresponds to the Pareto rank of the point at
/// the same index. Rank 0 is the non-dominated set.
#[derive(Debug, Clone, Default)]
pub struct NondominatedSortResult {
    /// Pareto rank for each point (0 = front).
    pub ranks: Vec<usize>,

    /// Indices grouped by front: `fronts[0]` contains rank-0 indices, etc.
    pub fronts: Vec<Vec<usize>>,
}

/// Fast non-dominated sorting (both objectives minimized).
///
/// # Complexity
///
/// O(n²) dominance checks.
///
/// # Example
///
/// ```
/// use u_pareto::front::non_dominated_sort;
/// use u_pareto::model::Objectives;
///
/// let points = vec![
///     Objectives::new(10.0, 3),
///     Objectives::new(20.0, 2),
///     Objectives::new(40.0, 1),
///     Objectives::new(25.0, 2), // dominated by (20, 2)
/// ];
///
/// let result = non_dominated_sort(&points);
/// assert_eq!(result.ranks, vec![0, 0, 0, 1]);
/// ```
pub fn non_dominated_sort(points: &[Objectives]) -> NondominatedSortResult {
    let n = points.len();
    let mut domination_count = vec![0usize; n];
    let mut dominated_by: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut ranks = vec![0usize; n];

    for i in 0..n {
        for j in (i + 1)..n {
            if points[i].dominates(&points[j]) {
                dominated_by[i].push(j);
                domination_count[j] += 1;
            } else if points[j].dominates(&points[i]) {
                dominated_by[j].push(i);
                domination_count[i] += 1;
            }
        }
    }

    let mut fronts: Vec<Vec<usize>> = Vec::new();
    let mut current: Vec<usize> = (0..n).filter(|&i| domination_count[i] == 0).collect();

    while !current.is_empty() {
        let mut next_front = Vec::new();
        for &i in &current {
            for &j in &dominated_by[i] {
                domination_count[j] -= 1;
                if domination_count[j] == 0 {
                    ranks[j] = fronts.len() + 1;
                    next_front.push(j);
                }
            }
        }
        fronts.push(current);
        current = next_front;
    }

    NondominatedSortResult { ranks, fronts }
}

/// Crowding distance of each point within one front.
///
/// For each objective the points are sorted, the extremes receive
/// `f64::INFINITY`, and interior points add the gap between their
/// neighbours normalized by the objective's range. With two or fewer
/// points every distance is infinite.
///
/// # Example
///
/// ```
/// use u_pareto::front::crowding_distance;
/// use u_pareto::model::Objectives;
///
/// let points = vec![
///     Objectives::new(10.0, 3),
///     Objectives::new(20.0, 2),
///     Objectives::new(40.0, 1),
/// ];
///
/// let distances = crowding_distance(&points);
/// assert!(distances[0].is_infinite());
/// assert!(distances[1].is_finite());
/// assert!(distances[2].is_infinite());
/// ```
pub fn crowding_distance(points: &[Objectives]) -> Vec<f64> {
    let n = points.len();
    if n <= 2 {
        return vec![f64::INFINITY; n];
    }

    let coords: Vec<[f64; 2]> = points.iter().map(Objectives::as_point).collect();
    let mut distances = vec![0.0f64; n];

    for axis in 0..2 {
        let mut indices: Vec<usize> = (0..n).collect();
        indices.sort_by(|&a, &b| coords[a][axis].total_cmp(&coords[b][axis]));

        distances[indices[0]] = f64::INFINITY;
        distances[indices[n - 1]] = f64::INFINITY;

        let range = coords[indices[n - 1]][axis] - coords[indices[0]][axis];
        if range > 0.0 {
            for w in indices.windows(3) {
                let gap = coords[w[2]][axis] - coords[w[0]][axis];
                distances[w[1]] += gap / range;
            }
        }
    }

    distances
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(raw: &[(f64, usize)]) -> Vec<Objectives> {
        raw.iter().map(|&(f1, f2)| Objectives::new(f1, f2)).collect()
    }

    // ---- Non-dominated sort ----

    #[test]
    fn test_empty_and_single() {
        let result = non_dominated_sort(&[]);
        assert!(result.ranks.is_empty());
        assert!(result.fronts.is_empty());

        let result = non_dominated_sort(&pts(&[(1.0, 2)]));
        assert_eq!(result.ranks, vec![0]);
        assert_eq!(result.fronts, vec![vec![0]]);
    }

    #[test]
    fn test_clear_dominance() {
        let result = non_dominated_sort(&pts(&[(1.0, 1), (2.0, 2), (3.0, 3)]));
        assert_eq!(result.ranks, vec![0, 1, 2]);
        assert_eq!(result.fronts.len(), 3);
    }

    #[test]
    fn test_mixed_fronts() {
        let result = non_dominated_sort(&pts(&[
            (1.0, 5), // front 0
            (3.0, 3), // front 0
            (5.0, 1), // front 0
            (4.0, 4), // dominated by (3, 3)
            (6.0, 6), // dominated by (4, 4)
        ]));
        assert_eq!(result.ranks, vec![0, 0, 0, 1, 2]);
        assert_eq!(result.fronts[1], vec![3]);
    }

    #[test]
    fn test_equal_f2_different_f1() {
        let result = non_dominated_sort(&pts(&[(5.0, 2), (4.0, 2)]));
        assert_eq!(result.ranks, vec![1, 0]);
    }

    #[test]
    fn test_all_equal() {
        let result = non_dominated_sort(&pts(&[(2.0, 2), (2.0, 2), (2.0, 2)]));
        assert!(result.ranks.iter().all(|&r| r == 0));
    }

    // ---- Crowding distance ----

    #[test]
    fn test_crowding_two() {
        let dist = crowding_distance(&pts(&[(1.0, 3), (3.0, 1)]));
        assert!(dist.iter().all(|d| d.is_infinite()));
    }

    #[test]
    fn test_crowding_evenly_spaced() {
        let dist = crowding_distance(&pts(&[(0.0, 4), (1.0, 3), (2.0, 2), (3.0, 1), (4.0, 0)]));

        assert!(dist[0].is_infinite());
        assert!(dist[4].is_infinite());
        assert!((dist[1] - dist[2]).abs() < 1e-10);
        assert!((dist[2] - dist[3]).abs() < 1e-10);
        assert!((dist[2] - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_crowding_prefers_isolated_points() {
        // (2, 4) sits next to (1, 5); (6, 2) has room on both sides.
        let dist = crowding_distance(&pts(&[(1.0, 5), (2.0, 4), (6.0, 2), (10.0, 1)]));
        assert!(dist[2] > dist[1]);
    }

    #[test]
    fn test_crowding_zero_range_objective() {
        let dist = crowding_distance(&pts(&[(1.0, 5), (2.0, 5), (3.0, 5)]));
        assert!(dist[0].is_infinite());
        assert!(dist[2].is_infinite());
        assert!(dist[1].is_finite());
    }
}
