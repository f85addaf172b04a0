//! Problem instance: assets, candidate bases, and the distance table.

use crate::error::{ParetoError, Result};

use super::solution::Solution;

/// A planar coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// An asset that must be covered by exactly one maintenance team.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Asset {
    pub id: usize,
    pub location: Point,
}

/// A base where a maintenance team may be stationed.
///
/// A team is identified with the base it operates from, so "team `j`" and
/// "base `j`" are the same index throughout the crate.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Base {
    pub id: usize,
    pub location: Point,
}

/// Structural limits on how teams may be staffed.
///
/// # Examples
///
/// ```
/// use u_pareto::model::TeamLimits;
///
/// // 8 teams at most, each covering at least 20% of a fair share of 125 assets.
/// let limits = TeamLimits::new(8).with_min_share(0.2, 125);
/// assert!((limits.min_load - 3.125).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TeamLimits {
    /// Maximum number of simultaneously active teams (s_max).
    pub max_teams: usize,
    /// Maximum number of assets per team, if bounded.
    pub capacity: Option<usize>,
    /// Minimum number of assets an active team must cover.
    pub min_load: f64,
}

impl TeamLimits {
    pub fn new(max_teams: usize) -> Self {
        Self {
            max_teams,
            capacity: None,
            min_load: 0.0,
        }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    pub fn with_min_load(mut self, min_load: f64) -> Self {
        self.min_load = min_load.max(0.0);
        self
    }

    /// Sets the minimum load to `eta * asset_count / max_teams`.
    pub fn with_min_share(self, eta: f64, asset_count: usize) -> Self {
        let fair_share = asset_count as f64 / self.max_teams.max(1) as f64;
        self.with_min_load(eta * fair_share)
    }
}

/// The two objective values of an assignment.
///
/// Both are minimized: `f1` is the total asset-to-team distance and `f2`
/// the number of teams in use.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Objectives {
    pub f1: f64,
    pub f2: usize,
}

impl Objectives {
    pub fn new(f1: f64, f2: usize) -> Self {
        Self { f1, f2 }
    }

    /// Pareto dominance: no worse in both objectives, strictly better in one.
    pub fn dominates(&self, other: &Objectives) -> bool {
        let no_worse = self.f1 <= other.f1 && self.f2 <= other.f2;
        let better = self.f1 < other.f1 || self.f2 < other.f2;
        no_worse && better
    }

    /// Objective vector as floats, in `[f1, f2]` order.
    pub fn as_point(&self) -> [f64; 2] {
        [self.f1, self.f2 as f64]
    }
}

/// An immutable problem instance shared read-only by every run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instance {
    assets: Vec<Asset>,
    bases: Vec<Base>,
    /// `distances[asset][base]`.
    distances: Vec<Vec<f64>>,
    limits: TeamLimits,
    /// Base indices ordered by mean distance to all assets, most central first.
    centrality: Vec<usize>,
}

impl Instance {
    /// Builds an instance from a precomputed asset-to-base distance table.
    ///
    /// # Errors
    ///
    /// Returns [`ParetoError::InvalidInstance`] when there are no assets or
    /// bases, when the table shape does not match, when a distance is
    /// negative or not finite, or when the team limits cannot cover all
    /// assets.
    pub fn new(
        assets: Vec<Asset>,
        bases: Vec<Base>,
        distances: Vec<Vec<f64>>,
        limits: TeamLimits,
    ) -> Result<Self> {
        if assets.is_empty() {
            return Err(ParetoError::instance("at least one asset is required"));
        }
        if bases.is_empty() {
            return Err(ParetoError::instance("at least one base is required"));
        }
        if limits.max_teams == 0 {
            return Err(ParetoError::instance("max_teams must be at least 1"));
        }
        if distances.len() != assets.len() {
            return Err(ParetoError::instance(format!(
                "distance table has {} rows for {} assets",
                distances.len(),
                assets.len()
            )));
        }
        for (i, row) in distances.iter().enumerate() {
            if row.len() != bases.len() {
                return Err(ParetoError::instance(format!(
                    "distance row {i} has {} entries for {} bases",
                    row.len(),
                    bases.len()
                )));
            }
            if let Some(d) = row.iter().find(|d| !d.is_finite() || **d < 0.0) {
                return Err(ParetoError::instance(format!(
                    "distance row {i} contains invalid value {d}"
                )));
            }
        }
        let usable_teams = limits.max_teams.min(bases.len());
        if let Some(capacity) = limits.capacity {
            if capacity * usable_teams < assets.len() {
                return Err(ParetoError::instance(format!(
                    "{usable_teams} teams of capacity {capacity} cannot cover {} assets",
                    assets.len()
                )));
            }
        }
        if limits.min_load > assets.len() as f64 {
            return Err(ParetoError::instance(format!(
                "min_load {} exceeds the number of assets",
                limits.min_load
            )));
        }

        let mut centrality: Vec<usize> = (0..bases.len()).collect();
        let mean_distance = |j: usize| -> f64 {
            distances.iter().map(|row| row[j]).sum::<f64>() / assets.len() as f64
        };
        centrality.sort_by(|&a, &b| mean_distance(a).total_cmp(&mean_distance(b)));

        Ok(Self {
            assets,
            bases,
            distances,
            limits,
            centrality,
        })
    }

    /// Builds an instance computing Euclidean distances from coordinates.
    pub fn from_coordinates(
        assets: Vec<Asset>,
        bases: Vec<Base>,
        limits: TeamLimits,
    ) -> Result<Self> {
        let distances = assets
            .iter()
            .map(|a| bases.iter().map(|b| a.location.distance(&b.location)).collect())
            .collect();
        Self::new(assets, bases, distances, limits)
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn bases(&self) -> &[Base] {
        &self.bases
    }

    pub fn asset_count(&self) -> usize {
        self.assets.len()
    }

    pub fn base_count(&self) -> usize {
        self.bases.len()
    }

    pub fn limits(&self) -> &TeamLimits {
        &self.limits
    }

    /// Effective s_max: the team limit capped by the number of bases.
    pub fn max_teams(&self) -> usize {
        self.limits.max_teams.min(self.bases.len())
    }

    #[inline]
    pub fn distance(&self, asset: usize, base: usize) -> f64 {
        self.distances[asset][base]
    }

    /// Bases ordered from most to least central.
    pub fn bases_by_centrality(&self) -> &[usize] {
        &self.centrality
    }

    /// The closest base to `asset` among those accepted by `allowed`.
    pub fn nearest_base<F>(&self, asset: usize, mut allowed: F) -> Option<usize>
    where
        F: FnMut(usize) -> bool,
    {
        (0..self.bases.len())
            .filter(|&j| allowed(j))
            .min_by(|&a, &b| self.distance(asset, a).total_cmp(&self.distance(asset, b)))
    }

    /// Computes `(f1, f2)` for an assignment in a single pass over the assets.
    pub fn evaluate(&self, solution: &Solution) -> Objectives {
        let f1 = solution
            .assignment()
            .iter()
            .enumerate()
            .map(|(asset, &team)| self.distance(asset, team))
            .sum();
        Objectives::new(f1, solution.team_count())
    }

    /// Quantitative constraint violation; zero iff the solution is feasible.
    ///
    /// Sums squared excesses of the team count outside `[1, s_max]`, of each
    /// load above capacity, and of each active load below the minimum.
    pub fn violation(&self, solution: &Solution) -> f64 {
        let mut total = 0.0;

        let teams = solution.team_count();
        if teams == 0 {
            total += 1.0;
        } else if teams > self.max_teams() {
            total += ((teams - self.max_teams()) as f64).powi(2);
        }

        for team in solution.active_teams() {
            let load = solution.load(team);
            if let Some(capacity) = self.limits.capacity {
                if load > capacity {
                    total += ((load - capacity) as f64).powi(2);
                }
            }
            let shortfall = self.limits.min_load - load as f64;
            if shortfall > 0.0 {
                total += shortfall * shortfall;
            }
        }

        total
    }

    pub fn is_feasible(&self, solution: &Solution) -> bool {
        self.violation(solution) == 0.0
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// 4 assets on a line, 2 bases at either end.
    pub(crate) fn tiny_instance() -> Instance {
        let assets = [0.0, 1.0, 9.0, 10.0]
            .iter()
            .enumerate()
            .map(|(id, &x)| Asset {
                id,
                location: Point::new(x, 0.0),
            })
            .collect();
        let bases = vec![
            Base {
                id: 0,
                location: Point::new(0.0, 0.0),
            },
            Base {
                id: 1,
                location: Point::new(10.0, 0.0),
            },
        ];
        Instance::from_coordinates(assets, bases, TeamLimits::new(2)).expect("valid instance")
    }

    /// 10 assets on a 5 x 2 grid, 3 bases along the middle row.
    pub(crate) fn grid_instance() -> Instance {
        let assets = (0..10)
            .map(|id| Asset {
                id,
                location: Point::new((id % 5) as f64 * 10.0, (id / 5) as f64 * 10.0),
            })
            .collect();
        let bases = [0.0, 20.0, 40.0]
            .iter()
            .enumerate()
            .map(|(id, &x)| Base {
                id,
                location: Point::new(x, 5.0),
            })
            .collect();
        Instance::from_coordinates(assets, bases, TeamLimits::new(3)).expect("valid instance")
    }

    #[test]
    fn test_from_coordinates_distances() {
        let inst = tiny_instance();
        assert_eq!(inst.asset_count(), 4);
        assert_eq!(inst.base_count(), 2);
        assert!((inst.distance(1, 0) - 1.0).abs() < 1e-12);
        assert!((inst.distance(1, 1) - 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_evaluate_and_feasibility() {
        let inst = tiny_instance();
        let sol = Solution::from_assignment(&inst, vec![0, 0, 1, 1]).unwrap();
        let obj = inst.evaluate(&sol);
        assert!((obj.f1 - 2.0).abs() < 1e-12);
        assert_eq!(obj.f2, 2);
        assert!(inst.is_feasible(&sol));

        let single = Solution::from_assignment(&inst, vec![0, 0, 0, 0]).unwrap();
        let obj = inst.evaluate(&single);
        assert!((obj.f1 - 20.0).abs() < 1e-12);
        assert_eq!(obj.f2, 1);
    }

    #[test]
    fn test_evaluate_is_deterministic() {
        let inst = tiny_instance();
        let sol = Solution::from_assignment(&inst, vec![1, 0, 1, 0]).unwrap();
        assert_eq!(inst.evaluate(&sol), inst.evaluate(&sol));
    }

    #[test]
    fn test_violation_capacity_and_min_load() {
        let assets: Vec<Asset> = (0..6)
            .map(|id| Asset {
                id,
                location: Point::new(id as f64, 0.0),
            })
            .collect();
        let bases: Vec<Base> = (0..3)
            .map(|id| Base {
                id,
                location: Point::new(id as f64 * 2.0, 1.0),
            })
            .collect();
        let limits = TeamLimits::new(3).with_capacity(3).with_min_load(2.0);
        let inst = Instance::from_coordinates(assets, bases, limits).unwrap();

        // Loads 4 / 1 / 1: one over capacity, two below the minimum.
        let sol = Solution::from_assignment(&inst, vec![0, 0, 0, 0, 1, 2]).unwrap();
        let v = inst.violation(&sol);
        assert!((v - (1.0 + 1.0 + 1.0)).abs() < 1e-12, "got {v}");
        assert!(!inst.is_feasible(&sol));

        let ok = Solution::from_assignment(&inst, vec![0, 0, 1, 1, 2, 2]).unwrap();
        assert_eq!(inst.violation(&ok), 0.0);
    }

    #[test]
    fn test_instance_validation() {
        let inst = Instance::new(vec![], vec![], vec![], TeamLimits::new(1));
        assert!(matches!(inst, Err(ParetoError::InvalidInstance { .. })));

        let assets = vec![Asset {
            id: 0,
            location: Point::new(0.0, 0.0),
        }];
        let bases = vec![Base {
            id: 0,
            location: Point::new(1.0, 0.0),
        }];
        let one = TeamLimits::new(1);
        let bad = Instance::new(assets.clone(), bases.clone(), vec![vec![1.0, 2.0]], one.clone());
        assert!(bad.is_err());

        let negative = Instance::new(assets.clone(), bases.clone(), vec![vec![-1.0]], one.clone());
        assert!(negative.is_err());

        let short = Instance::new(assets, bases, vec![vec![1.0]], one.with_capacity(0));
        assert!(short.is_err());
    }

    #[test]
    fn test_centrality_order() {
        let inst = tiny_instance();
        // Both bases are symmetric; order is still a permutation.
        let mut order = inst.bases_by_centrality().to_vec();
        order.sort_unstable();
        assert_eq!(order, vec![0, 1]);
    }

    #[test]
    fn test_dominance() {
        let a = Objectives::new(1.0, 2);
        let b = Objectives::new(2.0, 2);
        let c = Objectives::new(0.5, 3);
        assert!(a.dominates(&b));
        assert!(!b.dominates(&a));
        assert!(!a.dominates(&c));
        assert!(!c.dominates(&a));
        assert!(!a.dominates(&a));
    }
}
