//! Random perturbation operators used for shaking.

use rand::seq::index;
use rand::Rng;

use crate::model::{Instance, Solution};

/// Lower end of the shake intensity range (reached as `level -> 0`).
const INTENSITY_FLOOR: f64 = 0.2;
/// Width of the shake intensity range.
const INTENSITY_SPAN: f64 = 0.6;
/// Fraction of assets perturbed per unit of intensity.
const PERTURBED_FRACTION: f64 = 0.15;
/// Minimum number of assets moved by a shift shake (before the n/3 cap).
const MIN_PERTURBATIONS: usize = 5;
/// Number of nearest active teams considered for a biased shift.
const NEAR_CANDIDATES: usize = 3;
/// Probability that a shifted asset goes to one of its nearest teams.
const NEAR_BIAS: f64 = 0.7;

/// The two perturbation families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShakeOperator {
    /// Move individual assets to other (or newly opened) teams.
    Shift,
    /// Close whole teams, reassigning their assets to the nearest survivors.
    Consolidate,
}

/// Intensity of shake level `level` out of `levels` (1-based).
///
/// Rises linearly from just above 0.2 to 0.8 at the last level.
pub fn intensity(level: usize, levels: usize) -> f64 {
    INTENSITY_FLOOR + INTENSITY_SPAN * level as f64 / levels.max(1) as f64
}

/// Number of assets a shift shake moves at the given intensity.
pub fn perturbation_count(asset_count: usize, intensity: f64) -> usize {
    let cap = (asset_count / 3).max(1);
    let scaled = (asset_count as f64 * intensity * PERTURBED_FRACTION) as usize;
    scaled.max(MIN_PERTURBATIONS).min(cap)
}

/// Shift shake: moves `count` distinct random assets.
///
/// With probability `activation_rate` (and only while fewer than s_max
/// teams are active) an asset opens the nearest unused base; otherwise it
/// moves to one of its nearest active teams, or with lower probability to
/// any active team.
pub fn shift<R: Rng>(
    instance: &Instance,
    solution: &mut Solution,
    count: usize,
    activation_rate: f64,
    rng: &mut R,
) {
    let n = solution.asset_count();
    let picked = index::sample(rng, n, count.min(n));

    for asset in picked.iter() {
        let current = solution.team_of(asset);

        if solution.team_count() < instance.max_teams() && rng.random_bool(activation_rate) {
            if let Some(base) = instance.nearest_base(asset, |j| !solution.is_active(j)) {
                solution.move_asset(asset, base);
                continue;
            }
        }

        let mut targets: Vec<usize> = solution.active_teams().filter(|&t| t != current).collect();
        if targets.is_empty() {
            continue;
        }
        if rng.random_bool(NEAR_BIAS) {
            targets.sort_by(|&a, &b| {
                instance
                    .distance(asset, a)
                    .total_cmp(&instance.distance(asset, b))
            });
            targets.truncate(NEAR_CANDIDATES);
        }
        let target = targets[rng.random_range(0..targets.len())];
        solution.move_asset(asset, target);
    }
}

/// Consolidate shake: closes up to `count` random teams, always keeping one.
pub fn consolidate<R: Rng>(
    instance: &Instance,
    solution: &mut Solution,
    count: usize,
    rng: &mut R,
) {
    for _ in 0..count {
        if solution.team_count() <= 1 {
            break;
        }
        let active: Vec<usize> = solution.active_teams().collect();
        let team = active[rng.random_range(0..active.len())];
        dissolve_team(instance, solution, team);
    }
}

/// Reassigns every member of `team` to its nearest other active team.
///
/// Returns `false` (leaving the solution untouched) when `team` is inactive
/// or is the only active team.
pub fn dissolve_team(instance: &Instance, solution: &mut Solution, team: usize) -> bool {
    if !solution.is_active(team) || solution.team_count() <= 1 {
        return false;
    }
    for asset in solution.members(team) {
        if let Some(target) = instance.nearest_base(asset, |j| j != team && solution.is_active(j)) {
            solution.move_asset(asset, target);
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Asset, Base, Point, TeamLimits};
    use crate::random::create_rng;

    fn grid_instance(max_teams: usize) -> Instance {
        let assets = (0..12)
            .map(|id| Asset {
                id,
                location: Point::new((id % 4) as f64, (id / 4) as f64),
            })
            .collect();
        let bases = (0..4)
            .map(|id| Base {
                id,
                location: Point::new(id as f64, 1.5),
            })
            .collect();
        Instance::from_coordinates(assets, bases, TeamLimits::new(max_teams)).unwrap()
    }

    #[test]
    fn test_intensity_levels() {
        assert!((intensity(1, 3) - 0.4).abs() < 1e-12);
        assert!((intensity(3, 3) - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_perturbation_count_caps() {
        assert_eq!(perturbation_count(125, 0.6), 11);
        assert_eq!(perturbation_count(125, 0.4), 7);
        assert_eq!(perturbation_count(20, 0.4), 5);
        assert_eq!(perturbation_count(10, 0.8), 3);
        assert_eq!(perturbation_count(2, 0.8), 1);
    }

    #[test]
    fn test_shift_respects_team_limit() {
        let inst = grid_instance(2);
        let mut rng = create_rng(3);
        let mut sol = Solution::nearest(&inst, &[0, 3]).unwrap();
        for _ in 0..50 {
            shift(&inst, &mut sol, 4, 1.0, &mut rng);
            assert!(sol.team_count() >= 1 && sol.team_count() <= 2);
            assert_eq!(sol.assignment().len(), 12);
        }
    }

    #[test]
    fn test_shift_can_open_team() {
        let inst = grid_instance(4);
        let mut rng = create_rng(11);
        let mut sol = Solution::nearest(&inst, &[0]).unwrap();
        shift(&inst, &mut sol, 4, 1.0, &mut rng);
        assert!(sol.team_count() > 1);
    }

    #[test]
    fn test_consolidate_keeps_one_team() {
        let inst = grid_instance(4);
        let mut rng = create_rng(5);
        let mut sol = Solution::nearest(&inst, &[0, 1, 2, 3]).unwrap();
        assert_eq!(sol.team_count(), 4);
        consolidate(&inst, &mut sol, 10, &mut rng);
        assert_eq!(sol.team_count(), 1);
    }

    #[test]
    fn test_dissolve_team_goes_to_nearest() {
        let inst = grid_instance(4);
        let mut sol = Solution::nearest(&inst, &[0, 1, 3]).unwrap();
        assert!(dissolve_team(&inst, &mut sol, 1));
        assert!(!sol.is_active(1));
        // Column-1 assets sit at x = 1, closer to base 0 (x = 0) than base 3.
        for asset in [1, 5, 9] {
            assert_eq!(sol.team_of(asset), 0);
        }
        assert!(!dissolve_team(&inst, &mut sol, 1));
    }
}
