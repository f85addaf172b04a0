//! Neighborhood operators over assignments.
//!
//! Two kinds of operators act on a [`Solution`](crate::model::Solution):
//!
//! - **Shake** operators ([`shift`], [`consolidate`]) randomly perturb a
//!   solution at a given intensity. Shift moves individual assets to other
//!   (or newly opened) teams and mainly trades on `f1`; Consolidate closes
//!   whole teams and mainly trades on `f2`.
//! - **Descent** neighborhoods ([`Descent`]) deterministically search for
//!   the best improving move under a scalarized fitness, chained by
//!   [`variable_neighborhood_descent`].
//!
//! Every operator returns a complete assignment: no asset is ever left
//! without a team, and the active team count stays within `[1, s_max]`.
//!
//! # References
//!
//! - Hansen, P. & Mladenović, N. (2001). "Variable neighborhood search:
//!   Principles and applications", *European Journal of Operational Research* 130(3), 449-467.

mod descent;
mod shake;

pub use descent::{variable_neighborhood_descent, Descent};
pub use shake::{
    consolidate, dissolve_team, intensity, perturbation_count, shift, ShakeOperator,
};

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::model::{Asset, Base, Instance, Point, Solution, TeamLimits};
    use crate::random::create_rng;
    use crate::scalarize::{ObjectiveBounds, Scalarization, Scalarizer};
    use proptest::prelude::*;

    fn instance(assets: &[(f64, f64)], bases: &[(f64, f64)], max_teams: usize) -> Instance {
        let assets = assets
            .iter()
            .enumerate()
            .map(|(id, &(x, y))| Asset {
                id,
                location: Point::new(x, y),
            })
            .collect();
        let bases = bases
            .iter()
            .enumerate()
            .map(|(id, &(x, y))| Base {
                id,
                location: Point::new(x, y),
            })
            .collect();
        Instance::from_coordinates(assets, bases, TeamLimits::new(max_teams)).unwrap()
    }

    fn assert_complete(inst: &Instance, sol: &Solution) {
        assert_eq!(sol.assignment().len(), inst.asset_count());
        assert!(sol.assignment().iter().all(|&t| t < inst.base_count()));
        let loads: usize = (0..inst.base_count()).map(|t| sol.load(t)).sum();
        assert_eq!(loads, inst.asset_count());
        assert!(sol.team_count() >= 1);
        assert!(sol.team_count() <= inst.max_teams());
    }

    proptest! {
        #[test]
        fn shake_preserves_assignment_invariants(
            assets in prop::collection::vec((0.0f64..100.0, 0.0f64..100.0), 1..30),
            bases in prop::collection::vec((0.0f64..100.0, 0.0f64..100.0), 1..8),
            max_teams in 1usize..6,
            seed in any::<u64>(),
            level in 1usize..=3,
        ) {
            let inst = instance(&assets, &bases, max_teams);
            let mut rng = create_rng(seed);
            let first = inst.bases_by_centrality()[0];
            let mut sol = Solution::nearest(&inst, &[first]).unwrap();

            for _ in 0..5 {
                let count = perturbation_count(inst.asset_count(), intensity(level, 3));
                shift(&inst, &mut sol, count, 0.5, &mut rng);
                assert_complete(&inst, &sol);
                consolidate(&inst, &mut sol, level, &mut rng);
                assert_complete(&inst, &sol);
            }
        }

        #[test]
        fn descent_preserves_assignment_invariants(
            assets in prop::collection::vec((0.0f64..100.0, 0.0f64..100.0), 1..15),
            bases in prop::collection::vec((0.0f64..100.0, 0.0f64..100.0), 1..5),
            max_teams in 1usize..4,
            w1 in 0.0f64..=1.0,
        ) {
            let inst = instance(&assets, &bases, max_teams);
            let scalarizer = Scalarizer::new(
                Scalarization::WeightedSum { w1, w2: 1.0 - w1 },
                ObjectiveBounds::new(0.0, 1000.0, 1.0, 5.0),
            ).unwrap();
            let first = inst.bases_by_centrality()[0];
            let start = Solution::nearest(&inst, &[first]).unwrap();
            let before = scalarizer.score(&inst, &start);

            let (sol, after) = variable_neighborhood_descent(&inst, &scalarizer, start, 50);
            assert_complete(&inst, &sol);
            prop_assert!(!before.beats(&after));
        }
    }
}
