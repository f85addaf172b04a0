//! Assignment of assets to teams.

use crate::error::{ParetoError, Result};

use super::instance::Instance;

/// A complete assignment: every asset belongs to exactly one team.
///
/// Per-team loads and the active team count are maintained alongside the
/// assignment so that moves can be applied and undone in O(1).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    assignment: Vec<usize>,
    loads: Vec<usize>,
    active: usize,
}

impl Solution {
    /// Builds a solution from an explicit asset-to-team mapping.
    ///
    /// # Errors
    ///
    /// Fails if the mapping does not cover every asset, references an
    /// unknown base, or activates more than s_max teams.
    pub fn from_assignment(instance: &Instance, assignment: Vec<usize>) -> Result<Self> {
        if assignment.len() != instance.asset_count() {
            return Err(ParetoError::instance(format!(
                "assignment covers {} of {} assets",
                assignment.len(),
                instance.asset_count()
            )));
        }
        let mut loads = vec![0usize; instance.base_count()];
        for (asset, &team) in assignment.iter().enumerate() {
            if team >= loads.len() {
                return Err(ParetoError::instance(format!(
                    "asset {asset} assigned to unknown team {team}"
                )));
            }
            loads[team] += 1;
        }
        let active = loads.iter().filter(|&&l| l > 0).count();
        if active > instance.max_teams() {
            return Err(ParetoError::instance(format!(
                "{active} active teams exceed the limit of {}",
                instance.max_teams()
            )));
        }
        Ok(Self {
            assignment,
            loads,
            active,
        })
    }

    /// Assigns every asset to its nearest base among `teams`.
    ///
    /// Teams that attract no asset stay inactive.
    ///
    /// # Errors
    ///
    /// Fails if `teams` is empty, references an unknown base, or names
    /// more than s_max distinct teams.
    pub fn nearest(instance: &Instance, teams: &[usize]) -> Result<Self> {
        if teams.is_empty() {
            return Err(ParetoError::config("at least one team must be opened"));
        }
        if let Some(&t) = teams.iter().find(|&&t| t >= instance.base_count()) {
            return Err(ParetoError::instance(format!("unknown team {t}")));
        }
        let mut distinct = teams.to_vec();
        distinct.sort_unstable();
        distinct.dedup();
        if distinct.len() > instance.max_teams() {
            return Err(ParetoError::config(format!(
                "{} teams requested, limit is {}",
                distinct.len(),
                instance.max_teams()
            )));
        }
        Ok(Self::assign_nearest(instance, &distinct))
    }

    /// Nearest-team assignment for a non-empty, in-range team list.
    pub(crate) fn assign_nearest(instance: &Instance, teams: &[usize]) -> Self {
        debug_assert!(!teams.is_empty());
        let mut loads = vec![0usize; instance.base_count()];
        let assignment: Vec<usize> = (0..instance.asset_count())
            .map(|asset| {
                let team = instance
                    .nearest_base(asset, |j| teams.contains(&j))
                    .unwrap_or(teams[0]);
                loads[team] += 1;
                team
            })
            .collect();
        let active = loads.iter().filter(|&&l| l > 0).count();
        Self {
            assignment,
            loads,
            active,
        }
    }

    /// The full asset-to-team mapping.
    pub fn assignment(&self) -> &[usize] {
        &self.assignment
    }

    /// Consumes the solution, returning its mapping.
    pub fn into_assignment(self) -> Vec<usize> {
        self.assignment
    }

    #[inline]
    pub fn team_of(&self, asset: usize) -> usize {
        self.assignment[asset]
    }

    #[inline]
    pub fn load(&self, team: usize) -> usize {
        self.loads[team]
    }

    #[inline]
    pub fn is_active(&self, team: usize) -> bool {
        self.loads[team] > 0
    }

    /// Number of teams with at least one asset (f2).
    #[inline]
    pub fn team_count(&self) -> usize {
        self.active
    }

    pub fn asset_count(&self) -> usize {
        self.assignment.len()
    }

    pub fn active_teams(&self) -> impl Iterator<Item = usize> + '_ {
        self.loads
            .iter()
            .enumerate()
            .filter(|(_, &l)| l > 0)
            .map(|(team, _)| team)
    }

    pub fn inactive_teams(&self) -> impl Iterator<Item = usize> + '_ {
        self.loads
            .iter()
            .enumerate()
            .filter(|(_, &l)| l == 0)
            .map(|(team, _)| team)
    }

    /// Assets currently covered by `team`.
    pub fn members(&self, team: usize) -> Vec<usize> {
        self.assignment
            .iter()
            .enumerate()
            .filter(|(_, &t)| t == team)
            .map(|(asset, _)| asset)
            .collect()
    }

    /// Reassigns `asset` to `team` and returns its previous team.
    pub fn move_asset(&mut self, asset: usize, team: usize) -> usize {
        let previous = self.assignment[asset];
        if previous == team {
            return previous;
        }
        self.loads[previous] -= 1;
        if self.loads[previous] == 0 {
            self.active -= 1;
        }
        if self.loads[team] == 0 {
            self.active += 1;
        }
        self.loads[team] += 1;
        self.assignment[asset] = team;
        previous
    }

    /// Moves every member of `from` to `to`, deactivating `from`.
    pub fn relocate_team(&mut self, from: usize, to: usize) {
        for asset in self.members(from) {
            self.move_asset(asset, to);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::instance::tests::tiny_instance;

    #[test]
    fn test_from_assignment_counts() {
        let inst = tiny_instance();
        let sol = Solution::from_assignment(&inst, vec![0, 0, 1, 0]).unwrap();
        assert_eq!(sol.load(0), 3);
        assert_eq!(sol.load(1), 1);
        assert_eq!(sol.team_count(), 2);
        assert_eq!(sol.members(0), vec![0, 1, 3]);
    }

    #[test]
    fn test_from_assignment_rejects_bad_input() {
        let inst = tiny_instance();
        assert!(Solution::from_assignment(&inst, vec![0, 0, 1]).is_err());
        assert!(Solution::from_assignment(&inst, vec![0, 0, 1, 5]).is_err());
    }

    #[test]
    fn test_move_asset_tracks_active_count() {
        let inst = tiny_instance();
        let mut sol = Solution::from_assignment(&inst, vec![0, 0, 0, 1]).unwrap();
        assert_eq!(sol.team_count(), 2);

        let prev = sol.move_asset(3, 0);
        assert_eq!(prev, 1);
        assert_eq!(sol.team_count(), 1);
        assert!(!sol.is_active(1));

        sol.move_asset(3, prev);
        assert_eq!(sol.team_count(), 2);
        assert_eq!(sol.assignment(), &[0, 0, 0, 1]);
    }

    #[test]
    fn test_nearest_assignment() {
        let inst = tiny_instance();
        let sol = Solution::nearest(&inst, &[0, 1]).unwrap();
        assert_eq!(sol.assignment(), &[0, 0, 1, 1]);

        let single = Solution::nearest(&inst, &[1]).unwrap();
        assert_eq!(single.team_count(), 1);
        assert!(Solution::nearest(&inst, &[]).is_err());
    }

    #[test]
    fn test_relocate_team() {
        let inst = tiny_instance();
        let mut sol = Solution::from_assignment(&inst, vec![0, 0, 0, 0]).unwrap();
        sol.relocate_team(0, 1);
        assert_eq!(sol.assignment(), &[1, 1, 1, 1]);
        assert_eq!(sol.team_count(), 1);
    }
}
