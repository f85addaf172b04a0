//! Improving neighborhoods and Variable Neighborhood Descent.
//!
//! Every neighborhood scans all of its moves and returns the best one
//! (best improvement) under the feasibility-first comparison of
//! [`Evaluation::beats`]. Asset-level moves are scored with an in-place
//! apply/undo on a working copy; only the chosen move is materialized.

use crate::model::{Instance, Objectives, Solution};
use crate::scalarize::{Evaluation, Scalarizer};

use super::shake::dissolve_team;

/// Improving neighborhood structures, in VND order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Descent {
    /// Move one asset to another team, possibly opening an unused base.
    Shift,
    /// Exchange the teams of two assets.
    Swap,
    /// Move a whole team to an unused base.
    Relocate,
    /// Close one team, sending its assets to the nearest remaining teams.
    Consolidate,
}

impl Descent {
    /// The neighborhood sequence explored by [`variable_neighborhood_descent`].
    pub const ORDER: [Descent; 4] = [
        Descent::Shift,
        Descent::Swap,
        Descent::Relocate,
        Descent::Consolidate,
    ];

    /// Best move in this neighborhood if it beats `current`.
    pub fn improve(
        &self,
        instance: &Instance,
        scalarizer: &Scalarizer,
        solution: &Solution,
        current: &Evaluation,
    ) -> Option<(Solution, Evaluation)> {
        match self {
            Descent::Shift => best_shift(instance, scalarizer, solution, current),
            Descent::Swap => best_swap(instance, scalarizer, solution, current),
            Descent::Relocate => best_relocate(instance, scalarizer, solution, current),
            Descent::Consolidate => best_consolidate(instance, scalarizer, solution, current),
        }
    }
}

/// Variable Neighborhood Descent over [`Descent::ORDER`].
///
/// Restarts from the first neighborhood after every improvement and stops
/// when no neighborhood improves or after `max_steps` improvements.
pub fn variable_neighborhood_descent(
    instance: &Instance,
    scalarizer: &Scalarizer,
    solution: Solution,
    max_steps: usize,
) -> (Solution, Evaluation) {
    let mut current = solution;
    let mut eval = scalarizer.score(instance, &current);
    let mut l = 0;
    let mut steps = 0;

    while l < Descent::ORDER.len() && steps < max_steps {
        let neighborhood = Descent::ORDER[l];
        match neighborhood.improve(instance, scalarizer, &current, &eval) {
            Some((next, next_eval)) if next_eval.beats(&eval) => {
                log::trace!(
                    "vnd {:?}: fitness {:.6} -> {:.6}",
                    neighborhood,
                    eval.fitness,
                    next_eval.fitness
                );
                current = next;
                eval = next_eval;
                steps += 1;
                l = 0;
            }
            _ => l += 1,
        }
    }

    (current, eval)
}

fn best_shift(
    instance: &Instance,
    scalarizer: &Scalarizer,
    solution: &Solution,
    current: &Evaluation,
) -> Option<(Solution, Evaluation)> {
    let mut work = solution.clone();
    let mut best: Option<(usize, usize, Evaluation)> = None;
    let base_f1 = current.objectives.f1;
    let at_limit = work.team_count() >= instance.max_teams();

    for asset in 0..work.asset_count() {
        let from = work.team_of(asset);
        for to in 0..instance.base_count() {
            if to == from {
                continue;
            }
            // Opening a base is only allowed if the count stays within s_max.
            if !work.is_active(to) && at_limit && work.load(from) > 1 {
                continue;
            }
            work.move_asset(asset, to);
            let f1 = base_f1 - instance.distance(asset, from) + instance.distance(asset, to);
            let eval = scalarizer.evaluate(
                Objectives::new(f1, work.team_count()),
                instance.violation(&work),
            );
            work.move_asset(asset, from);

            let incumbent = best.as_ref().map_or(current, |b| &b.2);
            if eval.beats(incumbent) {
                best = Some((asset, to, eval));
            }
        }
    }

    best.map(|(asset, to, _)| {
        let mut next = solution.clone();
        next.move_asset(asset, to);
        let eval = scalarizer.score(instance, &next);
        (next, eval)
    })
}

fn best_swap(
    instance: &Instance,
    scalarizer: &Scalarizer,
    solution: &Solution,
    current: &Evaluation,
) -> Option<(Solution, Evaluation)> {
    // Loads are unchanged by a swap, so only f1 moves.
    let violation = instance.violation(solution);
    let f2 = solution.team_count();
    let base_f1 = current.objectives.f1;
    let mut best: Option<(usize, usize, Evaluation)> = None;

    let n = solution.asset_count();
    for a in 0..n {
        let ta = solution.team_of(a);
        for b in (a + 1)..n {
            let tb = solution.team_of(b);
            if ta == tb {
                continue;
            }
            let delta = instance.distance(a, tb) + instance.distance(b, ta)
                - instance.distance(a, ta)
                - instance.distance(b, tb);
            if delta >= 0.0 {
                continue;
            }
            let eval = scalarizer.evaluate(Objectives::new(base_f1 + delta, f2), violation);
            let incumbent = best.as_ref().map_or(current, |m| &m.2);
            if eval.beats(incumbent) {
                best = Some((a, b, eval));
            }
        }
    }

    best.map(|(a, b, _)| {
        let mut next = solution.clone();
        let ta = next.team_of(a);
        let tb = next.team_of(b);
        next.move_asset(a, tb);
        next.move_asset(b, ta);
        let eval = scalarizer.score(instance, &next);
        (next, eval)
    })
}

fn best_relocate(
    instance: &Instance,
    scalarizer: &Scalarizer,
    solution: &Solution,
    current: &Evaluation,
) -> Option<(Solution, Evaluation)> {
    let active: Vec<usize> = solution.active_teams().collect();
    let unused: Vec<usize> = solution.inactive_teams().collect();
    let mut best: Option<(Solution, Evaluation)> = None;

    for &from in &active {
        for &to in &unused {
            let mut candidate = solution.clone();
            candidate.relocate_team(from, to);
            let eval = scalarizer.score(instance, &candidate);
            let incumbent = best.as_ref().map_or(current, |b| &b.1);
            if eval.beats(incumbent) {
                best = Some((candidate, eval));
            }
        }
    }

    best
}

fn best_consolidate(
    instance: &Instance,
    scalarizer: &Scalarizer,
    solution: &Solution,
    current: &Evaluation,
) -> Option<(Solution, Evaluation)> {
    if solution.team_count() <= 1 {
        return None;
    }
    let mut best: Option<(Solution, Evaluation)> = None;

    for team in solution.active_teams() {
        let mut candidate = solution.clone();
        if !dissolve_team(instance, &mut candidate, team) {
            continue;
        }
        let eval = scalarizer.score(instance, &candidate);
        let incumbent = best.as_ref().map_or(current, |b| &b.1);
        if eval.beats(incumbent) {
            best = Some((candidate, eval));
        }
    }

    best
}
