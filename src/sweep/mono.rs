//! Mono-objective phase: objective ranges for normalization and the
//! epsilon grid.

use crate::error::{ParetoError, Result};
use crate::front::CandidateSolution;
use crate::model::Instance;
use crate::random::derive_seed;
use crate::scalarize::{ObjectiveBounds, Scalarization, Scalarizer};
use crate::vns::VnsConfig;

use super::runner::{execute_jobs, RunJob};

/// Summary of one objective over repeated runs.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunStatistics {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Population standard deviation.
    pub std: f64,
}

impl RunStatistics {
    /// Statistics of `samples`, or `None` if empty.
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let n = samples.len() as f64;
        let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
        let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = samples.iter().sum::<f64>() / n;
        let var = samples.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        Some(Self {
            min,
            max,
            mean,
            std: var.sqrt(),
        })
    }
}

/// Outcome of [`estimate_bounds`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundEstimate {
    /// Payoff-table bounds: each minimum from its own optimization, each
    /// maximum from the other objective's optimum.
    pub bounds: ObjectiveBounds,
    /// `f1` over the distance-minimizing runs.
    pub distance: RunStatistics,
    /// `f2` over the team-minimizing runs.
    pub teams: RunStatistics,
    /// Best distance-minimizing run.
    pub distance_optimum: CandidateSolution,
    /// Best team-minimizing run.
    pub teams_optimum: CandidateSolution,
}

/// Runs the engine on each objective alone and derives objective bounds.
///
/// `repetitions` runs minimize `f1` (weights `(1, 0)`) and as many minimize
/// `f2` (weights `(0, 1)`). `f1_max` is the largest `f1` among the
/// team-minimizing runs that reached the fewest teams; `f2_max` the
/// largest `f2` among the distance-minimizing runs.
///
/// # Errors
///
/// - [`ParetoError::InvalidConfiguration`] for zero repetitions or an
///   invalid engine config.
/// - [`ParetoError::InfeasibleRun`] if no run of one objective is feasible.
/// - [`ParetoError::InvalidInstance`] if the objectives do not conflict, so
///   no range can be formed.
pub fn estimate_bounds(
    instance: &Instance,
    vns: &VnsConfig,
    repetitions: usize,
    base_seed: u64,
    parallel: bool,
) -> Result<BoundEstimate> {
    if repetitions == 0 {
        return Err(ParetoError::config("repetitions must be at least 1"));
    }
    vns.validate()?;

    let scratch = scratch_bounds(instance);
    let distance_first = Scalarization::WeightedSum { w1: 1.0, w2: 0.0 };
    let teams_first = Scalarization::WeightedSum { w1: 0.0, w2: 1.0 };

    let mut jobs = Vec::with_capacity(2 * repetitions);
    for (side, parameter) in [distance_first, teams_first].into_iter().enumerate() {
        let scalarizer = Scalarizer::new(parameter, scratch)?;
        for repetition in 0..repetitions {
            jobs.push(RunJob {
                scalarizer,
                repetition,
                seed: derive_seed(base_seed, (side * repetitions + repetition) as u64),
            });
        }
    }

    log::info!("mono-objective phase: {} runs per objective", repetitions);

    let outcomes = execute_jobs(instance, vns, &jobs, parallel);
    let mut distance_runs = Vec::with_capacity(repetitions);
    let mut team_runs = Vec::with_capacity(repetitions);
    for (i, outcome) in outcomes.into_iter().enumerate() {
        match outcome {
            Ok(candidate) if i < repetitions => distance_runs.push(candidate),
            Ok(candidate) => team_runs.push(candidate),
            Err(ParetoError::InfeasibleRun { parameter }) => {
                log::warn!("mono-objective run {parameter} is infeasible");
            }
            Err(e) => return Err(e),
        }
    }

    let f1_samples: Vec<f64> = distance_runs.iter().map(|c| c.f1()).collect();
    let f2_samples: Vec<f64> = team_runs.iter().map(|c| c.f2() as f64).collect();
    let (Some(distance), Some(teams)) = (
        RunStatistics::from_samples(&f1_samples),
        RunStatistics::from_samples(&f2_samples),
    ) else {
        let parameter = if distance_runs.is_empty() {
            distance_first
        } else {
            teams_first
        };
        return Err(ParetoError::InfeasibleRun { parameter });
    };

    let (Some(distance_optimum), Some(teams_optimum)) = (
        distance_runs
            .iter()
            .min_by(|a, b| a.f1().total_cmp(&b.f1()))
            .cloned(),
        team_runs
            .iter()
            .min_by(|a, b| a.f2().cmp(&b.f2()).then(a.f1().total_cmp(&b.f1())))
            .cloned(),
    ) else {
        return Err(ParetoError::InfeasibleRun {
            parameter: distance_first,
        });
    };

    let f1_max = team_runs
        .iter()
        .filter(|c| c.f2() == teams_optimum.f2())
        .map(|c| c.f1())
        .fold(f64::NEG_INFINITY, f64::max);
    let f2_max = distance_runs
        .iter()
        .map(|c| c.f2())
        .max()
        .unwrap_or(distance_optimum.f2()) as f64;

    let bounds = ObjectiveBounds::new(distance.min, f1_max, teams.min, f2_max);
    if let Err(e) = bounds.validate() {
        return Err(ParetoError::instance(format!(
            "objectives do not conflict on this instance ({e})"
        )));
    }

    log::info!(
        "bounds: f1 in [{:.3}, {:.3}], f2 in [{}, {}]",
        bounds.f1_min,
        bounds.f1_max,
        bounds.f2_min,
        bounds.f2_max
    );

    Ok(BoundEstimate {
        bounds,
        distance,
        teams,
        distance_optimum,
        teams_optimum,
    })
}

/// Loose bounds valid for any assignment, used only to scale the
/// single-objective runs.
fn scratch_bounds(instance: &Instance) -> ObjectiveBounds {
    let worst: f64 = (0..instance.asset_count())
        .map(|a| {
            (0..instance.base_count())
                .map(|b| instance.distance(a, b))
                .fold(0.0, f64::max)
        })
        .sum();
    ObjectiveBounds::new(0.0, worst.max(1.0), 0.0, instance.max_teams() as f64)
}
