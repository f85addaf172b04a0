//! Fan-out of engine runs over the parameter × repetition grid.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{ParetoError, Result};
use crate::front::{CandidateSolution, FrontAggregator, ParetoFront};
use crate::model::Instance;
use crate::random::derive_seed;
use crate::scalarize::{Method, Scalarization, Scalarizer};
use crate::vns::{solve, VnsConfig};

use super::config::SweepConfig;

/// One independent engine invocation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RunJob {
    pub(crate) scalarizer: Scalarizer,
    pub(crate) repetition: usize,
    pub(crate) seed: u64,
}

impl RunJob {
    fn execute(&self, instance: &Instance, vns: &VnsConfig) -> Result<CandidateSolution> {
        let config = vns.clone().with_seed(self.seed);
        let result = solve(instance, self.scalarizer, &config)?;
        Ok(CandidateSolution {
            objectives: result.best_evaluation.objectives,
            parameter: self.scalarizer.scalarization(),
            repetition: self.repetition,
            seed: self.seed,
            assignment: result.best.into_assignment(),
        })
    }
}

/// Executes every job, in parallel when requested and available.
///
/// Outcomes are returned in job order regardless of scheduling.
pub(crate) fn execute_jobs(
    instance: &Instance,
    vns: &VnsConfig,
    jobs: &[RunJob],
    parallel: bool,
) -> Vec<Result<CandidateSolution>> {
    #[cfg(feature = "parallel")]
    {
        if parallel {
            return jobs.par_iter().map(|job| job.execute(instance, vns)).collect();
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    jobs.iter().map(|job| job.execute(instance, vns)).collect()
}

/// A run that ended without a feasible solution.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InfeasibleRecord {
    pub parameter: Scalarization,
    pub repetition: usize,
    pub seed: u64,
}

/// Everything one method's sweep produced.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SweepReport {
    /// Method swept.
    pub method: Method,
    /// Feasible candidates in grid order (parameter-major).
    pub candidates: Vec<CandidateSolution>,
    /// Runs excluded for infeasibility.
    pub infeasible: Vec<InfeasibleRecord>,
    /// Front over all candidates.
    pub front: ParetoFront,
    aggregator: FrontAggregator,
}

impl SweepReport {
    /// Total runs executed.
    pub fn run_count(&self) -> usize {
        self.candidates.len() + self.infeasible.len()
    }

    /// Front built from a single repetition's candidates.
    ///
    /// # Errors
    ///
    /// Returns [`ParetoError::EmptyFront`] if every run of that repetition
    /// was infeasible or the repetition does not exist.
    pub fn repetition_front(&self, repetition: usize) -> Result<ParetoFront> {
        let pool: Vec<CandidateSolution> = self
            .candidates
            .iter()
            .filter(|c| c.repetition == repetition)
            .cloned()
            .collect();
        self.aggregator.aggregate(self.method, pool)
    }

    /// Mean pairwise overlap between the fronts of distinct repetitions.
    ///
    /// Repetitions without a feasible run are skipped; fewer than two
    /// usable repetitions yield `None`.
    pub fn mean_repetition_overlap(&self) -> Option<f64> {
        let repetitions = self
            .candidates
            .iter()
            .map(|c| c.repetition)
            .max()
            .map_or(0, |r| r + 1);
        let fronts: Vec<ParetoFront> = (0..repetitions)
            .filter_map(|r| self.repetition_front(r).ok())
            .collect();

        let mut total = 0.0;
        let mut pairs = 0usize;
        for (i, a) in fronts.iter().enumerate() {
            for b in &fronts[i + 1..] {
                total += a.overlap(b);
                pairs += 1;
            }
        }
        (pairs > 0).then(|| total / pairs as f64)
    }
}

/// Runs the parameter sweep of one or more methods.
pub struct SweepRunner;

impl SweepRunner {
    /// Sweeps `config.method` over its grid and aggregates the front.
    ///
    /// Each parameter value is run `repetitions` times with seeds derived
    /// from `base_seed`; runs share only the read-only instance.
    ///
    /// # Errors
    ///
    /// - [`ParetoError::InvalidConfiguration`] before any run starts.
    /// - [`ParetoError::EmptyFront`] if every run was infeasible.
    ///
    /// Infeasible runs are logged, recorded in the report, and excluded.
    pub fn run(instance: &Instance, config: &SweepConfig) -> Result<SweepReport> {
        config.validate()?;
        let method = config.method;
        let grid = method.grid(&config.bounds, config.grid_points);

        let mut jobs = Vec::with_capacity(config.run_count());
        for (point, parameter) in grid.iter().enumerate() {
            let scalarizer = Scalarizer::new(*parameter, config.bounds)?
                .with_epsilon_handling(config.epsilon_handling);
            for repetition in 0..config.repetitions {
                let cell = (point * config.repetitions + repetition) as u64;
                jobs.push(RunJob {
                    scalarizer,
                    repetition,
                    seed: derive_seed(config.base_seed, cell),
                });
            }
        }

        log::info!(
            "{method}: {} parameter values x {} repetitions = {} runs",
            grid.len(),
            config.repetitions,
            jobs.len()
        );

        let outcomes = execute_jobs(instance, &config.vns, &jobs, config.parallel);

        let mut candidates = Vec::with_capacity(jobs.len());
        let mut infeasible = Vec::new();
        for (job, outcome) in jobs.iter().zip(outcomes) {
            match outcome {
                Ok(candidate) => candidates.push(candidate),
                Err(ParetoError::InfeasibleRun { parameter }) => {
                    log::warn!(
                        "{method}: no feasible solution for {parameter}, repetition {}",
                        job.repetition
                    );
                    infeasible.push(InfeasibleRecord {
                        parameter,
                        repetition: job.repetition,
                        seed: job.seed,
                    });
                }
                Err(e) => return Err(e),
            }
        }

        let aggregator = FrontAggregator::new(config.front_size).with_backfill(config.backfill);
        let front = aggregator.aggregate(method, candidates.clone())?;

        log::info!(
            "{method}: {} feasible, {} infeasible, front of {}",
            candidates.len(),
            infeasible.len(),
            front.len()
        );

        Ok(SweepReport {
            method,
            candidates,
            infeasible,
            front,
            aggregator,
        })
    }

    /// Sweeps each method in turn with otherwise identical settings.
    pub fn run_methods(
        instance: &Instance,
        config: &SweepConfig,
        methods: &[Method],
    ) -> Result<Vec<SweepReport>> {
        methods
            .iter()
            .map(|&method| Self::run(instance, &config.clone().with_method(method)))
            .collect()
    }
}
