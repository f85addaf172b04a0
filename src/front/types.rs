//! Candidate records and the published front.

use crate::model::Objectives;
use crate::scalarize::{Method, Scalarization};

/// The outcome of one completed VNS run.
///
/// Tagged with the parameter and repetition that produced it. Read-only
/// once created.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CandidateSolution {
    /// `(f1, f2)` of the run's best solution.
    pub objectives: Objectives,
    /// Scalarization parameter of the run.
    pub parameter: Scalarization,
    /// Repetition index within the parameter's runs.
    pub repetition: usize,
    /// Seed the run was started from.
    pub seed: u64,
    /// Asset-to-team mapping of the best solution.
    pub assignment: Vec<usize>,
}

impl CandidateSolution {
    pub fn f1(&self) -> f64 {
        self.objectives.f1
    }

    pub fn f2(&self) -> usize {
        self.objectives.f2
    }
}

/// A published approximation of the Pareto front for one method.
///
/// No member dominates another, members are ordered by increasing `f1`,
/// and the front is never empty. Points taken from rank 1 to pad a short
/// front are kept apart in [`ParetoFront::backfill`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParetoFront {
    method: Method,
    members: Vec<CandidateSolution>,
    backfill: Vec<CandidateSolution>,
}

impl ParetoFront {
    pub(crate) fn new(
        method: Method,
        members: Vec<CandidateSolution>,
        backfill: Vec<CandidateSolution>,
    ) -> Self {
        Self {
            method,
            members,
            backfill,
        }
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// Mutually non-dominated members, ordered by `f1`.
    pub fn members(&self) -> &[CandidateSolution] {
        &self.members
    }

    /// Rank-1 points added when the front was shorter than its target.
    pub fn backfill(&self) -> &[CandidateSolution] {
        &self.backfill
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CandidateSolution> {
        self.members.iter()
    }

    /// Objective points of the members.
    pub fn objectives(&self) -> Vec<Objectives> {
        self.members.iter().map(|c| c.objectives).collect()
    }

    /// Share of this front's objective points also present in `other`.
    ///
    /// Used to compare fronts from independent repetitions.
    pub fn overlap(&self, other: &ParetoFront) -> f64 {
        if self.members.is_empty() {
            return 0.0;
        }
        let shared = self
            .members
            .iter()
            .filter(|a| other.members.iter().any(|b| a.objectives == b.objectives))
            .count();
        shared as f64 / self.members.len() as f64
    }
}

impl<'a> IntoIterator for &'a ParetoFront {
    type Item = &'a CandidateSolution;
    type IntoIter = std::slice::Iter<'a, CandidateSolution>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}
