//! Crate-level error type.

use std::fmt;

use crate::scalarize::{Method, Scalarization};

/// Errors raised while configuring, running, or aggregating a sweep.
///
/// Per-run infeasibility is recovered by the orchestrator (logged and
/// excluded); every other variant aborts the method's execution.
#[derive(Debug, Clone, PartialEq)]
pub enum ParetoError {
    /// A configuration value is malformed (bounds, counts, rates).
    InvalidConfiguration {
        /// What is wrong and with which field.
        reason: String,
    },

    /// The problem instance is inconsistent (empty, mismatched tables).
    InvalidInstance {
        /// What is wrong with the instance.
        reason: String,
    },

    /// A single VNS run ended without a feasible solution.
    InfeasibleRun {
        /// The scalarization the run was driven with.
        parameter: Scalarization,
    },

    /// The aggregator received no candidates for a method.
    EmptyFront {
        /// The method whose pool was empty.
        method: Method,
    },
}

impl ParetoError {
    pub(crate) fn config(reason: impl Into<String>) -> Self {
        ParetoError::InvalidConfiguration {
            reason: reason.into(),
        }
    }

    pub(crate) fn instance(reason: impl Into<String>) -> Self {
        ParetoError::InvalidInstance {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ParetoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParetoError::InvalidConfiguration { reason } => {
                write!(f, "invalid configuration: {reason}")
            }
            ParetoError::InvalidInstance { reason } => write!(f, "invalid instance: {reason}"),
            ParetoError::InfeasibleRun { parameter } => {
                write!(f, "no feasible solution found for {parameter}")
            }
            ParetoError::EmptyFront { method } => {
                write!(f, "no candidate solutions to aggregate for {method}")
            }
        }
    }
}

impl std::error::Error for ParetoError {}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ParetoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let e = ParetoError::config("f1_max must exceed f1_min");
        assert_eq!(
            e.to_string(),
            "invalid configuration: f1_max must exceed f1_min"
        );

        let e = ParetoError::InfeasibleRun {
            parameter: Scalarization::EpsilonConstraint { epsilon: 1.5 },
        };
        assert!(e.to_string().contains("epsilon"));

        let e = ParetoError::EmptyFront {
            method: Method::WeightedSum,
        };
        assert!(e.to_string().contains("weighted-sum"));
    }
}
