//! Run orchestration.
//!
//! A sweep generates a uniform grid of scalarization parameters for one
//! method, runs the VNS engine `repetitions` times per parameter with
//! independent seeds, records infeasible runs, and hands every feasible
//! candidate to the [`FrontAggregator`](crate::front::FrontAggregator).
//!
//! Runs share only the read-only [`Instance`](crate::model::Instance);
//! with the `parallel` feature they execute on the rayon pool, and results
//! do not depend on scheduling.
//!
//! [`estimate_bounds`] provides the objective ranges a sweep needs from
//! single-objective runs.

mod config;
mod mono;
mod runner;

pub use config::SweepConfig;
pub use mono::{estimate_bounds, BoundEstimate, RunStatistics};
pub use runner::{InfeasibleRecord, SweepReport, SweepRunner};
