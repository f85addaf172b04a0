//! Solution model.
//!
//! An [`Instance`] holds the immutable problem data (assets, candidate
//! bases, asset-to-base distances, team limits). A [`Solution`] assigns
//! each asset to exactly one team, a team being identified with the base
//! it operates from. The instance evaluates a solution into its two
//! objectives:
//!
//! - `f1`: total distance from each asset to its team's base
//! - `f2`: number of teams in use
//!
//! and measures its constraint violation (team count, capacity, minimum
//! load).

mod instance;
mod solution;

pub use instance::{Asset, Base, Instance, Objectives, Point, TeamLimits};
pub use solution::Solution;

#[cfg(test)]
pub(crate) use instance::tests::{grid_instance, tiny_instance};
