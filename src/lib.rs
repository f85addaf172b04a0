//! Bi-objective team assignment by scalarized Variable Neighborhood Search.
//!
//! Assets are assigned to maintenance teams operating from candidate
//! bases, minimizing two conflicting objectives:
//!
//! - `f1`: total asset-to-base distance
//! - `f2`: number of teams in use
//!
//! The trade-off front is approximated by driving a single-objective VNS
//! repeatedly with scalarized objectives:
//!
//! - **Model** ([`model`]): instances, assignments, objectives, constraint
//!   violation.
//! - **Neighborhoods** ([`neighborhood`]): shift/consolidate shakes and a
//!   Variable Neighborhood Descent over shift, swap, relocate and
//!   consolidate moves.
//! - **Scalarization** ([`scalarize`]): weighted-sum and
//!   epsilon-constraint fitness with feasibility-first comparison.
//! - **VNS** ([`vns`]): the generic engine and the assignment problem.
//! - **Sweep** ([`sweep`]): parameter grids × repetitions, run in parallel,
//!   plus the mono-objective bound estimation.
//! - **Front** ([`front`]): non-dominated sorting and crowding-distance
//!   selection into a fixed-size front.
//!
//! # Example
//!
//! ```no_run
//! use u_pareto::model::{Asset, Base, Instance, Point, TeamLimits};
//! use u_pareto::scalarize::Method;
//! use u_pareto::sweep::{estimate_bounds, SweepConfig, SweepRunner};
//! use u_pareto::vns::VnsConfig;
//!
//! let assets = (0..30)
//!     .map(|id| Asset { id, location: Point::new((id % 6) as f64, (id / 6) as f64) })
//!     .collect();
//! let bases = (0..5)
//!     .map(|id| Base { id, location: Point::new(id as f64 * 1.25, 2.0) })
//!     .collect();
//! let instance = Instance::from_coordinates(assets, bases, TeamLimits::new(5))?;
//!
//! let estimate = estimate_bounds(&instance, &VnsConfig::default(), 5, 1, true)?;
//! let config = SweepConfig::new(Method::EpsilonConstraint, estimate.bounds);
//! let report = SweepRunner::run(&instance, &config)?;
//! for point in report.front.iter() {
//!     println!("f1 = {:.2}, f2 = {}", point.f1(), point.f2());
//! }
//! # Ok::<(), u_pareto::ParetoError>(())
//! ```

pub mod error;
pub mod front;
pub mod model;
pub mod neighborhood;
pub mod random;
pub mod scalarize;
pub mod sweep;
pub mod vns;

pub use error::{ParetoError, Result};
