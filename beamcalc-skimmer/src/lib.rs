//! Two-stage skimmer geometry for molecular-beam apparatus.
//!
//! The beam line runs from a virtual source through the apertures of two
//! skimmers. Similar triangles relate the transverse offsets `s1`, `s2`, and
//! `dx` to the axial positions `l1`, `l2`, and the virtual source distance `h`:
//!
//! ```text
//! dx / h = s1 / (h - l1)
//! dx / h = s2 / (h - l2)
//! d12    = l1 - l2
//! ```
//!
//! Supply any subset of the caller-facing lengths as [`Knowns`] and call
//! [`solve_unobserved`] (or [`solve`] with an observer) to obtain the rest.
//!
//! ```
//! use beamcalc_skimmer::{Config, Knowns, Variable, solve_unobserved};
//!
//! let knowns = Knowns::new()
//!     .with(Variable::S1, 1.0)
//!     .with(Variable::S2, 2.0)
//!     .with(Variable::D12, 50.0)
//!     .with(Variable::Dx, 3.0);
//!
//! let solution = solve_unobserved(&knowns, &Config::default()).unwrap();
//! assert!((solution.get(Variable::L1).unwrap() - 100.0).abs() < 1e-9);
//! assert!((solution.get(Variable::L2).unwrap() - 50.0).abs() < 1e-9);
//! ```

mod knowns;
mod solve;
mod system;
mod term;
mod variable;

pub use knowns::{Knowns, MalformedInput};
pub use solve::{
    Action, Branch, Config, Defect, Event, Solution, SolveError, Verdict, solve, solve_unobserved,
};
pub use system::{EquationSystem, ReducedSystem, Relation, SKIMMER};
pub use variable::{UnknownVariable, Variable};
