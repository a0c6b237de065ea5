//! Solving the skimmer geometry for its unknowns.
//!
//! Known values are substituted and propagated through every relation that
//! has a single unknown. If the virtual source distance `h` is still unknown
//! afterwards, the remaining coupling is reduced to a polynomial in `h` whose
//! real roots, in ascending order, seed the candidate branches. Each branch is
//! completed by propagation and classified; the first physical one wins.

mod branch;
mod config;
mod error;
mod pivot;
mod propagate;
mod solution;

pub use branch::{Branch, Defect, Verdict};
pub use config::Config;
pub use error::SolveError;
pub use solution::Solution;

use beamcalc_core::Observer;
use log::debug;

use crate::{Knowns, Variable, system::SKIMMER};

use pivot::{Pivot, Roots};
use propagate::propagate;

/// Control actions supported by the skimmer solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Treat a physical branch as unphysical.
    Reject,
}

/// Event emitted once per enumerated branch, in ascending order of `h`.
#[derive(Debug)]
pub struct Event<'a> {
    /// Zero-based position of the branch in the enumeration.
    pub index: usize,
    /// The classified branch.
    pub branch: &'a Branch,
}

/// Solves the skimmer geometry for every caller-facing variable not in `knowns`.
///
/// Observers see every enumerated branch and may reject physical ones.
///
/// # Errors
///
/// Returns [`SolveError::Malformed`] or [`SolveError::InvalidConfig`] before
/// solving, and otherwise [`SolveError::NoSolution`],
/// [`SolveError::NoPhysicalSolution`], or [`SolveError::Underdetermined`]
/// when no branch is both resolved and physical.
pub fn solve<Obs>(
    knowns: &Knowns,
    config: &Config,
    mut observer: Obs,
) -> Result<Solution, SolveError>
where
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    config
        .validate()
        .map_err(|reason| SolveError::InvalidConfig { reason })?;
    knowns.validate()?;

    let mut values = SKIMMER.reduce(knowns).assignment();

    if let Err(violation) = propagate(&mut values, config) {
        debug!(
            "known values violate `{}` (relative residual {:e})",
            violation.relation, violation.residual
        );
        return Err(SolveError::NoSolution);
    }

    let candidates = if values.is_known(Variable::H) {
        vec![values]
    } else {
        match Pivot::find(&values).and_then(|pivot| {
            debug!("pivot on h: {pivot:?}");
            pivot.polynomial(&values)
        }) {
            Some(polynomial) => match polynomial.roots(config) {
                Roots::Finite(roots) => {
                    debug!("pivot roots: {roots:?}");
                    roots
                        .into_iter()
                        .map(|h| {
                            let mut seeded = values;
                            seeded.set(Variable::H, h);
                            seeded
                        })
                        .collect()
                }
                Roots::Free => vec![values],
            },
            None => vec![values],
        }
    };

    let branches: Vec<Branch> = candidates
        .into_iter()
        .map(|mut values| match propagate(&mut values, config) {
            Ok(()) => Branch::classify(values, knowns, config),
            Err(violation) => Branch::inconsistent(values, violation.relation),
        })
        .collect();

    let mut rejected = vec![false; branches.len()];
    for (index, branch) in branches.iter().enumerate() {
        let h = branch.h();
        debug!("branch {index} (h = {h:?}): {}", branch.verdict());
        if let Some(Action::Reject) = observer.observe(&Event { index, branch }) {
            rejected[index] = true;
        }
    }

    select(&branches, &rejected, knowns)
}

/// Solves the skimmer geometry without observation.
///
/// # Errors
///
/// See [`solve`].
pub fn solve_unobserved(knowns: &Knowns, config: &Config) -> Result<Solution, SolveError> {
    solve(knowns, config, ())
}

/// Picks the first physical branch, or the most informative failure.
fn select(
    branches: &[Branch],
    rejected: &[bool],
    knowns: &Knowns,
) -> Result<Solution, SolveError> {
    let physical = branches
        .iter()
        .zip(rejected)
        .find(|&(branch, &rejected)| !rejected && branch.is_physical());
    if let Some((branch, _)) = physical {
        return Solution::from_branch(branch, knowns).ok_or(SolveError::NoSolution);
    }

    let free = branches.iter().find_map(|branch| match branch.verdict() {
        Verdict::Unresolved { free } => Some(free.clone()),
        _ => None,
    });
    if let Some(free) = free {
        return Err(SolveError::Underdetermined { free });
    }

    let admissible = branches.iter().filter(|b| b.is_admissible()).count();
    match admissible {
        0 => Err(SolveError::NoSolution),
        branches => Err(SolveError::NoPhysicalSolution { branches }),
    }
}
