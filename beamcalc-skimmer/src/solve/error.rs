use thiserror::Error;

use crate::{MalformedInput, Variable};

/// Errors that can occur while solving the skimmer geometry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    #[error("malformed input")]
    Malformed(#[from] MalformedInput),

    #[error("invalid config: {reason}")]
    InvalidConfig { reason: &'static str },

    /// The reduced system is inconsistent, or every branch is inadmissible.
    #[error("the known values admit no solution")]
    NoSolution,

    /// Admissible branches exist but each has a non-positive length.
    #[error("none of the {branches} solution branch(es) has all lengths strictly positive")]
    NoPhysicalSolution { branches: usize },

    /// Some unknowns belong to a free family and cannot be pinned down.
    #[error("under-determined: {} cannot be fixed by the known values", list(.free))]
    Underdetermined { free: Vec<Variable> },
}

fn list(variables: &[Variable]) -> String {
    variables
        .iter()
        .map(|variable| variable.key())
        .collect::<Vec<_>>()
        .join(", ")
}
