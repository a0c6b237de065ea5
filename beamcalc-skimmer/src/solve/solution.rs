use std::collections::BTreeMap;

use beamcalc_core::constraint::{Constrained, StrictlyPositive};

use crate::{Knowns, Variable};

use super::Branch;

/// The solved unknowns of a successful solve, in millimeters.
///
/// Contains exactly the caller-facing variables that were not known, each
/// strictly positive. The internal variable `h` is never included.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    values: BTreeMap<Variable, Constrained<f64, StrictlyPositive>>,
}

impl Solution {
    /// Collects the reported unknowns of a branch.
    ///
    /// Returns `None` if any of them is missing or not strictly positive.
    pub(super) fn from_branch(branch: &Branch, knowns: &Knowns) -> Option<Self> {
        let values = knowns
            .unknowns()
            .map(|variable| {
                let value = branch.value(variable)?;
                StrictlyPositive::new(value)
                    .ok()
                    .map(|value| (variable, value))
            })
            .collect::<Option<_>>()?;
        Some(Self { values })
    }

    /// Returns the solved value of `variable`, if it was an unknown.
    #[must_use]
    pub fn get(&self, variable: Variable) -> Option<f64> {
        self.values.get(&variable).map(Constrained::get)
    }

    /// Iterates over the solved values in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Variable, f64)> + '_ {
        self.values
            .iter()
            .map(|(&variable, value)| (variable, value.get()))
    }

    /// The solved variables in canonical order.
    pub fn variables(&self) -> impl Iterator<Item = Variable> + '_ {
        self.values.keys().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if every caller-facing variable was already known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Copies the solved values into a plain map.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<Variable, f64> {
        self.iter().collect()
    }
}
