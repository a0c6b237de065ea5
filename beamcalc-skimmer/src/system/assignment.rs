use crate::{Knowns, Variable};

/// Working values for all seven variables during a solve.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct Assignment([Option<f64>; 7]);

impl Assignment {
    /// Seeds the assignment with the caller's knowns, skipping `h`.
    pub(crate) fn from_knowns(knowns: &Knowns) -> Self {
        let mut assignment = Self::default();
        for (variable, value) in knowns.iter().filter(|(v, _)| !v.is_internal()) {
            assignment.set(variable, value);
        }
        assignment
    }

    pub(crate) fn get(&self, variable: Variable) -> Option<f64> {
        self.0[variable.index()]
    }

    pub(crate) fn set(&mut self, variable: Variable, value: f64) {
        self.0[variable.index()] = Some(value);
    }

    pub(crate) fn is_known(&self, variable: Variable) -> bool {
        self.get(variable).is_some()
    }

    /// Iterates over the variables without a value, in canonical order.
    pub(crate) fn unknowns(&self) -> impl Iterator<Item = Variable> + '_ {
        Variable::ALL
            .into_iter()
            .filter(|variable| !self.is_known(*variable))
    }

    /// Iterates over the assigned values, in canonical order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (Variable, f64)> + '_ {
        Variable::ALL
            .into_iter()
            .filter_map(|variable| Some((variable, self.get(variable)?)))
    }
}
