//! The fixed equation model of the two-stage skimmer geometry.
//!
//! [`SKIMMER`] holds the three relations. Reducing it against a [`Knowns`]
//! assignment substitutes every known value and leaves the rest symbolic.

mod assignment;
mod relation;

use std::fmt;

use log::debug;

pub(crate) use assignment::Assignment;
pub use relation::Relation;

use crate::{Knowns, Variable};

/// An immutable system of relations over the skimmer variables.
#[derive(Debug)]
pub struct EquationSystem {
    relations: [Relation; 3],
}

/// The skimmer geometry: two similarity relations and one separation relation.
pub static SKIMMER: EquationSystem = EquationSystem {
    relations: Relation::ALL,
};

impl EquationSystem {
    #[must_use]
    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    /// Substitutes the known values into every relation.
    ///
    /// A value for the internal variable `h` is ignored.
    #[must_use]
    pub fn reduce(&self, knowns: &Knowns) -> ReducedSystem<'_> {
        if knowns.contains(Variable::H) {
            debug!("ignoring known value for internal variable `h`");
        }
        let reduced = ReducedSystem {
            system: self,
            values: Assignment::from_knowns(knowns),
        };
        debug!("reduced system: {reduced}");
        reduced
    }
}

/// An [`EquationSystem`] with known values substituted.
#[derive(Debug, Clone)]
pub struct ReducedSystem<'a> {
    system: &'a EquationSystem,
    values: Assignment,
}

impl ReducedSystem<'_> {
    /// Returns the substituted value of `variable`, if it was known.
    #[must_use]
    pub fn value(&self, variable: Variable) -> Option<f64> {
        self.values.get(variable)
    }

    /// The variables still symbolic, including `h`, in canonical order.
    #[must_use]
    pub fn unknowns(&self) -> Vec<Variable> {
        self.values.unknowns().collect()
    }

    /// The symbolic variables of one relation.
    #[must_use]
    pub fn unknowns_of(&self, relation: Relation) -> Vec<Variable> {
        relation
            .variables()
            .iter()
            .copied()
            .filter(|variable| !self.values.is_known(*variable))
            .collect()
    }

    pub fn relations(&self) -> &[Relation] {
        self.system.relations()
    }

    pub(crate) fn assignment(&self) -> Assignment {
        self.values
    }
}

impl fmt::Display for ReducedSystem<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, relation) in self.relations().iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            relation.write_substituted(f, Some(&self.values))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduction_substitutes_knowns() {
        let knowns = Knowns::new()
            .with(Variable::S1, 1.0)
            .with(Variable::S2, 2.0)
            .with(Variable::D12, 50.0);

        let reduced = SKIMMER.reduce(&knowns);

        assert_eq!(reduced.value(Variable::S1), Some(1.0));
        assert_eq!(reduced.value(Variable::Dx), None);
        assert_eq!(
            reduced.unknowns(),
            vec![Variable::Dx, Variable::L1, Variable::L2, Variable::H]
        );
        assert_eq!(
            reduced.unknowns_of(Relation::Separation),
            vec![Variable::L1, Variable::L2]
        );
        assert_eq!(
            reduced.to_string(),
            "dx / h = 1 / (h - l1); dx / h = 2 / (h - l2); 50 = l1 - l2"
        );
    }

    #[test]
    fn reduction_ignores_h() {
        let knowns = Knowns::new()
            .with(Variable::H, 150.0)
            .with(Variable::L1, 100.0);

        let reduced = SKIMMER.reduce(&knowns);

        assert_eq!(reduced.value(Variable::H), None);
        assert_eq!(
            reduced.unknowns_of(Relation::StageOne),
            vec![Variable::Dx, Variable::S1, Variable::H]
        );
    }

    #[test]
    fn empty_knowns_leave_everything_symbolic() {
        let reduced = SKIMMER.reduce(&Knowns::new());
        assert_eq!(reduced.unknowns(), Variable::ALL.to_vec());
        let symbolic = SKIMMER
            .relations()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        assert_eq!(reduced.to_string(), symbolic);
    }
}
