use std::fmt;

use beamcalc_core::constraint::StrictlyPositive;

use crate::{
    Knowns, Variable,
    system::{Assignment, Relation},
};

use super::Config;

/// One candidate completion of the reduced system.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    values: Assignment,
    verdict: Verdict,
}

/// How a [`Branch`] was judged.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// Every reported unknown is resolved and strictly positive.
    Physical,
    /// A reported unknown is zero or negative.
    Unphysical { variable: Variable, value: f64 },
    /// Some reported unknowns are still free after back-substitution.
    Unresolved { free: Vec<Variable> },
    /// The branch does not satisfy the system at all.
    Inadmissible(Defect),
}

/// Why a branch is inadmissible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Defect {
    /// A relation is violated beyond the residual tolerance.
    Inconsistent { relation: Relation },
    /// A value overflowed or is undefined.
    NonFinite { variable: Variable },
    /// A denominator of a similarity relation vanishes.
    Degenerate { relation: Relation },
}

impl Branch {
    /// Judges a propagated assignment against the caller's knowns.
    pub(crate) fn classify(values: Assignment, knowns: &Knowns, config: &Config) -> Self {
        let verdict = Self::judge(&values, knowns, config);
        Self { values, verdict }
    }

    /// A branch whose back-substitution hit a violated relation.
    pub(crate) fn inconsistent(values: Assignment, relation: Relation) -> Self {
        Self {
            values,
            verdict: Verdict::Inadmissible(Defect::Inconsistent { relation }),
        }
    }

    fn judge(values: &Assignment, knowns: &Knowns, config: &Config) -> Verdict {
        let non_finite = values.iter().find(|(_, value)| !value.is_finite());
        if let Some((variable, _)) = non_finite {
            return Verdict::Inadmissible(Defect::NonFinite { variable });
        }

        for relation in Relation::ALL {
            if relation.has_vanishing_denominator(values, config.degeneracy_tol) {
                return Verdict::Inadmissible(Defect::Degenerate { relation });
            }
        }

        for relation in Relation::ALL {
            if let Some(residual) = relation.residual(values) {
                if !residual.is_negligible(config.residual_tol) {
                    return Verdict::Inadmissible(Defect::Inconsistent { relation });
                }
            }
        }

        let free: Vec<_> = knowns
            .unknowns()
            .filter(|variable| !values.is_known(*variable))
            .collect();
        if !free.is_empty() {
            return Verdict::Unresolved { free };
        }

        for variable in knowns.unknowns() {
            let Some(value) = values.get(variable) else {
                continue;
            };
            if StrictlyPositive::new(value).is_err() {
                return Verdict::Unphysical { variable, value };
            }
        }

        Verdict::Physical
    }

    /// The value of `variable` in this branch, if resolved.
    #[must_use]
    pub fn value(&self, variable: Variable) -> Option<f64> {
        self.values.get(variable)
    }

    /// The virtual source distance of this branch, if resolved.
    #[must_use]
    pub fn h(&self) -> Option<f64> {
        self.value(Variable::H)
    }

    #[must_use]
    pub fn verdict(&self) -> &Verdict {
        &self.verdict
    }

    /// Returns true if every reported length is strictly positive.
    #[must_use]
    pub fn is_physical(&self) -> bool {
        self.verdict == Verdict::Physical
    }

    /// Returns true if the branch satisfies the system, physical or not.
    #[must_use]
    pub fn is_admissible(&self) -> bool {
        matches!(
            self.verdict,
            Verdict::Physical | Verdict::Unphysical { .. }
        )
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Physical => f.write_str("physical"),
            Verdict::Unphysical { variable, value } => {
                write!(f, "unphysical ({variable} = {value})")
            }
            Verdict::Unresolved { free } => {
                f.write_str("unresolved (")?;
                for (index, variable) in free.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{variable}")?;
                }
                f.write_str(" free)")
            }
            Verdict::Inadmissible(Defect::Inconsistent { relation }) => {
                write!(f, "inadmissible (`{relation}` violated)")
            }
            Verdict::Inadmissible(Defect::NonFinite { variable }) => {
                write!(f, "inadmissible ({variable} not finite)")
            }
            Verdict::Inadmissible(Defect::Degenerate { relation }) => {
                write!(f, "inadmissible (`{relation}` has a vanishing denominator)")
            }
        }
    }
}
