use std::fmt;

use crate::{
    Variable,
    term::{Linear, Term},
};

use super::Assignment;

/// One of the three fixed relations of the skimmer geometry.
///
/// The similarity relations state that the beam line through the virtual
/// source passes through each skimmer aperture. The separation relation ties
/// the two axial positions to the inter-skimmer distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Relation {
    /// `dx / h = s1 / (h - l1)`
    StageOne,
    /// `dx / h = s2 / (h - l2)`
    StageTwo,
    /// `d12 = l1 - l2`
    Separation,
}

impl Relation {
    pub const ALL: [Relation; 3] = [Relation::StageOne, Relation::StageTwo, Relation::Separation];

    /// The variables appearing in this relation.
    #[must_use]
    pub const fn variables(self) -> &'static [Variable] {
        match self {
            Relation::StageOne => &[Variable::Dx, Variable::S1, Variable::L1, Variable::H],
            Relation::StageTwo => &[Variable::Dx, Variable::S2, Variable::L2, Variable::H],
            Relation::Separation => &[Variable::D12, Variable::L1, Variable::L2],
        }
    }

    /// The `(offset, position)` pair of the skimmer a similarity relation describes.
    #[must_use]
    pub const fn aperture(self) -> Option<(Variable, Variable)> {
        match self {
            Relation::StageOne => Some((Variable::S1, Variable::L1)),
            Relation::StageTwo => Some((Variable::S2, Variable::L2)),
            Relation::Separation => None,
        }
    }

    /// Returns true if `variable` appears in this relation.
    #[must_use]
    pub fn involves(self, variable: Variable) -> bool {
        self.variables().contains(&variable)
    }

    /// Cleared-denominator residual: `dx·(h − l) − s·h` or `d12 − l1 + l2`.
    ///
    /// Returns `None` unless every variable of the relation has a value.
    pub(crate) fn residual(self, values: &Assignment) -> Option<Term> {
        let value = |variable| values.get(variable).map(Term::exact);

        match self.aperture() {
            Some((offset, position)) => {
                let dx = value(Variable::Dx)?;
                let h = value(Variable::H)?;
                let s = value(offset)?;
                let l = value(position)?;
                Some(dx * (h - l) - s * h)
            }
            None => {
                let d12 = value(Variable::D12)?;
                let l1 = value(Variable::L1)?;
                let l2 = value(Variable::L2)?;
                Some(d12 - l1 + l2)
            }
        }
    }

    /// Rearranges the relation as `slope·target + intercept = 0`.
    ///
    /// Returns `None` if `target` does not appear in the relation or any other
    /// variable of the relation lacks a value.
    pub(crate) fn isolate(self, target: Variable, values: &Assignment) -> Option<Linear> {
        if !self.involves(target) {
            return None;
        }
        let value = |variable: Variable| {
            if variable == target {
                Some(Term::exact(0.0))
            } else {
                values.get(variable).map(Term::exact)
            }
        };
        let one = Term::exact(1.0);

        let (slope, intercept) = match self.aperture() {
            Some((offset, position)) => {
                let dx = value(Variable::Dx)?;
                let h = value(Variable::H)?;
                let s = value(offset)?;
                let l = value(position)?;
                match target {
                    Variable::Dx => (h - l, -(s * h)),
                    Variable::H => (dx - s, -(dx * l)),
                    t if t == offset => (-h, dx * (h - l)),
                    _ => (-dx, dx * h - s * h),
                }
            }
            None => {
                let d12 = value(Variable::D12)?;
                let l1 = value(Variable::L1)?;
                let l2 = value(Variable::L2)?;
                match target {
                    Variable::D12 => (one, l2 - l1),
                    Variable::L1 => (-one, d12 + l2),
                    _ => (one, d12 - l1),
                }
            }
        };

        Some(Linear { slope, intercept })
    }

    /// The displacement a similarity relation fixes before `h` is known.
    ///
    /// With `s = 0` the relation reads `dx·(h − l) = 0`, and with `l = 0` it
    /// reads `(dx − s)·h = 0`. Since neither `h` nor `h − l` may vanish, `dx`
    /// is `0` or `s` for every admissible `h`. Returns `None` unless `dx` and
    /// `h` are both unknown and the offset or the position is exactly zero.
    #[allow(clippy::float_cmp)]
    pub(crate) fn forced_displacement(self, values: &Assignment) -> Option<f64> {
        let (offset, position) = self.aperture()?;
        if values.is_known(Variable::Dx) || values.is_known(Variable::H) {
            return None;
        }
        let s = values.get(offset)?;
        let l = values.get(position)?;

        if s == 0.0 {
            Some(0.0)
        } else if l == 0.0 {
            Some(s)
        } else {
            None
        }
    }

    /// Returns true if a denominator of the uncleared form vanishes.
    ///
    /// Only similarity relations have denominators (`h` and `h − l`), and
    /// both `h` and the skimmer position must have values to be checked.
    pub(crate) fn has_vanishing_denominator(self, values: &Assignment, tol: f64) -> bool {
        let Some((_, position)) = self.aperture() else {
            return false;
        };
        let (Some(h), Some(l)) = (values.get(Variable::H), values.get(position)) else {
            return false;
        };
        let scale = h.abs() + l.abs();
        h.abs() <= tol * scale || (h - l).abs() <= tol * scale
    }

    /// Writes the relation with every valued variable replaced by its value.
    pub(crate) fn write_substituted(
        self,
        f: &mut fmt::Formatter<'_>,
        values: Option<&Assignment>,
    ) -> fmt::Result {
        let sym = |f: &mut fmt::Formatter<'_>, variable: Variable| match values
            .and_then(|values| values.get(variable))
        {
            Some(value) => write!(f, "{value}"),
            None => write!(f, "{variable}"),
        };

        match self.aperture() {
            Some((offset, position)) => {
                sym(f, Variable::Dx)?;
                f.write_str(" / ")?;
                sym(f, Variable::H)?;
                f.write_str(" = ")?;
                sym(f, offset)?;
                f.write_str(" / (")?;
                sym(f, Variable::H)?;
                f.write_str(" - ")?;
                sym(f, position)?;
                f.write_str(")")
            }
            None => {
                sym(f, Variable::D12)?;
                f.write_str(" = ")?;
                sym(f, Variable::L1)?;
                f.write_str(" - ")?;
                sym(f, Variable::L2)
            }
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_substituted(f, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::Knowns;

    fn assignment(pairs: &[(Variable, f64)]) -> Assignment {
        let mut assignment = Assignment::default();
        for &(variable, value) in pairs {
            assignment.set(variable, value);
        }
        assignment
    }

    #[test]
    fn renders_symbolically() {
        assert_eq!(Relation::StageOne.to_string(), "dx / h = s1 / (h - l1)");
        assert_eq!(Relation::StageTwo.to_string(), "dx / h = s2 / (h - l2)");
        assert_eq!(Relation::Separation.to_string(), "d12 = l1 - l2");
    }

    #[test]
    fn residuals_vanish_on_the_reference_geometry() {
        let values = assignment(&[
            (Variable::S1, 1.0),
            (Variable::S2, 2.0),
            (Variable::Dx, 3.0),
            (Variable::D12, 50.0),
            (Variable::L1, 100.0),
            (Variable::L2, 50.0),
            (Variable::H, 150.0),
        ]);

        for relation in Relation::ALL {
            let residual = relation.residual(&values).unwrap();
            assert!(residual.is_negligible(1e-12), "{relation}: {residual:?}");
        }
    }

    #[test]
    fn residual_needs_every_variable() {
        let values = Assignment::from_knowns(&Knowns::new().with(Variable::D12, 50.0));
        assert!(Relation::Separation.residual(&values).is_none());
    }

    #[test]
    fn isolates_every_variable_of_a_similarity_relation() {
        let full = [
            (Variable::S1, 1.0),
            (Variable::Dx, 3.0),
            (Variable::L1, 100.0),
            (Variable::H, 150.0),
        ];

        for (index, &(target, expected)) in full.iter().enumerate() {
            let others: Vec<_> = full
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != index)
                .map(|(_, pair)| *pair)
                .collect();
            let linear = Relation::StageOne
                .isolate(target, &assignment(&others))
                .unwrap();
            let root = -linear.intercept.value / linear.slope.value;
            assert_relative_eq!(root, expected, max_relative = 1e-12);
        }
    }

    #[test]
    fn isolates_every_variable_of_the_separation_relation() {
        let full = [
            (Variable::D12, 50.0),
            (Variable::L1, 100.0),
            (Variable::L2, 50.0),
        ];

        for (index, &(target, expected)) in full.iter().enumerate() {
            let others: Vec<_> = full
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != index)
                .map(|(_, pair)| *pair)
                .collect();
            let linear = Relation::Separation
                .isolate(target, &assignment(&others))
                .unwrap();
            let root = -linear.intercept.value / linear.slope.value;
            assert_relative_eq!(root, expected);
        }
    }

    #[test]
    fn isolate_rejects_foreign_targets_and_missing_values() {
        let values = assignment(&[(Variable::L1, 100.0)]);
        let separation = Relation::Separation;
        assert!(separation.isolate(Variable::Dx, &values).is_none());
        assert!(separation.isolate(Variable::D12, &values).is_none());
    }

    #[test]
    fn zero_offset_or_position_fixes_the_displacement() {
        let centred = assignment(&[(Variable::S1, 0.0), (Variable::L1, 100.0)]);
        assert_eq!(Relation::StageOne.forced_displacement(&centred), Some(0.0));

        let at_reference = assignment(&[(Variable::S2, 2.0), (Variable::L2, 0.0)]);
        let stage_two = Relation::StageTwo;
        assert_eq!(stage_two.forced_displacement(&at_reference), Some(2.0));

        let regular = assignment(&[(Variable::S1, 1.0), (Variable::L1, 100.0)]);
        assert_eq!(Relation::StageOne.forced_displacement(&regular), None);

        let with_h = assignment(&[
            (Variable::S1, 0.0),
            (Variable::L1, 100.0),
            (Variable::H, 150.0),
        ]);
        assert_eq!(Relation::StageOne.forced_displacement(&with_h), None);
        assert_eq!(Relation::Separation.forced_displacement(&centred), None);
    }

    #[test]
    fn detects_vanishing_denominators() {
        let at_source = assignment(&[(Variable::H, 0.0), (Variable::L1, 100.0)]);
        let stage_one = Relation::StageOne;
        assert!(stage_one.has_vanishing_denominator(&at_source, 1e-12));

        let at_skimmer = assignment(&[(Variable::H, 100.0), (Variable::L1, 100.0)]);
        assert!(stage_one.has_vanishing_denominator(&at_skimmer, 1e-12));

        let regular = assignment(&[(Variable::H, 150.0), (Variable::L1, 100.0)]);
        assert!(!stage_one.has_vanishing_denominator(&regular, 1e-12));

        let separation = Relation::Separation;
        assert!(!separation.has_vanishing_denominator(&at_source, 1e-12));
    }
}
