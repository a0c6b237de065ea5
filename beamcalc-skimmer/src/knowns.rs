use std::collections::BTreeMap;

use beamcalc_core::constraint::{ConstraintError, NonNegative};
use log::warn;
use thiserror::Error;

use crate::Variable;

/// Caller-supplied values for a subset of the skimmer variables, in millimeters.
///
/// Entries are kept in canonical variable order, so two assignments built from
/// the same pairs compare equal regardless of insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Knowns {
    values: BTreeMap<Variable, f64>,
}

/// Input rejected before any solving takes place.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MalformedInput {
    /// The virtual source distance `h` was supplied as a known value.
    #[error("`h` is solved internally and cannot be supplied as a known value")]
    InternalVariable,

    /// A text key that does not name a skimmer variable.
    #[error("unknown variable key `{key}`")]
    UnknownKey { key: String },

    /// A known value is NaN or infinite.
    #[error("known value for `{variable}` is not finite: {value}")]
    NonFinite { variable: Variable, value: f64 },

    /// A known length is negative.
    #[error("known value for `{variable}` must not be negative: {value}")]
    Negative { variable: Variable, value: f64 },
}

impl Knowns {
    /// Creates an empty assignment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an assignment from text keys such as `"l1"`.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedInput::UnknownKey`] for a key outside the variable table.
    pub fn from_entries<'a, I>(entries: I) -> Result<Self, MalformedInput>
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        entries
            .into_iter()
            .map(|(key, value)| {
                Variable::from_key(key)
                    .map(|variable| (variable, value))
                    .ok_or_else(|| MalformedInput::UnknownKey {
                        key: key.to_owned(),
                    })
            })
            .collect()
    }

    /// Returns the assignment with `variable` set to `value`.
    #[must_use]
    pub fn with(mut self, variable: Variable, value: f64) -> Self {
        self.insert(variable, value);
        self
    }

    /// Sets a known value, returning the previous one if present.
    pub fn insert(&mut self, variable: Variable, value: f64) -> Option<f64> {
        self.values.insert(variable, value)
    }

    /// Returns the known value of `variable`, if any.
    #[must_use]
    pub fn get(&self, variable: Variable) -> Option<f64> {
        self.values.get(&variable).copied()
    }

    #[must_use]
    pub fn contains(&self, variable: Variable) -> bool {
        self.values.contains_key(&variable)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over the known values in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Variable, f64)> + '_ {
        self.values
            .iter()
            .map(|(&variable, &value)| (variable, value))
    }

    /// Iterates over the caller-facing variables without a known value.
    pub fn unknowns(&self) -> impl Iterator<Item = Variable> + '_ {
        Variable::REPORTED
            .into_iter()
            .filter(|variable| !self.contains(*variable))
    }

    /// Checks that every entry is a finite, non-negative caller-facing length.
    ///
    /// # Errors
    ///
    /// Returns the first [`MalformedInput`] found, in canonical order.
    pub fn validate(&self) -> Result<(), MalformedInput> {
        for (variable, value) in self.iter() {
            if variable.is_internal() {
                warn!("rejecting `{variable}` supplied as a known value");
                return Err(MalformedInput::InternalVariable);
            }

            if !value.is_finite() {
                warn!("rejecting non-finite `{variable}` = {value}");
                return Err(MalformedInput::NonFinite { variable, value });
            }

            NonNegative::new(value).map_err(|error| {
                warn!("rejecting `{variable}` = {value}: {error}");
                match error {
                    ConstraintError::NotANumber => MalformedInput::NonFinite { variable, value },
                    _ => MalformedInput::Negative { variable, value },
                }
            })?;
        }
        Ok(())
    }
}

impl FromIterator<(Variable, f64)> for Knowns {
    fn from_iter<I: IntoIterator<Item = (Variable, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insertion_order_does_not_matter() {
        let a = Knowns::new()
            .with(Variable::L2, 50.0)
            .with(Variable::S1, 1.0)
            .with(Variable::D12, 50.0);
        let b = Knowns::new()
            .with(Variable::D12, 50.0)
            .with(Variable::L2, 50.0)
            .with(Variable::S1, 1.0);

        assert_eq!(a, b);
        assert_eq!(
            a.iter().map(|(v, _)| v).collect::<Vec<_>>(),
            vec![Variable::S1, Variable::D12, Variable::L2]
        );
    }

    #[test]
    fn unknowns_are_the_missing_reported_variables() {
        let knowns = Knowns::new()
            .with(Variable::S1, 1.0)
            .with(Variable::S2, 2.0)
            .with(Variable::D12, 50.0);

        assert_eq!(
            knowns.unknowns().collect::<Vec<_>>(),
            vec![Variable::Dx, Variable::L1, Variable::L2]
        );
    }

    #[test]
    fn parses_text_keys() {
        let knowns = Knowns::from_entries([("s1", 1.0), ("d12", 50.0)]).unwrap();
        assert_eq!(knowns.get(Variable::S1), Some(1.0));
        assert_eq!(knowns.get(Variable::D12), Some(50.0));
        assert_eq!(knowns.get(Variable::Dx), None);

        let error = Knowns::from_entries([("s1", 1.0), ("os.system", 0.0)]).unwrap_err();
        assert_eq!(
            error,
            MalformedInput::UnknownKey {
                key: "os.system".to_owned()
            }
        );
    }

    #[test]
    fn validate_rejects_internal_variable() {
        let knowns = Knowns::new().with(Variable::H, 10.0);
        assert_eq!(knowns.validate(), Err(MalformedInput::InternalVariable));
    }

    #[test]
    fn validate_rejects_negative_and_non_finite_values() {
        let negative = Knowns::new().with(Variable::S1, -1.0);
        assert_eq!(
            negative.validate(),
            Err(MalformedInput::Negative {
                variable: Variable::S1,
                value: -1.0
            })
        );

        let infinite = Knowns::new().with(Variable::L1, f64::INFINITY);
        assert!(matches!(
            infinite.validate(),
            Err(MalformedInput::NonFinite {
                variable: Variable::L1,
                ..
            })
        ));

        let nan = Knowns::new().with(Variable::Dx, f64::NAN);
        assert!(matches!(
            nan.validate(),
            Err(MalformedInput::NonFinite {
                variable: Variable::Dx,
                ..
            })
        ));
    }

    #[test]
    fn validate_accepts_zero_and_empty() {
        assert_eq!(Knowns::new().validate(), Ok(()));
        assert_eq!(Knowns::new().with(Variable::L2, 0.0).validate(), Ok(()));
    }
}
