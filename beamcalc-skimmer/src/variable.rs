use std::{fmt, str::FromStr};

use thiserror::Error;

/// A length in the two-stage skimmer geometry, in millimeters.
///
/// The set is closed: external keys map onto these variants through a static
/// table and never create new symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Variable {
    /// Transverse offset of the stage-1 skimmer aperture.
    S1,
    /// Transverse offset of the stage-2 skimmer aperture.
    S2,
    /// Transverse displacement at the reference plane.
    Dx,
    /// Axial distance between the two skimmers.
    D12,
    /// Axial position of the stage-1 skimmer.
    L1,
    /// Axial position of the stage-2 skimmer.
    L2,
    /// Virtual source distance, solved internally and never reported.
    H,
}

const KEYS: [(&str, Variable); 7] = [
    ("s1", Variable::S1),
    ("s2", Variable::S2),
    ("dx", Variable::Dx),
    ("d12", Variable::D12),
    ("l1", Variable::L1),
    ("l2", Variable::L2),
    ("h", Variable::H),
];

impl Variable {
    /// Every variable, in canonical order.
    pub const ALL: [Variable; 7] = [
        Variable::S1,
        Variable::S2,
        Variable::Dx,
        Variable::D12,
        Variable::L1,
        Variable::L2,
        Variable::H,
    ];

    /// The caller-facing variables, in canonical order.
    pub const REPORTED: [Variable; 6] = [
        Variable::S1,
        Variable::S2,
        Variable::Dx,
        Variable::D12,
        Variable::L1,
        Variable::L2,
    ];

    /// Position of this variable in [`Variable::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The external key, such as `"d12"`.
    #[must_use]
    pub const fn key(self) -> &'static str {
        KEYS[self.index()].0
    }

    /// A typeset label for display, such as `"d₁₂"`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Variable::S1 => "s₁",
            Variable::S2 => "s₂",
            Variable::Dx => "Δx",
            Variable::D12 => "d₁₂",
            Variable::L1 => "l₁",
            Variable::L2 => "l₂",
            Variable::H => "h",
        }
    }

    /// Returns true for the virtual source distance `h`.
    #[must_use]
    pub const fn is_internal(self) -> bool {
        matches!(self, Variable::H)
    }

    /// Looks up a variable by its external key.
    ///
    /// Keys are matched exactly after trimming surrounding whitespace.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        KEYS.iter()
            .find(|(candidate, _)| *candidate == key)
            .map(|&(_, variable)| variable)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Returned when a key does not name a skimmer variable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown variable key `{key}`")]
pub struct UnknownVariable {
    pub key: String,
}

impl FromStr for Variable {
    type Err = UnknownVariable;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Variable::from_key(s) {
            Some(variable) => Ok(variable),
            None => Err(UnknownVariable { key: s.to_owned() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip_through_the_table() {
        for variable in Variable::ALL {
            assert_eq!(Variable::from_key(variable.key()), Some(variable));
            assert_eq!(variable.key().parse::<Variable>(), Ok(variable));
        }
    }

    #[test]
    fn index_matches_canonical_order() {
        for (index, variable) in Variable::ALL.iter().enumerate() {
            assert_eq!(variable.index(), index);
        }
    }

    #[test]
    fn only_h_is_internal() {
        assert!(Variable::H.is_internal());
        assert!(Variable::REPORTED.iter().all(|v| !v.is_internal()));
    }

    #[test]
    fn rejects_unknown_keys() {
        assert_eq!(Variable::from_key("__import__"), None);
        assert_eq!(Variable::from_key("S1"), None);
        assert_eq!(
            "l3".parse::<Variable>(),
            Err(UnknownVariable {
                key: "l3".to_owned()
            })
        );
    }

    #[test]
    fn trims_whitespace() {
        assert_eq!(Variable::from_key(" dx "), Some(Variable::Dx));
    }
}
