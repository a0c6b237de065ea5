use std::ops::{Add, Mul, Neg, Sub};

/// A value paired with the magnitude of the quantities that produced it.
///
/// The scale lets callers decide whether a result is zero relative to its
/// inputs rather than in absolute terms, so `1e6 - 1e6` and `1e-6 - 1e-6`
/// are both recognized as cancellations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Term {
    pub(crate) value: f64,
    scale: f64,
}

impl Term {
    pub(crate) fn exact(value: f64) -> Self {
        Self {
            value,
            scale: value.abs(),
        }
    }

    /// Returns true if the value is within `tol` of zero relative to its scale.
    pub(crate) fn is_negligible(self, tol: f64) -> bool {
        self.value.abs() <= tol * self.scale
    }

    /// The value divided by its scale, or zero for an exact zero.
    pub(crate) fn relative(self) -> f64 {
        if self.scale > 0.0 {
            self.value.abs() / self.scale
        } else {
            self.value.abs()
        }
    }
}

impl Add for Term {
    type Output = Term;

    fn add(self, rhs: Term) -> Term {
        Term {
            value: self.value + rhs.value,
            scale: self.scale + rhs.scale,
        }
    }
}

impl Sub for Term {
    type Output = Term;

    fn sub(self, rhs: Term) -> Term {
        Term {
            value: self.value - rhs.value,
            scale: self.scale + rhs.scale,
        }
    }
}

impl Mul for Term {
    type Output = Term;

    fn mul(self, rhs: Term) -> Term {
        Term {
            value: self.value * rhs.value,
            scale: self.scale * rhs.scale,
        }
    }
}

impl Neg for Term {
    type Output = Term;

    fn neg(self) -> Term {
        Term {
            value: -self.value,
            scale: self.scale,
        }
    }
}

/// A linear equation `slope·x + intercept = 0` in a single unknown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Linear {
    pub(crate) slope: Term,
    pub(crate) intercept: Term,
}

/// Outcome of solving a [`Linear`] equation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Root {
    Unique(f64),
    /// Every value satisfies the equation.
    Free,
    /// No value satisfies the equation.
    Inconsistent,
}

impl Linear {
    /// Solves for the unknown.
    ///
    /// The slope is compared against `degeneracy_tol` and, when it vanishes,
    /// the intercept against `residual_tol`. A unique root whose intercept is
    /// a cancellation within `degeneracy_tol` of its scale is exactly zero.
    pub(crate) fn root(self, degeneracy_tol: f64, residual_tol: f64) -> Root {
        if !self.slope.is_negligible(degeneracy_tol) {
            if self.intercept.is_negligible(degeneracy_tol) {
                return Root::Unique(0.0);
            }
            return Root::Unique(-self.intercept.value / self.slope.value);
        }
        if self.intercept.is_negligible(residual_tol) {
            Root::Free
        } else {
            Root::Inconsistent
        }
    }
}
