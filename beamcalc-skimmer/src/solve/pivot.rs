use crate::{
    Variable,
    system::Assignment,
    term::{Linear, Root, Term},
};

use super::Config;

/// A coupling of the similarity relations that propagation cannot untangle.
///
/// Each variant eliminates every unknown except `h`, leaving a polynomial
/// whose real roots are the candidate branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Pivot {
    /// Offsets and positions known; `dx` and `h` shared by both similarity relations.
    ///
    /// `(s1 − s2)·h² + (s2·l1 − s1·l2)·h = 0`, whose root `h = 0` is spurious.
    SharedDisplacement,
    /// Offsets, `dx`, and `d12` known; both positions unknown.
    ///
    /// `(s2 − s1)·h − dx·d12 = 0`.
    KnownSeparation,
}

impl Pivot {
    /// Recognizes the coupling left after propagation, if any.
    pub(crate) fn find(values: &Assignment) -> Option<Self> {
        let known = |variables: &[Variable]| variables.iter().all(|v| values.is_known(*v));
        let unknown = |variables: &[Variable]| variables.iter().all(|v| !values.is_known(*v));

        if !unknown(&[Variable::H]) || !known(&[Variable::S1, Variable::S2]) {
            return None;
        }

        if known(&[Variable::L1, Variable::L2]) && unknown(&[Variable::Dx]) {
            Some(Pivot::SharedDisplacement)
        } else if known(&[Variable::Dx, Variable::D12]) && unknown(&[Variable::L1, Variable::L2])
        {
            Some(Pivot::KnownSeparation)
        } else {
            None
        }
    }

    /// The pivot polynomial in `h`.
    pub(crate) fn polynomial(self, values: &Assignment) -> Option<Quadratic> {
        let value = |variable| values.get(variable).map(Term::exact);
        let s1 = value(Variable::S1)?;
        let s2 = value(Variable::S2)?;

        match self {
            Pivot::SharedDisplacement => {
                let l1 = value(Variable::L1)?;
                let l2 = value(Variable::L2)?;
                Some(Quadratic {
                    a: s1 - s2,
                    b: s2 * l1 - s1 * l2,
                    c: Term::exact(0.0),
                })
            }
            Pivot::KnownSeparation => {
                let dx = value(Variable::Dx)?;
                let d12 = value(Variable::D12)?;
                Some(Quadratic {
                    a: Term::exact(0.0),
                    b: s2 - s1,
                    c: -(dx * d12),
                })
            }
        }
    }
}

/// `a·h² + b·h + c = 0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Quadratic {
    a: Term,
    b: Term,
    c: Term,
}

/// Real roots of a pivot polynomial.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Roots {
    /// Distinct real roots in ascending order, possibly none.
    Finite(Vec<f64>),
    /// The polynomial vanishes identically.
    Free,
}

impl Quadratic {
    pub(crate) fn roots(self, config: &Config) -> Roots {
        if self.a.is_negligible(config.degeneracy_tol) {
            let linear = Linear {
                slope: self.b,
                intercept: self.c,
            };
            return match linear.root(config.degeneracy_tol, config.residual_tol) {
                Root::Unique(h) => Roots::Finite(vec![h]),
                Root::Free => Roots::Free,
                Root::Inconsistent => Roots::Finite(Vec::new()),
            };
        }

        let (a, b, c) = (self.a.value, self.b.value, self.c.value);
        let discriminant = self.b * self.b - Term::exact(4.0) * self.a * self.c;

        let root = if discriminant.is_negligible(config.degeneracy_tol) {
            0.0
        } else if discriminant.value < 0.0 {
            return Roots::Finite(Vec::new());
        } else {
            discriminant.value.sqrt()
        };

        // Avoids cancellation between `-b` and the square root.
        let q = -0.5 * (b + b.signum() * root);
        #[allow(clippy::float_cmp)]
        let mut roots = if q == 0.0 {
            vec![-b / (2.0 * a)]
        } else {
            vec![q / a, c / q]
        };

        roots.sort_by(f64::total_cmp);
        let tol = config.degeneracy_tol;
        roots.dedup_by(|x, y| (*x - *y).abs() <= tol * (x.abs() + y.abs()));
        Roots::Finite(roots)
    }
}
