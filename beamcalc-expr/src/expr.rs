use crate::{Constant, ExprError, Function};

/// A binary arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

/// A parsed expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Constant(Constant),
    Neg(Box<Expr>),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Call {
        function: Function,
        args: Vec<Expr>,
    },
}

impl Expr {
    /// Evaluates the expression.
    ///
    /// # Errors
    ///
    /// Returns [`ExprError::DivisionByZero`], [`ExprError::Domain`] when a
    /// function is undefined at its argument, or [`ExprError::NonFinite`]
    /// when an intermediate result overflows.
    pub fn eval(&self) -> Result<f64, ExprError> {
        let value = match self {
            Expr::Number(value) => *value,
            Expr::Constant(constant) => constant.value(),
            Expr::Neg(inner) => -inner.eval()?,
            Expr::Binary { op, lhs, rhs } => {
                let (lhs, rhs) = (lhs.eval()?, rhs.eval()?);
                match op {
                    BinaryOp::Add => lhs + rhs,
                    BinaryOp::Sub => lhs - rhs,
                    BinaryOp::Mul => lhs * rhs,
                    BinaryOp::Div if rhs == 0.0 => return Err(ExprError::DivisionByZero),
                    BinaryOp::Div => lhs / rhs,
                    BinaryOp::Pow if lhs == 0.0 && rhs < 0.0 => {
                        return Err(ExprError::DivisionByZero);
                    }
                    BinaryOp::Pow => lhs.powf(rhs),
                }
            }
            Expr::Call { function, args } => {
                let args = args.iter().map(Expr::eval).collect::<Result<Vec<_>, _>>()?;
                let value = function.apply(&args);
                if value.is_nan() {
                    return Err(ExprError::Domain {
                        function: function.name(),
                    });
                }
                value
            }
        };

        if value.is_nan() {
            // Only `powf` of a negative base with a fractional exponent gets here.
            return Err(ExprError::Domain { function: "pow" });
        }
        if !value.is_finite() {
            return Err(ExprError::NonFinite { value });
        }
        Ok(value)
    }
}
