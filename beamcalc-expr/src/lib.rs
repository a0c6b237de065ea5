//! Arithmetic on caller-typed text, with no ambient namespace.
//!
//! Only numbers, `+ - * /`, powers (`^` or `**`), parentheses, the constants
//! `pi`, `e`, and `tau`, and a fixed set of math functions are recognized.
//! Any other name is an error, so input can never reach code outside the
//! evaluator.
//!
//! ```
//! use beamcalc_expr::evaluate;
//!
//! assert_eq!(evaluate("2 * (3 + 4)").unwrap(), 14.0);
//! assert_eq!(evaluate("-2^2").unwrap(), -4.0);
//! assert!(evaluate("__import__").is_err());
//! ```

mod error;
mod expr;
mod function;
mod parse;
mod token;

use log::debug;

pub use error::ExprError;
pub use expr::{BinaryOp, Expr};
pub use function::{Constant, Function};
pub use parse::parse;

/// Parses and evaluates `text`.
///
/// # Errors
///
/// Returns the first parse or evaluation error.
pub fn evaluate(text: &str) -> Result<f64, ExprError> {
    let value = parse(text)?.eval()?;
    debug!("{text:?} = {value}");
    Ok(value)
}
