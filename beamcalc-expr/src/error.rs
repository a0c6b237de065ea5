use thiserror::Error;

/// Errors from parsing or evaluating an expression.
///
/// Offsets are byte positions into the input text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExprError {
    #[error("expression is empty")]
    Empty,

    #[error("unexpected character {ch:?} at offset {offset}")]
    UnexpectedChar { ch: char, offset: usize },

    #[error("malformed number {text:?} at offset {offset}")]
    InvalidNumber { text: String, offset: usize },

    #[error("unexpected {found} at offset {offset}")]
    UnexpectedToken { found: String, offset: usize },

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("unknown name `{name}` at offset {offset}")]
    UnknownIdentifier { name: String, offset: usize },

    #[error("function `{name}` at offset {offset} must be called with arguments")]
    BareFunction { name: &'static str, offset: usize },

    #[error("function `{name}` takes {expected} argument(s), got {found}")]
    Arity {
        name: &'static str,
        expected: &'static str,
        found: usize,
    },

    #[error("division by zero")]
    DivisionByZero,

    #[error("math domain error in `{function}`")]
    Domain { function: &'static str },

    #[error("result is not finite: {value}")]
    NonFinite { value: f64 },
}
