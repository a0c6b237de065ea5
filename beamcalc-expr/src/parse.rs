use log::trace;

use crate::{
    BinaryOp, Constant, Expr, ExprError, Function,
    token::{Spanned, Token, tokenize},
};

/// Parses `text` into an expression tree.
///
/// Grammar, loosest binding first:
///
/// ```text
/// expr    = term (("+" | "-") term)*
/// term    = unary (("*" | "/") unary)*
/// unary   = ("+" | "-") unary | power
/// power   = primary (("^" | "**") unary)?
/// primary = number | constant | function "(" expr ("," expr)* ")" | "(" expr ")"
/// ```
///
/// Power is right associative and binds tighter than a leading minus, so
/// `-2^2` is `-4` and `2^-1` is `0.5`.
///
/// # Errors
///
/// Returns an [`ExprError`] locating the first lexical or syntax problem.
pub fn parse(text: &str) -> Result<Expr, ExprError> {
    let tokens = tokenize(text)?;
    if tokens.is_empty() {
        return Err(ExprError::Empty);
    }

    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.expr()?;

    if let Some(spanned) = parser.peek() {
        return Err(unexpected(spanned));
    }

    trace!("parsed {text:?} as {expr:?}");
    Ok(expr)
}

struct Parser<'a> {
    tokens: Vec<Spanned<'a>>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<Spanned<'a>> {
        self.tokens.get(self.pos).copied()
    }

    fn next(&mut self) -> Result<Spanned<'a>, ExprError> {
        let spanned = self.peek().ok_or(ExprError::UnexpectedEnd)?;
        self.pos += 1;
        Ok(spanned)
    }

    /// Consumes the next token if it equals `token`.
    fn eat(&mut self, token: Token<'_>) -> bool {
        if self.peek().is_some_and(|spanned| spanned.token == token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: Token<'_>) -> Result<(), ExprError> {
        let spanned = self.next()?;
        if spanned.token == token {
            Ok(())
        } else {
            Err(unexpected(spanned))
        }
    }

    fn expr(&mut self) -> Result<Expr, ExprError> {
        let mut lhs = self.term()?;
        loop {
            let op = if self.eat(Token::Plus) {
                BinaryOp::Add
            } else if self.eat(Token::Minus) {
                BinaryOp::Sub
            } else {
                return Ok(lhs);
            };
            let rhs = self.term()?;
            lhs = binary(op, lhs, rhs);
        }
    }

    fn term(&mut self) -> Result<Expr, ExprError> {
        let mut lhs = self.unary()?;
        loop {
            let op = if self.eat(Token::Star) {
                BinaryOp::Mul
            } else if self.eat(Token::Slash) {
                BinaryOp::Div
            } else {
                return Ok(lhs);
            };
            let rhs = self.unary()?;
            lhs = binary(op, lhs, rhs);
        }
    }

    fn unary(&mut self) -> Result<Expr, ExprError> {
        if self.eat(Token::Minus) {
            Ok(Expr::Neg(Box::new(self.unary()?)))
        } else if self.eat(Token::Plus) {
            self.unary()
        } else {
            self.power()
        }
    }

    fn power(&mut self) -> Result<Expr, ExprError> {
        let base = self.primary()?;
        if self.eat(Token::Power) {
            let exponent = self.unary()?;
            Ok(binary(BinaryOp::Pow, base, exponent))
        } else {
            Ok(base)
        }
    }

    fn primary(&mut self) -> Result<Expr, ExprError> {
        let spanned = self.next()?;
        match spanned.token {
            Token::Number(value) => Ok(Expr::Number(value)),
            Token::LParen => {
                let inner = self.expr()?;
                self.expect(Token::RParen)?;
                Ok(inner)
            }
            Token::Ident(name) => self.name(name, spanned.offset),
            _ => Err(unexpected(spanned)),
        }
    }

    fn name(&mut self, name: &str, offset: usize) -> Result<Expr, ExprError> {
        if let Some(function) = Function::lookup(name) {
            if !self.eat(Token::LParen) {
                return Err(ExprError::BareFunction {
                    name: function.name(),
                    offset,
                });
            }
            let args = self.arguments()?;
            let (min, max) = function.arity();
            if args.len() < min || args.len() > max {
                return Err(ExprError::Arity {
                    name: function.name(),
                    expected: function.arity_text(),
                    found: args.len(),
                });
            }
            return Ok(Expr::Call { function, args });
        }

        Constant::lookup(name)
            .map(Expr::Constant)
            .ok_or_else(|| ExprError::UnknownIdentifier {
                name: name.to_owned(),
                offset,
            })
    }

    /// Parses a comma-separated argument list after the opening parenthesis.
    fn arguments(&mut self) -> Result<Vec<Expr>, ExprError> {
        let mut args = Vec::new();
        if self.eat(Token::RParen) {
            return Ok(args);
        }
        loop {
            args.push(self.expr()?);
            if self.eat(Token::RParen) {
                return Ok(args);
            }
            self.expect(Token::Comma)?;
        }
    }
}

fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
    Expr::Binary {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}

fn unexpected(spanned: Spanned<'_>) -> ExprError {
    ExprError::UnexpectedToken {
        found: spanned.token.to_string(),
        offset: spanned.offset,
    }
}
