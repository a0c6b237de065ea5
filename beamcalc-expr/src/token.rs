use std::fmt;

use crate::ExprError;

/// A lexical token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Token<'a> {
    Number(f64),
    Ident(&'a str),
    Plus,
    Minus,
    Star,
    Slash,
    /// `^` or `**`
    Power,
    LParen,
    RParen,
    Comma,
}

/// A token and the byte offset where it starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Spanned<'a> {
    pub(crate) token: Token<'a>,
    pub(crate) offset: usize,
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(value) => write!(f, "number {value}"),
            Token::Ident(name) => write!(f, "name `{name}`"),
            Token::Plus => f.write_str("`+`"),
            Token::Minus => f.write_str("`-`"),
            Token::Star => f.write_str("`*`"),
            Token::Slash => f.write_str("`/`"),
            Token::Power => f.write_str("`^`"),
            Token::LParen => f.write_str("`(`"),
            Token::RParen => f.write_str("`)`"),
            Token::Comma => f.write_str("`,`"),
        }
    }
}

/// Splits `text` into tokens, skipping whitespace.
pub(crate) fn tokenize(text: &str) -> Result<Vec<Spanned<'_>>, ExprError> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut offset = 0;

    while offset < bytes.len() {
        let byte = bytes[offset];
        let start = offset;

        let token = match byte {
            b' ' | b'\t' | b'\r' | b'\n' => {
                offset += 1;
                continue;
            }
            b'0'..=b'9' | b'.' => {
                offset = scan_number(bytes, offset);
                let literal = &text[start..offset];
                let value = literal
                    .parse::<f64>()
                    .map_err(|_| ExprError::InvalidNumber {
                        text: literal.to_owned(),
                        offset: start,
                    })?;
                tokens.push(Spanned {
                    token: Token::Number(value),
                    offset: start,
                });
                continue;
            }
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => {
                while offset < bytes.len()
                    && (bytes[offset].is_ascii_alphanumeric() || bytes[offset] == b'_')
                {
                    offset += 1;
                }
                tokens.push(Spanned {
                    token: Token::Ident(&text[start..offset]),
                    offset: start,
                });
                continue;
            }
            b'+' => Token::Plus,
            b'-' => Token::Minus,
            b'*' if bytes.get(offset + 1) == Some(&b'*') => {
                offset += 1;
                Token::Power
            }
            b'*' => Token::Star,
            b'/' => Token::Slash,
            b'^' => Token::Power,
            b'(' => Token::LParen,
            b')' => Token::RParen,
            b',' => Token::Comma,
            _ => {
                let ch = text[start..].chars().next().unwrap_or('\u{fffd}');
                return Err(ExprError::UnexpectedChar { ch, offset: start });
            }
        };

        offset += 1;
        tokens.push(Spanned {
            token,
            offset: start,
        });
    }

    Ok(tokens)
}

/// Returns the end of the numeric literal starting at `start`.
///
/// Accepts `12`, `1.5`, `.5`, `3.`, and an exponent such as `1e-3`. An `e`
/// not followed by digits is left for the next token.
fn scan_number(bytes: &[u8], start: usize) -> usize {
    let digits = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = digits(start);
    if bytes.get(end) == Some(&b'.') {
        end = digits(end + 1);
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent = end + 1;
        if matches!(bytes.get(exponent), Some(b'+' | b'-')) {
            exponent += 1;
        }
        if bytes.get(exponent).is_some_and(u8::is_ascii_digit) {
            end = digits(exponent);
        }
    }

    end
}
