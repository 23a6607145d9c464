use std::iter::Peekable;

use crate::{
    ast::{Expr, UnaryOperator},
    error::ExpressionError,
    interpreter::{
        lexer::Token,
        parser::{binary::parse_comparison, core::ParseResult},
    },
};

/// Parses a unary expression.
///
/// Supports the prefix operators `+` and `-`. They are right-associative, so
/// `- -x` is parsed as `-(-x)`. Whether the operand is numeric is checked at
/// evaluation time.
///
/// Grammar:
/// ```text
///     unary := ("+" | "-") unary
///            | primary
/// ```
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>, source: &str) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token> + Clone
{
    let op = match tokens.peek() {
        Some(Token::Minus) => UnaryOperator::Negate,
        Some(Token::Plus) => UnaryOperator::Plus,
        _ => return parse_primary(tokens, source),
    };
    tokens.next();
    let expr = parse_unary(tokens, source)?;
    Ok(Expr::UnaryOp { op,
                       expr: Box::new(expr) })
}

/// Parses a primary (atomic) expression.
///
/// Grammar:
/// ```text
///     primary := number
///              | string
///              | identifier
///              | "(" comparison ")"
/// ```
pub(crate) fn parse_primary<'a, I>(tokens: &mut Peekable<I>, source: &str) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token> + Clone
{
    match tokens.next() {
        Some(Token::Number(n)) => Ok(Expr::Number(*n)),
        Some(Token::String(s)) => Ok(Expr::Str(s.clone())),
        Some(Token::Identifier(name)) => Ok(Expr::Variable(name.clone())),
        Some(Token::LParen) => parse_grouping(tokens, source),
        Some(Token::RParen) => {
            Err(ExpressionError::UnbalancedParens { expression: source.to_string() })
        },
        Some(tok) => Err(ExpressionError::UnexpectedToken { token:      tok.describe(),
                                                            expression: source.to_string(), }),
        None => Err(ExpressionError::UnexpectedEnd { expression: source.to_string() }),
    }
}

/// Parses the inside of a parenthesized group; the `(` is already consumed.
fn parse_grouping<'a, I>(tokens: &mut Peekable<I>, source: &str) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token> + Clone
{
    let inner = parse_comparison(tokens, source)?;
    match tokens.next() {
        Some(Token::RParen) => Ok(inner),
        Some(tok) => Err(ExpressionError::UnexpectedToken { token:      tok.describe(),
                                                            expression: source.to_string(), }),
        None => Err(ExpressionError::UnbalancedParens { expression: source.to_string() }),
    }
}
