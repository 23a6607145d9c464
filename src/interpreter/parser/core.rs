use std::iter::Peekable;

use crate::{
    ast::Expr,
    error::ExpressionError,
    interpreter::{
        lexer::{Token, tokenize},
        parser::binary::{parse_comparison, token_to_binary_operator},
    },
};

pub type ParseResult<T> = Result<T, ExpressionError>;

/// Deepest expression tree [`parse`] accepts.
///
/// Parsing and evaluation recurse once per level, so the bound keeps crafted
/// input from exhausting the stack.
pub const MAX_EXPRESSION_DEPTH: usize = 256;

/// Parses the text of an expression into an [`Expr`] tree.
///
/// The whole text must form exactly one expression: a `)` left over after
/// parsing is reported as unbalanced parentheses, anything else as trailing
/// tokens.
///
/// # Errors
/// Returns an `ExpressionError` for lexical errors, empty input, nesting
/// beyond [`MAX_EXPRESSION_DEPTH`], syntax errors and unconsumed tokens.
///
/// # Example
/// ```
/// use abapi::{
///     ast::{BinaryOperator, Expr},
///     interpreter::parser::core::parse,
/// };
///
/// let expr = parse("1 + 2").unwrap();
/// assert_eq!(expr,
///            Expr::BinaryOp { left:  Box::new(Expr::Number(1.0)),
///                             op:    BinaryOperator::Add,
///                             right: Box::new(Expr::Number(2.0)), });
/// ```
pub fn parse(source: &str) -> ParseResult<Expr> {
    let tokens = tokenize(source)?;
    if tokens.is_empty() {
        return Err(ExpressionError::Empty);
    }
    if nesting_depth(&tokens) > MAX_EXPRESSION_DEPTH {
        return Err(ExpressionError::TooDeep { limit:      MAX_EXPRESSION_DEPTH,
                                              expression: source.to_string(), });
    }

    let mut iter = tokens.iter().peekable();
    let expr = parse_expression(&mut iter, source)?;

    match iter.next() {
        None => Ok(expr),
        Some(Token::RParen) => {
            Err(ExpressionError::UnbalancedParens { expression: source.to_string() })
        },
        Some(tok) => Err(ExpressionError::TrailingTokens { token:      tok.describe(),
                                                           expression: source.to_string(), }),
    }
}

/// Parses a full expression.
///
/// This begins at the lowest-precedence level, comparison, and descends
/// through the precedence hierarchy.
///
/// Grammar: `expression := comparison`
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>, source: &str) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token> + Clone
{
    parse_comparison(tokens, source)
}

/// Upper bound on the height of the tree `tokens` would parse into.
///
/// Every group, prefix sign and binary operator can add one level. Counts are
/// kept per open group and dropped when the group closes, so sibling groups
/// do not add up.
fn nesting_depth(tokens: &[Token]) -> usize {
    let mut groups = vec![0_usize];
    let mut depth = 0_usize;
    let mut deepest = 0_usize;
    let mut operand_expected = true;

    for token in tokens {
        match token {
            Token::LParen => {
                groups.push(0);
                depth += 1;
                operand_expected = true;
            },
            Token::RParen => {
                if groups.len() > 1
                   && let Some(levels) = groups.pop()
                {
                    depth = depth.saturating_sub(levels + 1);
                }
                operand_expected = false;
            },
            Token::Plus | Token::Minus if operand_expected => {
                if let Some(levels) = groups.last_mut() {
                    *levels += 1;
                }
                depth += 1;
            },
            tok if token_to_binary_operator(tok).is_some() => {
                if let Some(levels) = groups.last_mut() {
                    *levels += 1;
                }
                depth += 1;
                operand_expected = true;
            },
            _ => operand_expected = false,
        }
        deepest = deepest.max(depth);
    }

    deepest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ast::{BinaryOperator, UnaryOperator},
        error::LexError,
    };

    fn num(n: f64) -> Box<Expr> {
        Box::new(Expr::Number(n))
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        assert_eq!(parse("1 + 2 * 3").unwrap(),
                   Expr::BinaryOp { left:  num(1.0),
                                    op:    BinaryOperator::Add,
                                    right: Box::new(Expr::BinaryOp { left:  num(2.0),
                                                                     op:    BinaryOperator::Mul,
                                                                     right: num(3.0), }), });
    }

    #[test]
    fn subtraction_is_left_associative() {
        assert_eq!(parse("8 - 4 - 2").unwrap(),
                   Expr::BinaryOp { left:  Box::new(Expr::BinaryOp { left:  num(8.0),
                                                                     op:    BinaryOperator::Sub,
                                                                     right: num(4.0), }),
                                    op:    BinaryOperator::Sub,
                                    right: num(2.0), });
    }

    #[test]
    fn comparison_is_the_loosest_level() {
        assert_eq!(parse("-x < 2").unwrap(),
                   Expr::BinaryOp { left:  Box::new(Expr::UnaryOp { op:   UnaryOperator::Negate,
                                                                    expr:
                                                                        Box::new(Expr::Variable("x".into())), }),
                                    op:    BinaryOperator::Less,
                                    right: num(2.0), });
    }

    #[test]
    fn comparisons_do_not_chain() {
        assert!(matches!(parse("1 < 2 < 3"),
                         Err(ExpressionError::TrailingTokens { ref token, .. }) if token == "<"));
    }

    #[test]
    fn parentheses_must_balance() {
        assert!(matches!(parse("(1 + 2"), Err(ExpressionError::UnbalancedParens { .. })));
        assert!(matches!(parse("1 + 2)"), Err(ExpressionError::UnbalancedParens { .. })));
        assert_eq!(parse("((2))").unwrap(), Expr::Number(2.0));
    }

    #[test]
    fn trailing_garbage_is_rejected() {
        assert!(matches!(parse("1 2"), Err(ExpressionError::TrailingTokens { .. })));
        assert!(matches!(parse("a b"), Err(ExpressionError::TrailingTokens { .. })));
    }

    #[test]
    fn incomplete_and_empty_expressions() {
        assert_eq!(parse("   "), Err(ExpressionError::Empty));
        assert!(matches!(parse("1 +"), Err(ExpressionError::UnexpectedEnd { .. })));
        assert!(matches!(parse("* 2"), Err(ExpressionError::UnexpectedToken { .. })));
    }

    #[test]
    fn deep_nesting_is_rejected() {
        let nested = format!("{}1{}", "(".repeat(1000), ")".repeat(1000));
        assert!(matches!(parse(&nested),
                         Err(ExpressionError::TooDeep { limit: MAX_EXPRESSION_DEPTH, .. })));

        let signs = format!("{}1", "- ".repeat(MAX_EXPRESSION_DEPTH + 1));
        assert!(matches!(parse(&signs), Err(ExpressionError::TooDeep { .. })));

        let sum = vec!["1"; MAX_EXPRESSION_DEPTH + 2].join(" + ");
        assert!(matches!(parse(&sum), Err(ExpressionError::TooDeep { .. })));
    }

    #[test]
    fn sibling_groups_do_not_accumulate() {
        let nested = format!("{}1{}", "(".repeat(100), ")".repeat(100));
        let siblings = vec![nested; 3].join(" * ");
        assert!(parse(&siblings).is_ok());
        assert_eq!(parse(&format!("{}2{}", "(".repeat(200), ")".repeat(200))).unwrap(),
                   Expr::Number(2.0));
    }

    #[test]
    fn lexical_errors_surface() {
        assert_eq!(parse("a == b"),
                   Err(ExpressionError::Lex(LexError::UnsupportedOperator { operator:
                                                                                "==".into() })));
    }
}
