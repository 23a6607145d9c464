use thiserror::Error;

use crate::error::LexError;

/// Represents all errors that can occur while parsing or evaluating an
/// expression.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ExpressionError {
    /// The expression could not be tokenized.
    #[error(transparent)]
    Lex(#[from] LexError),
    /// The expression text was empty.
    #[error("Empty expression.")]
    Empty,
    /// Found a token where another was expected.
    #[error("Unexpected token '{token}' in expression \"{expression}\".")]
    UnexpectedToken {
        /// The token encountered.
        token:      String,
        /// The full expression text.
        expression: String,
    },
    /// The expression ended in the middle of a construct.
    #[error("Incomplete expression \"{expression}\".")]
    UnexpectedEnd {
        /// The full expression text.
        expression: String,
    },
    /// Tokens remained after a complete expression was parsed.
    #[error("Unexpected '{token}' after the end of expression \"{expression}\".")]
    TrailingTokens {
        /// The first token that was not consumed.
        token:      String,
        /// The full expression text.
        expression: String,
    },
    /// A `(` without `)` or the other way round.
    #[error("Unbalanced parentheses in expression \"{expression}\".")]
    UnbalancedParens {
        /// The full expression text.
        expression: String,
    },
    /// Parentheses, prefix signs or operators nested past the parser's limit.
    #[error("Expression \"{expression}\" is nested too deeply (limit {limit}).")]
    TooDeep {
        /// The deepest nesting accepted.
        limit:      usize,
        /// The full expression text.
        expression: String,
    },
    /// An identifier with no declaration.
    #[error("Variable \"{name}\" is not declared.")]
    UndeclaredVariable {
        /// The identifier as written.
        name: String,
    },
    /// Internal tables cannot take part in expressions.
    #[error("Internal table \"{name}\" cannot be used in an expression.")]
    TableInExpression {
        /// The identifier as written.
        name: String,
    },
    /// An arithmetic or ordering operator received a non-numeric value.
    #[error("Operator '{operator}' requires numeric operands, found {found}.")]
    NonNumericOperand {
        /// The operator symbol.
        operator: &'static str,
        /// The kind of the offending operand.
        found:    &'static str,
    },
    /// `=` or `<>` between values of different kinds.
    #[error("Cannot compare {left} with {right} using '{operator}'.")]
    MismatchedComparison {
        /// The operator symbol.
        operator: &'static str,
        /// Kind of the left operand.
        left:     &'static str,
        /// Kind of the right operand.
        right:    &'static str,
    },
}
