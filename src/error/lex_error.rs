use thiserror::Error;

/// Represents all errors that can occur while tokenizing an expression.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    /// A `'` or `` ` `` literal was opened but never closed.
    #[error("Unterminated string literal starting at column {column}.")]
    UnterminatedString {
        /// One-based column of the opening quote.
        column: usize,
    },
    /// An operator that exists in other languages but not in this one.
    #[error("Unsupported operator '{operator}'.")]
    UnsupportedOperator {
        /// The operator as written.
        operator: String,
    },
    /// Anything the lexer does not recognize.
    #[error("Unexpected character '{character}' at column {column}.")]
    UnexpectedCharacter {
        /// The offending character.
        character: char,
        /// One-based column of the character.
        column:    usize,
    },
}
