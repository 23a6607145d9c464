/// Entry points for expression parsing.
///
/// Defines the parser result type and the top-level `parse` function that
/// tokenizes an expression, parses it, and rejects unconsumed input.
pub mod core;

/// Binary operator parsing.
///
/// Implements the comparison, additive and multiplicative levels of the
/// grammar with left-associative loops.
pub mod binary;

/// Unary operators and primary expressions.
///
/// Handles prefix signs, literals, identifiers and parenthesized groups.
pub mod unary;

/// Leaf statement classification.
///
/// Turns the text of a plain statement into a typed [`crate::ast::Statement`]
/// by sniffing its keyword and splitting its operands.
pub mod statement;

/// Helpers shared by the statement parsers, such as quote-aware searches for
/// keywords and separators.
pub mod utils;
