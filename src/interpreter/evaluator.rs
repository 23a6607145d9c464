/// Core evaluation logic.
///
/// Contains the evaluation entry point, the result type, and the dispatch
/// over expression variants, including variable lookup.
pub mod core;

/// Binary operator evaluation.
///
/// Implements arithmetic and the four comparison operators, with the operand
/// kind checks each of them requires.
pub mod binary;

/// Unary operator evaluation.
///
/// Implements prefix `+` and `-` on numbers.
pub mod unary;
