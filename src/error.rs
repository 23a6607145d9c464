/// Lexical errors.
///
/// Raised while turning an expression substring into tokens: unterminated
/// quoted literals, operators the language does not have, and stray
/// characters.
pub mod lex_error;
/// Expression errors.
///
/// Covers both halves of expression handling: syntax problems found while
/// parsing the token stream and type problems found while evaluating the
/// resulting tree against the environment.
pub mod expression_error;
/// Structural errors.
///
/// Block-matching defects and malformed declarations detected before any
/// statement executes. A structural error is fatal to the whole run.
pub mod structure_error;
/// Runtime errors.
///
/// Statement-level failures raised by the executor. All of them except the
/// iteration budget are recovered locally and reported as diagnostics.
pub mod runtime_error;

pub use expression_error::ExpressionError;
pub use lex_error::LexError;
pub use runtime_error::RuntimeError;
pub use structure_error::StructureError;
