/// The environment module stores the variables of a run.
///
/// Each declared name maps to a slot holding its fixed type descriptor and
/// its current value. Names are case-insensitive and normalized here, at the
/// boundary, so no other component has to fold case.
///
/// # Responsibilities
/// - Stores scalar and table variables for the lifetime of one run.
/// - Resolves identifiers regardless of how they are capitalized.
pub mod environment;
/// The evaluator module computes expression values.
///
/// The evaluator parses an operand substring and walks the resulting tree
/// against a read-only environment, producing a number, a string or a
/// boolean.
///
/// # Responsibilities
/// - Resolves variables, rejecting undeclared names and internal tables.
/// - Applies arithmetic with IEEE division and single comparisons.
/// - Enforces operand kinds for every operator.
pub mod evaluator;
/// The executor module runs the statement tree.
///
/// The executor walks the tree depth-first, dispatches each statement to its
/// handler, writes the output buffer and records one diagnostic per failing
/// statement while execution continues with the next one.
///
/// # Responsibilities
/// - Executes declarations, output, arithmetic, table and assignment
///   statements.
/// - Drives conditionals, counted loops and table loops.
/// - Bounds the run with the configured iteration budget.
pub mod executor;
/// The lexer module tokenizes expression operands.
///
/// The lexer reads the text of a single operand and produces numbers, quoted
/// literals, identifiers, operators and parentheses. Keywords never reach it;
/// they are consumed by the statement layer first.
///
/// # Responsibilities
/// - Converts operand text into tokens.
/// - Reports unterminated literals, unsupported operators and stray
///   characters with their column.
pub mod lexer;
/// The parser module reads expressions and statement shapes.
///
/// Expressions are parsed by recursive descent with one function per
/// precedence level. Leaf statements are classified by keyword and their
/// operands split into expression texts.
///
/// # Responsibilities
/// - Builds expression trees with the usual arithmetic precedence and one
///   optional comparison.
/// - Classifies `DATA`, `WRITE`, `ADD`, `SUBTRACT`, `CLEAR`, `APPEND` and
///   assignments.
/// - Rejects declarations whose shape cannot be read.
pub mod parser;
/// The splitter module cuts source text into raw statements.
pub mod splitter;
/// The structurer module nests raw statements into blocks.
///
/// Opening and closing keywords are matched with an explicit stack before
/// anything executes; a program with mismatched blocks never starts.
pub mod structurer;
/// The types module validates declarations and coerces values.
///
/// # Responsibilities
/// - Checks type names and their `LENGTH`/`DECIMALS` metadata.
/// - Converts evaluation results into each type's stored form.
/// - Provides the initial value every type starts with and `CLEAR` restores.
pub mod types;
/// The value module defines the runtime data types for evaluation.
///
/// Evaluation results are numbers, strings or booleans. Stored variable
/// contents are only numbers or strings; booleans are converted when stored.
pub mod value;
