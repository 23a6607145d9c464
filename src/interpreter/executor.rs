/// Tree walking and error isolation.
///
/// Owns the environment, the output buffer and the diagnostics of a run, and
/// dispatches each node of the statement tree.
pub mod core;

/// Leaf statements.
///
/// `DATA`, `WRITE`, `ADD`, `SUBTRACT`, `CLEAR`, `APPEND` and assignment.
pub mod statement;

/// Block statements.
///
/// Conditionals, counted loops and table loops, together with the iteration
/// budget that bounds them.
pub mod control_flow;

/// The line-oriented output produced by `WRITE`.
pub mod output;
