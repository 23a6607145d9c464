//! # abapi
//!
//! abapi is an interpreter for a small, statically typed subset of ABAP.
//! It supports typed variable declarations, internal tables, arithmetic and
//! comparison expressions, `WRITE` output, and structured control flow with
//! `IF`, `DO` and `LOOP`.
//!
//! A run goes through four phases: the source is split into statements, the
//! statements are nested into a tree, the tree is executed, and the output
//! buffer is rendered. Failures of single statements are reported as
//! diagnostics without stopping the run.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::sync::Once;

use tracing::debug;

use crate::{
    config::Config,
    interpreter::{
        environment::Environment, executor::core::Executor, splitter::split,
        structurer::structure,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the expression tree built from statement operands and
/// the statement tree built from a whole program. Leaf statements keep their
/// operands as text; they are parsed when the statement runs.
///
/// # Responsibilities
/// - Defines expression nodes and operators.
/// - Defines block nodes (conditionals and loops) and classified leaf
///   statements.
pub mod ast;
/// Run settings.
///
/// Holds the limits of a single run, currently the iteration budget shared
/// by all loops.
pub mod config;
/// Provides error types for every phase.
///
/// This module defines the errors raised while lexing operands, parsing and
/// evaluating expressions, structuring the program, and executing statements.
/// Each error renders as a complete, user-facing diagnostic message.
///
/// # Responsibilities
/// - Defines one error enum per phase.
/// - Converts lower-phase errors into the errors of the phase above.
/// - Separates fatal from recoverable runtime failures.
pub mod error;
/// Orchestrates the entire process of program execution.
///
/// This module ties together splitting, structuring, expression handling,
/// typing and execution.
///
/// # Responsibilities
/// - Coordinates all core components.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General utilities for safe numeric conversion and formatting.
///
/// # Responsibilities
/// - Safely convert `f64` to `u64` without silent data loss.
/// - Render numbers as canonical decimal text.
/// - Round and truncate the way the numeric types store values.
pub mod util;

/// The program shown by `abapi --demo`.
pub const DEMO_PROGRAM: &str = "* Ejemplo básico ABAP
DATA: lv_text TYPE string VALUE 'Hola mundo',
      lv_num  TYPE i VALUE 5.

WRITE: / 'Mensaje:', lv_text.
ADD 3 TO lv_num.
WRITE: / 'Resultado:', lv_num.";

/// The observable result of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Execution {
    /// Rendered output lines joined by `\n`.
    pub output:      String,
    /// One message per failure, in the order the statements were attempted.
    pub diagnostics: Vec<String>,
}

impl Execution {
    /// Returns `true` if no diagnostic was recorded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Runs a program with the default configuration.
///
/// Every call starts from an empty environment; nothing persists between
/// calls.
///
/// # Examples
/// ```
/// use abapi::execute;
///
/// let run = execute("DATA lv_num TYPE i VALUE 5. ADD 3 TO lv_num. WRITE: / lv_num.");
/// assert_eq!(run.output, "8");
/// assert!(run.is_clean());
///
/// // A structural error stops the program before anything runs.
/// let run = execute("WRITE 'a'. IF 1 = 1. ENDDO.");
/// assert_eq!(run.output, "");
/// assert_eq!(run.diagnostics.len(), 1);
/// ```
#[must_use]
pub fn execute(source: &str) -> Execution {
    execute_with(source, &Config::default())
}

/// Runs a program with explicit settings.
#[must_use]
pub fn execute_with(source: &str, config: &Config) -> Execution {
    let statements = split(source);
    debug!(statements = statements.len(), "split");

    let tree = match structure(&statements) {
        Ok(tree) => tree,
        Err(error) => {
            debug!(%error, "structural error");
            return Execution { output:      String::new(),
                               diagnostics: vec![error.to_string()], };
        },
    };

    let (output, diagnostics) = Executor::new(Environment::new(), config).run(&tree);
    Execution { output: output.render(),
                diagnostics }
}

static TRACING_INIT: Once = Once::new();

/// Installs a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset, and only the first call has an
/// effect.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
                    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

                    if std::env::var("RUST_LOG").is_ok() {
                        tracing_subscriber::registry().with(fmt::layer().with_writer(std::io::stderr)
                                                                        .with_target(true))
                                                      .with(EnvFilter::from_default_env())
                                                      .init();
                    }
                });
}
