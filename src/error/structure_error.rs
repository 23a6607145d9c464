use thiserror::Error;

/// Represents block-matching and declaration-shape defects.
///
/// These are detected by the structurer in a single pass before execution
/// starts. The first one encountered aborts the run with no output.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StructureError {
    /// A closing keyword with nothing open.
    #[error("{keyword} without a matching {expected}: \"{text}\".")]
    UnexpectedTerminator {
        /// The terminator as written (`ENDIF`, `ENDDO`, `ENDLOOP`).
        keyword:  &'static str,
        /// The opener it would close.
        expected: &'static str,
        /// The statement text.
        text:     String,
    },
    /// A closing keyword that does not match the innermost open block.
    #[error("{found} cannot close \"{opening}\"; expected {expected}.")]
    MismatchedTerminator {
        /// The terminator that was found.
        found:    &'static str,
        /// The terminator the open block needs.
        expected: &'static str,
        /// Text of the statement that opened the block.
        opening:  String,
    },
    /// `ELSEIF` or `ELSE` outside of an `IF` block.
    #[error("{keyword} without an open IF: \"{text}\".")]
    ClauseOutsideIf {
        /// `ELSEIF` or `ELSE`.
        keyword: &'static str,
        /// The statement text.
        text:    String,
    },
    /// `ELSEIF` or a second `ELSE` after the else branch started.
    #[error("{keyword} after ELSE in \"{opening}\".")]
    ClauseAfterElse {
        /// `ELSEIF` or `ELSE`.
        keyword: &'static str,
        /// Text of the statement that opened the block.
        opening: String,
    },
    /// End of program reached with a block still open.
    #[error("Missing {expected} for \"{opening}\".")]
    MissingTerminator {
        /// The terminator the open block needs.
        expected: &'static str,
        /// Text of the statement that opened the block.
        opening:  String,
    },
    /// A block opened deeper than the structurer allows.
    #[error("Blocks nested too deeply at \"{opening}\" (limit {limit}).")]
    NestingTooDeep {
        /// The deepest nesting accepted.
        limit:   usize,
        /// Text of the statement that would open the block.
        opening: String,
    },
    /// `IF` or `ELSEIF` with nothing to test.
    #[error("{keyword} requires a condition: \"{text}\".")]
    MissingCondition {
        /// `IF` or `ELSEIF`.
        keyword: &'static str,
        /// The statement text.
        text:    String,
    },
    /// A loop opener without a bound.
    #[error("{keyword} without a TIMES count or table is not supported: \"{text}\".")]
    UnboundedLoop {
        /// `DO` or `LOOP`.
        keyword: &'static str,
        /// The statement text.
        text:    String,
    },
    /// A block statement whose shape is not recognized.
    #[error("Malformed {keyword} statement \"{text}\": {reason}.")]
    MalformedBlock {
        /// The leading keyword.
        keyword: &'static str,
        /// The statement text.
        text:    String,
        /// What is wrong with it.
        reason:  String,
    },
    /// A `DATA` declaration whose shape is not recognized.
    #[error("Malformed declaration \"{text}\": {reason}.")]
    MalformedDeclaration {
        /// The declaration text.
        text:   String,
        /// What is wrong with it.
        reason: String,
    },
}
