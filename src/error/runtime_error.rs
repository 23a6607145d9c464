use thiserror::Error;

use crate::error::ExpressionError;

/// Represents all statement-level errors raised during execution.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RuntimeError {
    /// A sub-expression failed to parse or evaluate.
    #[error(transparent)]
    Expression(#[from] ExpressionError),
    /// A statement named a variable that was never declared.
    #[error("Variable \"{name}\" is not declared.")]
    UndeclaredVariable {
        /// The identifier as written.
        name: String,
    },
    /// A declaration used a type name the interpreter does not know.
    #[error("Type \"{type_name}\" is not supported for variable {name}.")]
    UnknownType {
        /// The type name as written.
        type_name: String,
        /// The variable being declared.
        name:      String,
    },
    /// Tables may only hold `i` or `string` elements.
    #[error("Internal tables of type \"{type_name}\" are not supported (variable {name}).")]
    UnsupportedTableElement {
        /// The element type name as written.
        type_name: String,
        /// The variable being declared.
        name:      String,
    },
    /// A metadata combination the type does not allow.
    #[error("Invalid declaration of {name}: {details}.")]
    InvalidDeclaration {
        /// The variable being declared.
        name:    String,
        /// What is wrong with it.
        details: String,
    },
    /// A second declaration with a different type.
    #[error("Variable {name} is already declared with a different type.")]
    Redeclaration {
        /// The variable being declared.
        name: String,
    },
    /// A value that the target type cannot hold.
    #[error("Value assigned to {name} {details}.")]
    InvalidValue {
        /// The receiving variable.
        name:    String,
        /// What the value should have been.
        details: String,
    },
    /// `ADD` or `SUBTRACT` on a non-numeric variable.
    #[error("{statement} only supports numeric variables, but {name} is not numeric.")]
    NonNumericTarget {
        /// `ADD` or `SUBTRACT`.
        statement: &'static str,
        /// The receiving variable.
        name:      String,
    },
    /// A table was expected.
    #[error("Variable {name} is not an internal table.")]
    NotATable {
        /// The variable as written.
        name: String,
    },
    /// A scalar was expected.
    #[error("Internal table {name} cannot be used as a single value.")]
    NotAScalar {
        /// The variable as written.
        name: String,
    },
    /// The work area of `LOOP AT` does not match the table's element kind.
    #[error("Work area {work_area} cannot hold the {element} elements of {table}.")]
    WorkAreaMismatch {
        /// The work area as written.
        work_area: String,
        /// The table as written.
        table:     String,
        /// Element kind of the table.
        element:   &'static str,
    },
    /// A table initializer that does not name another table.
    #[error("Internal table {name} can only be initialized from another internal table.")]
    InvalidTableInitializer {
        /// The variable being declared.
        name: String,
    },
    /// A `TIMES` count that is not a non-negative integer.
    #[error("Loop count \"{expression}\" must be a non-negative integer, found {found}.")]
    InvalidLoopCount {
        /// The count expression.
        expression: String,
        /// The value it evaluated to.
        found:      String,
    },
    /// The iteration budget of the run was exhausted.
    #[error("Too many iterations: the limit of {limit} loop passes was exceeded.")]
    IterationLimit {
        /// The configured limit.
        limit: u64,
    },
    /// A statement whose keyword the interpreter does not know.
    #[error("Unsupported statement: \"{text}\".")]
    UnsupportedStatement {
        /// The statement text.
        text: String,
    },
    /// A known statement with an unrecognized shape.
    #[error("Invalid {keyword} syntax: \"{text}\".")]
    MalformedStatement {
        /// The leading keyword.
        keyword: &'static str,
        /// The statement text.
        text:    String,
    },
}

impl RuntimeError {
    /// Returns `true` for errors that stop the whole run instead of just the
    /// statement that raised them.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::IterationLimit { .. })
    }
}
