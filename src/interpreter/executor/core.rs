use tracing::{debug, warn};

use crate::{
    ast::{Leaf, Node, Statement},
    config::Config,
    error::RuntimeError,
    interpreter::{
        environment::Environment, evaluator::core::evaluate, executor::output::OutputBuffer,
        value::core::Value,
    },
};

/// Result type used by the executor.
///
/// Every statement handler returns either `T` or the `RuntimeError` that
/// abandoned the statement.
pub type ExecResult<T> = Result<T, RuntimeError>;

/// Walks a statement tree and collects its output and diagnostics.
///
/// ## Usage
///
/// An `Executor` is built for a single run and consumed by [`Executor::run`].
/// Statement failures are isolated: the failing node is abandoned, its
/// message recorded, and execution continues with the next sibling. Only
/// exhausting the iteration budget stops the run.
pub struct Executor {
    pub(crate) env:            Environment,
    pub(crate) output:         OutputBuffer,
    pub(crate) diagnostics:    Vec<String>,
    pub(crate) iterations:     u64,
    pub(crate) max_iterations: u64,
}

impl Executor {
    /// Creates an executor over `env` with the limits from `config`.
    #[must_use]
    pub fn new(env: Environment, config: &Config) -> Self {
        Self { env,
               output: OutputBuffer::new(),
               diagnostics: Vec::new(),
               iterations: 0,
               max_iterations: config.max_iterations }
    }

    /// Executes the root block and returns the output and the diagnostics, in
    /// the order the failing statements were attempted.
    ///
    /// # Example
    /// ```
    /// use abapi::{
    ///     config::Config,
    ///     interpreter::{
    ///         environment::Environment, executor::core::Executor, splitter::split,
    ///         structurer::structure,
    ///     },
    /// };
    ///
    /// let source = "DATA lv_num TYPE i VALUE 5. ADD 3 TO lv_num. WRITE: / lv_num. WRITE lv_y.";
    /// let tree = structure(&split(source)).unwrap();
    ///
    /// let (output, diagnostics) = Executor::new(Environment::new(), &Config::default()).run(&tree);
    /// assert_eq!(output.render(), "8");
    /// assert_eq!(diagnostics, vec!["Variable \"lv_y\" is not declared."]);
    /// ```
    #[must_use]
    pub fn run(mut self, nodes: &[Node]) -> (OutputBuffer, Vec<String>) {
        if let Err(error) = self.exec_block(nodes) {
            warn!(%error, "run stopped");
            self.diagnostics.push(error.to_string());
        }
        debug!(lines = self.output.lines().len(),
               diagnostics = self.diagnostics.len(),
               iterations = self.iterations,
               "run finished");
        (self.output, self.diagnostics)
    }

    /// Read access to the variables of the run.
    #[must_use]
    pub const fn environment(&self) -> &Environment {
        &self.env
    }

    /// Executes a block, recording every non-fatal failure.
    ///
    /// Returns an error only for fatal failures, which the caller must
    /// propagate unchanged.
    pub(crate) fn exec_block(&mut self, nodes: &[Node]) -> ExecResult<()> {
        for node in nodes {
            match self.exec_node(node) {
                Ok(()) => {},
                Err(error) if error.is_fatal() => return Err(error),
                Err(error) => {
                    debug!(%error, "statement failed");
                    self.diagnostics.push(error.to_string());
                },
            }
        }
        Ok(())
    }

    fn exec_node(&mut self, node: &Node) -> ExecResult<()> {
        match node {
            Node::Leaf(leaf) => self.exec_leaf(leaf),
            Node::Conditional { clauses, else_body } => {
                self.exec_conditional(clauses, else_body.as_deref())
            },
            Node::CountedLoop { count, body, .. } => self.exec_counted_loop(count, body),
            Node::TableLoop { table,
                              work_area,
                              body, } => self.exec_table_loop(table, work_area, body),
        }
    }

    fn exec_leaf(&mut self, leaf: &Leaf) -> ExecResult<()> {
        match &leaf.statement {
            Statement::Data(declarations) => {
                declarations.iter().try_for_each(|declaration| self.exec_declaration(declaration))
            },
            Statement::Write(items) => self.exec_write(items),
            Statement::Add { amount, target } => self.exec_add(amount, target, "ADD", 1.0),
            Statement::Subtract { amount, target } => {
                self.exec_add(amount, target, "SUBTRACT", -1.0)
            },
            Statement::Clear(target) => self.exec_clear(target),
            Statement::Append { value, table } => self.exec_append(value, table),
            Statement::Assign { target, value } => self.exec_assign(target, value),
            Statement::Malformed { keyword } => {
                Err(RuntimeError::MalformedStatement { keyword: *keyword,
                                                       text:    leaf.text.clone(), })
            },
            Statement::Unsupported => {
                Err(RuntimeError::UnsupportedStatement { text: leaf.text.clone() })
            },
        }
    }

    /// Evaluates an expression against the current environment.
    pub(crate) fn eval(&self, expression: &str) -> ExecResult<Value> {
        Ok(evaluate(expression, &self.env)?)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::interpreter::{splitter::split, structurer::structure};

    fn run(source: &str) -> (String, Vec<String>) {
        let tree = structure(&split(source)).unwrap();
        let (output, diagnostics) = Executor::new(Environment::new(), &Config::default()).run(&tree);
        (output.render(), diagnostics)
    }

    #[test]
    fn failures_do_not_stop_siblings() {
        let (output, diagnostics) = run("WRITE 'a'. SKIP 1. WRITE lv_nope. WRITE / 'b'.");
        assert_eq!(output, "a\nb");
        assert_eq!(diagnostics,
                   vec!["Unsupported statement: \"SKIP 1\".", "Variable \"lv_nope\" is not declared."]);
    }

    #[test]
    fn malformed_statements_are_reported_when_reached() {
        let (output, diagnostics) = run("WRITE 'a'. ADD 1 lv_x. WRITE 'b'.");
        assert_eq!(output, "a b");
        assert_eq!(diagnostics, vec!["Invalid ADD syntax: \"ADD 1 lv_x\"."]);
    }

    #[test]
    fn chained_declarations_stop_at_the_first_failure() {
        let (output, diagnostics) =
            run("DATA: lv_a TYPE i VALUE 1, lv_b TYPE i VALUE 'x', lv_c TYPE i. WRITE lv_a. WRITE lv_c.");
        assert_eq!(output, "1");
        assert_eq!(diagnostics,
                   vec!["Value assigned to lv_b must be numeric.",
                        "Variable \"lv_c\" is not declared."]);
    }
}
