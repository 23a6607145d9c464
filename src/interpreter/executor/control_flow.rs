use tracing::trace;

use crate::{
    ast::{Clause, Node},
    error::RuntimeError,
    interpreter::{
        environment::SlotValue,
        executor::core::{ExecResult, Executor},
        types::TypeDescriptor,
        value::core::Value,
    },
    util::num::f64_to_u64_checked,
};

impl Executor {
    /// Executes the body of the first clause whose condition holds, or the
    /// else branch when none does.
    ///
    /// Conditions are evaluated in order and evaluation stops at the first
    /// match. A failing condition abandons the whole conditional.
    pub(crate) fn exec_conditional(&mut self,
                                   clauses: &[Clause],
                                   else_body: Option<&[Node]>)
                                   -> ExecResult<()> {
        for clause in clauses {
            if self.eval(&clause.condition)?.is_truthy() {
                return self.exec_block(&clause.body);
            }
        }
        else_body.map_or(Ok(()), |body| self.exec_block(body))
    }

    /// Executes `DO <n> TIMES` and `LOOP <n> TIMES`.
    ///
    /// The count is evaluated once, on entry, and must be a non-negative whole
    /// number. Each pass sees the mutations of the previous one.
    pub(crate) fn exec_counted_loop(&mut self, count: &str, body: &[Node]) -> ExecResult<()> {
        let value = self.eval(count)?;
        let invalid = || RuntimeError::InvalidLoopCount { expression: count.to_string(),
                                                          found:      value.to_string(), };
        let passes = match &value {
            Value::Number(n) => f64_to_u64_checked(*n, invalid())?,
            Value::Str(_) | Value::Bool(_) => return Err(invalid()),
        };

        trace!(count, passes, "counted loop");
        for _ in 0..passes {
            self.tick()?;
            self.exec_block(body)?;
        }
        Ok(())
    }

    /// Executes `LOOP AT <table> INTO <work area>`.
    ///
    /// The elements are copied when the loop is entered; appending to or
    /// clearing the table inside the body does not change the passes of the
    /// running loop.
    pub(crate) fn exec_table_loop(&mut self,
                                  table: &str,
                                  work_area: &str,
                                  body: &[Node])
                                  -> ExecResult<()> {
        let slot = self.env
                       .get(table)
                       .ok_or_else(|| RuntimeError::UndeclaredVariable { name: table.to_string() })?;
        let (element, snapshot) = match (&slot.descriptor, &slot.value) {
            (TypeDescriptor::Table(element), SlotValue::Table(elements)) => {
                (*element, elements.clone())
            },
            _ => return Err(RuntimeError::NotATable { name: table.to_string() }),
        };

        let ty = self.scalar_type(work_area)?;
        if !element.fits(&ty) {
            return Err(RuntimeError::WorkAreaMismatch { work_area: work_area.to_string(),
                                                        table:     table.to_string(),
                                                        element:   element.kind(), });
        }

        trace!(table, elements = snapshot.len(), "table loop");
        for item in &snapshot {
            self.tick()?;
            let bound = ty.coerce(&Value::from(item), work_area)?;
            self.store(work_area, bound)?;
            self.exec_block(body)?;
        }
        Ok(())
    }

    /// Counts one loop pass against the iteration budget.
    fn tick(&mut self) -> ExecResult<()> {
        self.iterations += 1;
        if self.iterations > self.max_iterations {
            return Err(RuntimeError::IterationLimit { limit: self.max_iterations });
        }
        Ok(())
    }
}
