use tracing::{debug, trace};

use crate::{
    ast::{Declaration, WriteItem},
    error::RuntimeError,
    interpreter::{
        environment::{Slot, SlotValue},
        executor::core::{ExecResult, Executor},
        parser::utils::is_identifier,
        types::{ElementType, ScalarType, TypeDescriptor},
        value::core::{Scalar, Value},
    },
};

impl Executor {
    /// Declares one variable.
    ///
    /// The slot is committed only after the type is validated and the
    /// initializer is evaluated and coerced. Redeclaring a name with the same
    /// type re-initializes it; a different type is an error.
    pub(crate) fn exec_declaration(&mut self, declaration: &Declaration) -> ExecResult<()> {
        let name = declaration.name.as_str();
        let descriptor = TypeDescriptor::from_spec(&declaration.type_spec, name)?;

        if let Some(existing) = self.env.get(name)
           && existing.descriptor != descriptor
        {
            return Err(RuntimeError::Redeclaration { name: name.to_string() });
        }

        let value = match (&descriptor, &declaration.value) {
            (_, None) => descriptor.initial(),
            (TypeDescriptor::Scalar(ty), Some(expression)) => {
                SlotValue::Scalar(ty.coerce(&self.eval(expression)?, name)?)
            },
            (TypeDescriptor::Table(element), Some(source)) => {
                SlotValue::Table(self.table_initializer(*element, source, name)?)
            },
        };

        debug!(name, ?descriptor, "declared");
        self.env.declare(name, Slot { descriptor, value });
        Ok(())
    }

    /// Copies the elements of another table for `VALUE` on a table
    /// declaration, coercing each one to `element`.
    fn table_initializer(&self, element: ElementType, source: &str, name: &str) -> ExecResult<Vec<Scalar>> {
        if !is_identifier(source) {
            return Err(RuntimeError::InvalidTableInitializer { name: name.to_string() });
        }
        let slot = self.env
                       .get(source)
                       .ok_or_else(|| RuntimeError::UndeclaredVariable { name: source.to_string() })?;
        let SlotValue::Table(elements) = &slot.value else {
            return Err(RuntimeError::InvalidTableInitializer { name: name.to_string() });
        };
        let ty = element.scalar_type();
        elements.iter()
                .map(|e| ty.coerce(&Value::from(e), name))
                .collect()
    }

    /// Evaluates every item first, then emits them, so a failing item leaves
    /// the output untouched.
    pub(crate) fn exec_write(&mut self, items: &[WriteItem]) -> ExecResult<()> {
        let rendered = items.iter()
                            .map(|item| -> ExecResult<(bool, Option<String>)> {
                                let text = match &item.value {
                                    Some(expression) => Some(self.eval(expression)?.to_string()),
                                    None => None,
                                };
                                Ok((item.new_line, text))
                            })
                            .collect::<ExecResult<Vec<_>>>()?;

        for (new_line, text) in rendered {
            if new_line {
                self.output.new_line();
            }
            if let Some(text) = text {
                trace!(%text, "write");
                self.output.write(&text);
            }
        }
        Ok(())
    }

    /// `ADD` and `SUBTRACT`. `sign` is `1.0` to add and `-1.0` to subtract.
    ///
    /// The amount is coerced to the target's type before the operation, so an
    /// `i` target adds a truncated amount.
    pub(crate) fn exec_add(&mut self,
                           amount: &str,
                           target: &str,
                           statement: &'static str,
                           sign: f64)
                           -> ExecResult<()> {
        let ty = self.numeric_target(target, statement)?;
        let amount = match ty.coerce(&self.eval(amount)?, target)? {
            Scalar::Number(n) => n,
            Scalar::Str(_) => return Err(non_numeric(statement, target)),
        };
        let current = match self.scalar(target)? {
            Scalar::Number(n) => *n,
            Scalar::Str(_) => return Err(non_numeric(statement, target)),
        };
        let result = ty.coerce(&Value::Number(sign.mul_add(amount, current)), target)?;
        self.store(target, result)
    }

    /// Resets a variable to its type's initial value.
    pub(crate) fn exec_clear(&mut self, target: &str) -> ExecResult<()> {
        let slot = self.env
                       .get_mut(target)
                       .ok_or_else(|| RuntimeError::UndeclaredVariable { name: target.to_string() })?;
        slot.value = slot.descriptor.initial();
        Ok(())
    }

    /// Appends a coerced element to an internal table.
    pub(crate) fn exec_append(&mut self, value: &str, table: &str) -> ExecResult<()> {
        let element = match self.env.get(table) {
            Some(Slot { descriptor: TypeDescriptor::Table(element),
                        .. }) => *element,
            Some(_) => return Err(RuntimeError::NotATable { name: table.to_string() }),
            None => return Err(RuntimeError::UndeclaredVariable { name: table.to_string() }),
        };
        let scalar = element.scalar_type().coerce(&self.eval(value)?, table)?;
        if let Some(Slot { value: SlotValue::Table(elements),
                           .. }) = self.env.get_mut(table)
        {
            elements.push(scalar);
        }
        Ok(())
    }

    /// `target = value`.
    pub(crate) fn exec_assign(&mut self, target: &str, value: &str) -> ExecResult<()> {
        let ty = self.scalar_type(target)?;
        let scalar = ty.coerce(&self.eval(value)?, target)?;
        self.store(target, scalar)
    }

    /// The declared type of a scalar variable.
    pub(crate) fn scalar_type(&self, name: &str) -> ExecResult<ScalarType> {
        let slot = self.env
                       .get(name)
                       .ok_or_else(|| RuntimeError::UndeclaredVariable { name: name.to_string() })?;
        slot.scalar_type()
            .cloned()
            .ok_or_else(|| RuntimeError::NotAScalar { name: name.to_string() })
    }

    /// Overwrites the content of a declared scalar.
    pub(crate) fn store(&mut self, name: &str, scalar: Scalar) -> ExecResult<()> {
        let slot = self.env
                       .get_mut(name)
                       .ok_or_else(|| RuntimeError::UndeclaredVariable { name: name.to_string() })?;
        slot.value = SlotValue::Scalar(scalar);
        Ok(())
    }

    fn scalar(&self, name: &str) -> ExecResult<&Scalar> {
        match self.env.get(name).map(|slot| &slot.value) {
            Some(SlotValue::Scalar(scalar)) => Ok(scalar),
            Some(SlotValue::Table(_)) => Err(RuntimeError::NotAScalar { name: name.to_string() }),
            None => Err(RuntimeError::UndeclaredVariable { name: name.to_string() }),
        }
    }

    fn numeric_target(&self, target: &str, statement: &'static str) -> ExecResult<ScalarType> {
        let ty = self.scalar_type(target)?;
        if ty.is_numeric() {
            Ok(ty)
        } else {
            Err(non_numeric(statement, target))
        }
    }
}

fn non_numeric(statement: &'static str, name: &str) -> RuntimeError {
    RuntimeError::NonNumericTarget { statement,
                                     name: name.to_string() }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        config::Config,
        interpreter::{environment::Environment, splitter::split, structurer::structure},
    };

    fn run(source: &str) -> (Executor, Vec<String>) {
        let tree = structure(&split(source)).unwrap();
        let mut executor = Executor::new(Environment::new(), &Config::default());
        executor.exec_block(&tree).unwrap();
        let diagnostics = executor.diagnostics.clone();
        (executor, diagnostics)
    }

    fn scalar_of(executor: &Executor, name: &str) -> Option<Scalar> {
        match executor.environment().get(name).map(|slot| &slot.value) {
            Some(SlotValue::Scalar(scalar)) => Some(scalar.clone()),
            _ => None,
        }
    }

    #[test]
    fn add_truncates_amount_for_integers() {
        let (executor, diagnostics) = run("DATA lv_n TYPE i VALUE 5. ADD '2.9' TO lv_n. SUBTRACT 10 FROM lv_n.");
        assert!(diagnostics.is_empty());
        assert_eq!(scalar_of(&executor, "lv_n"), Some(Scalar::Number(-3.0)));
    }

    #[test]
    fn add_keeps_packed_decimals() {
        let (executor, _) = run("DATA lv_p TYPE p LENGTH 8 DECIMALS 2 VALUE '1.5'. ADD '0.254' TO lv_p.");
        assert_eq!(scalar_of(&executor, "lv_p"), Some(Scalar::Number(1.75)));
    }

    #[test]
    fn add_rejects_text_targets() {
        let (_, diagnostics) = run("DATA lv_s TYPE string. ADD 1 TO lv_s. DATA lt_t TYPE TABLE OF i. ADD 1 TO lt_t.");
        assert_eq!(diagnostics,
                   vec!["ADD only supports numeric variables, but lv_s is not numeric.",
                        "Internal table lt_t cannot be used as a single value."]);
    }

    #[test]
    fn redeclaration_rules() {
        let (executor, diagnostics) =
            run("DATA lv_x TYPE i VALUE 4. DATA lv_x TYPE i. DATA lv_x TYPE string.");
        assert_eq!(scalar_of(&executor, "lv_x"), Some(Scalar::Number(0.0)));
        assert_eq!(diagnostics, vec!["Variable lv_x is already declared with a different type."]);
    }

    #[test]
    fn failed_declaration_is_not_visible() {
        let (executor, diagnostics) = run("DATA lv_d TYPE d VALUE '2024'.");
        assert_eq!(diagnostics.len(), 1);
        assert!(executor.environment().get("lv_d").is_none());
    }

    #[test]
    fn table_initializer_copies_elements() {
        let (executor, diagnostics) = run("DATA lt_a TYPE TABLE OF i. APPEND 1 TO lt_a. APPEND 2 TO lt_a. \
                                           DATA lt_b TYPE TABLE OF string VALUE lt_a. \
                                           DATA lt_c TYPE TABLE OF i VALUE 3.");
        assert_eq!(executor.environment().get("lt_b").map(|slot| &slot.value),
                   Some(&SlotValue::Table(vec![Scalar::Str("1".into()), Scalar::Str("2".into())])));
        assert_eq!(diagnostics,
                   vec!["Internal table lt_c can only be initialized from another internal table."]);
    }

    #[test]
    fn clear_resets_tables_and_scalars() {
        let (executor, diagnostics) = run("DATA lt_a TYPE TABLE OF i. APPEND 1 TO lt_a. CLEAR lt_a. \
                                           DATA lv_c TYPE c LENGTH 2 VALUE 'xy'. CLEAR lv_c.");
        assert!(diagnostics.is_empty());
        assert_eq!(executor.environment().get("lt_a").map(|slot| &slot.value),
                   Some(&SlotValue::Table(Vec::new())));
        assert_eq!(scalar_of(&executor, "lv_c"), Some(Scalar::Str("  ".into())));
    }

    #[test]
    fn append_coerces_and_checks_the_target() {
        let (executor, diagnostics) = run("DATA lt_n TYPE TABLE OF i. DATA lv_x TYPE i. \
                                           APPEND '7' TO lt_n. APPEND 'x' TO lt_n. APPEND 1 TO lv_x.");
        assert_eq!(executor.environment().get("lt_n").map(|slot| &slot.value),
                   Some(&SlotValue::Table(vec![Scalar::Number(7.0)])));
        assert_eq!(diagnostics,
                   vec!["Value assigned to lt_n must be numeric.",
                        "Variable lv_x is not an internal table."]);
    }

    #[test]
    fn failed_write_emits_nothing() {
        let (executor, diagnostics) = run("WRITE: 'a', lv_missing, 'b'.");
        assert!(executor.output.is_empty());
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn assignment_to_tables_is_rejected() {
        let (_, diagnostics) = run("DATA lt_t TYPE TABLE OF i. lt_t = 1.");
        assert_eq!(diagnostics, vec!["Internal table lt_t cannot be used as a single value."]);
    }
}
