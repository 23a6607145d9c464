use crate::{
    ast::UnaryOperator,
    error::ExpressionError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::core::Value,
    },
};

impl Evaluator<'_> {
    /// Applies a prefix operator. Only numbers are accepted.
    ///
    /// # Example
    /// ```
    /// use abapi::{
    ///     ast::UnaryOperator,
    ///     interpreter::{evaluator::core::Evaluator, value::core::Value},
    /// };
    ///
    /// let result = Evaluator::eval_unary(UnaryOperator::Negate, &Value::Number(4.0));
    /// assert_eq!(result.unwrap(), Value::Number(-4.0));
    ///
    /// assert!(Evaluator::eval_unary(UnaryOperator::Plus, &Value::Str("4".into())).is_err());
    /// ```
    pub fn eval_unary(op: UnaryOperator, operand: &Value) -> EvalResult<Value> {
        let n = operand.as_number()
                       .ok_or(ExpressionError::NonNumericOperand { operator: op.symbol(),
                                                                   found:    operand.kind(), })?;
        match op {
            UnaryOperator::Plus => Ok(Value::Number(n)),
            UnaryOperator::Negate => Ok(Value::Number(-n)),
        }
    }
}
