use crate::{
    ast::BinaryOperator,
    error::ExpressionError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::core::Value,
    },
};

impl Evaluator<'_> {
    /// Evaluates a binary operation on two already-evaluated operands.
    ///
    /// - `+`, `-`, `*`, `/`, `>` and `<` require two numbers.
    /// - `=` and `<>` require two values of the same kind.
    ///
    /// Division follows IEEE semantics: dividing by zero yields an infinity or
    /// `NaN` rather than an error.
    ///
    /// # Example
    /// ```
    /// use abapi::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Evaluator, value::core::Value},
    /// };
    ///
    /// let result = Evaluator::eval_binary(BinaryOperator::NotEqual,
    ///                                     &Value::Str("a".into()),
    ///                                     &Value::Str("b".into()));
    /// assert_eq!(result.unwrap(), Value::Bool(true));
    /// ```
    pub fn eval_binary(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
        match op {
            BinaryOperator::Equal => Ok(Value::Bool(Self::eval_equality(op, left, right)?)),
            BinaryOperator::NotEqual => Ok(Value::Bool(!Self::eval_equality(op, left, right)?)),
            BinaryOperator::Add => Self::eval_numeric(op, left, right, |l, r| Value::Number(l + r)),
            BinaryOperator::Sub => Self::eval_numeric(op, left, right, |l, r| Value::Number(l - r)),
            BinaryOperator::Mul => Self::eval_numeric(op, left, right, |l, r| Value::Number(l * r)),
            BinaryOperator::Div => Self::eval_numeric(op, left, right, |l, r| Value::Number(l / r)),
            BinaryOperator::Greater => Self::eval_numeric(op, left, right, |l, r| Value::Bool(l > r)),
            BinaryOperator::Less => Self::eval_numeric(op, left, right, |l, r| Value::Bool(l < r)),
        }
    }

    /// Compares two values of the same kind for equality.
    #[allow(clippy::float_cmp)]
    fn eval_equality(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<bool> {
        match (left, right) {
            (Value::Number(l), Value::Number(r)) => Ok(l == r),
            (Value::Str(l), Value::Str(r)) => Ok(l == r),
            (Value::Bool(l), Value::Bool(r)) => Ok(l == r),
            _ => Err(ExpressionError::MismatchedComparison { operator: op.symbol(),
                                                             left:     left.kind(),
                                                             right:    right.kind(), }),
        }
    }

    /// Applies `f` to two numeric operands.
    fn eval_numeric(op: BinaryOperator,
                    left: &Value,
                    right: &Value,
                    f: impl FnOnce(f64, f64) -> Value)
                    -> EvalResult<Value> {
        let number = |value: &Value| {
            value.as_number()
                 .ok_or(ExpressionError::NonNumericOperand { operator: op.symbol(),
                                                             found:    value.kind(), })
        };
        Ok(f(number(left)?, number(right)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(v: f64) -> Value {
        Value::Number(v)
    }

    #[test]
    fn arithmetic() {
        assert_eq!(Evaluator::eval_binary(BinaryOperator::Sub, &n(2.0), &n(5.0)), Ok(n(-3.0)));
        assert_eq!(Evaluator::eval_binary(BinaryOperator::Div, &n(7.0), &n(2.0)), Ok(n(3.5)));
    }

    #[test]
    fn arithmetic_rejects_strings() {
        assert_eq!(Evaluator::eval_binary(BinaryOperator::Add, &Value::Str("1".into()), &n(1.0)),
                   Err(ExpressionError::NonNumericOperand { operator: "+",
                                                            found:    "a string", }));
    }

    #[test]
    fn ordering_needs_numbers() {
        assert!(Evaluator::eval_binary(BinaryOperator::Less,
                                       &Value::Str("a".into()),
                                       &Value::Str("b".into())).is_err());
        assert_eq!(Evaluator::eval_binary(BinaryOperator::Greater, &n(3.0), &n(2.0)),
                   Ok(Value::Bool(true)));
    }

    #[test]
    fn equality_needs_matching_kinds() {
        assert_eq!(Evaluator::eval_binary(BinaryOperator::Equal, &n(1.0), &Value::Str("1".into())),
                   Err(ExpressionError::MismatchedComparison { operator: "=",
                                                               left:     "a number",
                                                               right:    "a string", }));
        assert_eq!(Evaluator::eval_binary(BinaryOperator::NotEqual,
                                          &Value::Bool(true),
                                          &Value::Bool(false)),
                   Ok(Value::Bool(true)));
    }

    #[test]
    fn nan_is_never_equal() {
        assert_eq!(Evaluator::eval_binary(BinaryOperator::Equal, &n(f64::NAN), &n(f64::NAN)),
                   Ok(Value::Bool(false)));
    }
}
