use tracing::trace;

use crate::{
    ast::Expr,
    error::ExpressionError,
    interpreter::{
        environment::{Environment, SlotValue},
        parser::core::parse,
        value::core::Value,
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or an
/// `ExpressionError` describing the failure.
pub type EvalResult<T> = Result<T, ExpressionError>;

/// Parses and evaluates the text of an expression against an environment.
///
/// This is the single entry point used by every statement that needs a value.
///
/// # Errors
/// Returns an `ExpressionError` if the text does not parse or if evaluation
/// fails (undeclared or table variables, operand kind mismatches).
///
/// # Example
/// ```
/// use abapi::interpreter::{
///     environment::Environment, evaluator::core::evaluate, value::core::Value,
/// };
///
/// let env = Environment::new();
/// assert_eq!(evaluate("(1 + 2) * 4", &env).unwrap(), Value::Number(12.0));
/// assert_eq!(evaluate("'a' = 'a'", &env).unwrap(), Value::Bool(true));
/// assert_eq!(evaluate("1 / 0", &env).unwrap(), Value::Number(f64::INFINITY));
/// ```
pub fn evaluate(source: &str, env: &Environment) -> EvalResult<Value> {
    let expr = parse(source)?;
    let value = Evaluator::new(env).eval(&expr)?;
    trace!(expression = source, %value, "evaluated");
    Ok(value)
}

/// Evaluates expression trees against a borrowed environment.
///
/// Evaluation never mutates the environment.
pub struct Evaluator<'env> {
    env: &'env Environment,
}

impl<'env> Evaluator<'env> {
    /// Creates an evaluator reading from `env`.
    #[must_use]
    pub const fn new(env: &'env Environment) -> Self {
        Self { env }
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// Dispatches on the expression variant: literals, variables, unary and
    /// binary operations.
    pub fn eval(&self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Number(n) => Ok(Value::Number(*n)),
            Expr::Str(s) => Ok(Value::Str(s.clone())),
            Expr::Variable(name) => self.eval_variable(name),
            Expr::UnaryOp { op, expr } => {
                let operand = self.eval(expr)?;
                Self::eval_unary(*op, &operand)
            },
            Expr::BinaryOp { left, op, right } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                Self::eval_binary(*op, &left, &right)
            },
        }
    }

    /// Reads a scalar variable. Internal tables are not expression values.
    fn eval_variable(&self, name: &str) -> EvalResult<Value> {
        let slot = self.env
                       .get(name)
                       .ok_or_else(|| ExpressionError::UndeclaredVariable { name: name.to_string() })?;
        match &slot.value {
            SlotValue::Scalar(scalar) => Ok(Value::from(scalar)),
            SlotValue::Table(_) => {
                Err(ExpressionError::TableInExpression { name: name.to_string() })
            },
        }
    }
}
