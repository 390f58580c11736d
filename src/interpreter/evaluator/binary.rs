use crate::{error::RuntimeError, interpreter::value::Value};

/// Represents a binary operator with an evaluation rule.
///
/// The `%` and `?` characters are lexed as operator tokens but map to no
/// variant here; expressions stop in front of them.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition or string concatenation (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
}

impl BinaryOperator {
    /// Maps an operator token's text to its evaluation rule, if one exists.
    ///
    /// # Example
    /// ```
    /// use imperia::interpreter::evaluator::binary::BinaryOperator;
    ///
    /// assert_eq!(BinaryOperator::from_symbol("+"), Some(BinaryOperator::Add));
    /// assert_eq!(BinaryOperator::from_symbol("%"), None);
    /// ```
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Self::Add),
            "-" => Some(Self::Sub),
            "*" => Some(Self::Mul),
            "/" => Some(Self::Div),
            _ => None,
        }
    }

    /// `true` for the expression-level operators `+` and `-`.
    #[must_use]
    pub const fn is_additive(self) -> bool {
        matches!(self, Self::Add | Self::Sub)
    }

    /// `true` for the term-level operators `*` and `/`.
    #[must_use]
    pub const fn is_multiplicative(self) -> bool {
        matches!(self, Self::Mul | Self::Div)
    }
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operator = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
        };
        write!(f, "{operator}")
    }
}

/// Applies a binary operator to two fully evaluated operands.
///
/// Semantics:
/// - `+` concatenates when either operand is a string (the other operand is
///   rendered in its natural textual form); otherwise it adds numerically.
/// - `-` and `*` require numeric operands.
/// - `/` requires numeric operands and always produces a real (true
///   division). Division by zero — integer or real — is an error; that is the
///   one documented zero-division policy for the whole interpreter.
/// - Integer `+`, `-` and `*` are checked and report overflow instead of
///   wrapping. Mixed integer/real operands promote the integer side.
///
/// # Parameters
/// - `op`: The operator to apply.
/// - `left`: Left operand.
/// - `right`: Right operand.
/// - `line`: Source line for error reporting.
///
/// # Returns
/// The computed value.
///
/// # Errors
/// `TypeError`, `DivisionByZero`, `Overflow`, or `LiteralTooLarge` as
/// described above.
///
/// # Example
/// ```
/// use imperia::interpreter::{
///     evaluator::binary::{BinaryOperator, apply_binary},
///     value::Value,
/// };
///
/// let v = apply_binary(BinaryOperator::Add, &Value::Str("a".into()), &Value::Integer(1), 1);
/// assert_eq!(v.unwrap(), Value::Str("a1".into()));
/// ```
pub fn apply_binary(op: BinaryOperator,
                    left: &Value,
                    right: &Value,
                    line: usize)
                    -> Result<Value, RuntimeError> {
    match op {
        BinaryOperator::Add => apply_add(left, right, line),
        BinaryOperator::Sub => {
            require_numeric(op, left, right, line)?;
            match (left, right) {
                (Value::Integer(a), Value::Integer(b)) => a.checked_sub(*b)
                                                           .map(Value::Integer)
                                                           .ok_or(RuntimeError::Overflow { line }),
                _ => Ok(Value::Real(left.as_real(line)? - right.as_real(line)?)),
            }
        },
        BinaryOperator::Mul => {
            require_numeric(op, left, right, line)?;
            match (left, right) {
                (Value::Integer(a), Value::Integer(b)) => a.checked_mul(*b)
                                                           .map(Value::Integer)
                                                           .ok_or(RuntimeError::Overflow { line }),
                _ => Ok(Value::Real(left.as_real(line)? * right.as_real(line)?)),
            }
        },
        BinaryOperator::Div => apply_div(left, right, line),
    }
}

/// `+` is the one operator with a string rule: a string on either side turns
/// the operation into concatenation of both operands' textual forms.
fn apply_add(left: &Value, right: &Value, line: usize) -> Result<Value, RuntimeError> {
    if matches!(left, Value::Str(_)) || matches!(right, Value::Str(_)) {
        return Ok(Value::Str(format!("{left}{right}")));
    }

    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => a.checked_add(*b)
                                                   .map(Value::Integer)
                                                   .ok_or(RuntimeError::Overflow { line }),
        _ => Ok(Value::Real(left.as_real(line)? + right.as_real(line)?)),
    }
}

/// Division always produces a real. A zero divisor of either numeric type
/// fails before the operands are promoted.
fn apply_div(left: &Value, right: &Value, line: usize) -> Result<Value, RuntimeError> {
    require_numeric(BinaryOperator::Div, left, right, line)?;

    let divides_by_zero = match right {
        Value::Integer(n) => *n == 0,
        Value::Real(r) => *r == 0.0,
        Value::Str(_) => false,
    };
    if divides_by_zero {
        return Err(RuntimeError::DivisionByZero { line });
    }

    Ok(Value::Real(left.as_real(line)? / right.as_real(line)?))
}

fn require_numeric(op: BinaryOperator,
                   left: &Value,
                   right: &Value,
                   line: usize)
                   -> Result<(), RuntimeError> {
    if left.is_numeric() && right.is_numeric() {
        Ok(())
    } else {
        Err(RuntimeError::TypeError { details:
                                          format!("Operator '{op}' requires numeric operands, found {} and {}",
                                                  left.type_name(),
                                                  right.type_name()),
                                      line })
    }
}
